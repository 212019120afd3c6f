//! # heatrate
//!
//! Pricing of heat rate call options: calls on the spread between a power
//! forward and a heat-rate multiple of a gas forward, net of operating
//! costs.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `hr-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! heatrate = "0.1"
//! ```
//!
//! ```rust
//! use heatrate::instruments::{Corr, Df, Forwards, HeatRateCallSpec, PricingContext, Vols};
//! use heatrate::pricingengines::{exercise_probability, KirkEngine, Pricer};
//!
//! let ctx = PricingContext::new(
//!     HeatRateCallSpec::new(7.0, 5.0, 1.0, 0.0),
//!     Forwards::new(60.0, 7.0),
//!     Vols::new(0.3, 0.25),
//!     Corr::new(0.6),
//!     Df::new(0.05),
//! )?;
//!
//! let price = KirkEngine::default().price(&ctx)?;
//! let prob = exercise_probability(&ctx)?;
//! assert!(price.at(0) > 0.0);
//! assert!(prob.at(0) > 0.0 && prob.at(0) < 1.0);
//! # Ok::<(), heatrate::core::Error>(())
//! ```
//!
//! ## Features
//!
//! * `parallel`: simulate Monte Carlo batches on the rayon thread pool
//! * `serde`: (de)serialize contracts, market data, settings and
//!   valuation records

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, batch values, diagnostics, and error definitions.
pub use hr_core as core;

/// Mathematical utilities: normal distribution, RNG, statistics, solvers.
pub use hr_math as math;

/// Contracts, market data, and pricing contexts.
pub use hr_instruments as instruments;

/// Stochastic process definitions.
pub use hr_processes as processes;

/// Numerical methods (time grid, Monte Carlo path generation).
pub use hr_methods as methods;

/// Pricing engines.
pub use hr_pricingengines as pricingengines;

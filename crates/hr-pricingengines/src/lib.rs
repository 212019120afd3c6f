//! # hr-pricingengines
//!
//! Pricing engines for heat rate call options.
//!
//! ## Engines
//!
//! - [`KirkEngine`]: Kirk's closed-form spread approximation
//! - [`MonteCarloEngine`]: two-factor lognormal simulation with antithetic
//!   sampling and a spread control variate
//!
//! ## On top of any [`Pricer`]
//!
//! - [`ExerciseProbability`]: finite-difference `−∂V/∂K`
//! - [`value_contracts`]: valuation records for storage through a
//!   [`ValuationSink`]
//!
//! [`KirkImpliedVolatility`] inverts the Kirk price for the power
//! volatility.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod exercise_probability;
pub mod implied_volatility;
pub mod kirk_engine;
pub mod mc_engine;
pub mod pricer;
pub mod valuation;

pub use exercise_probability::{exercise_probability, ExerciseProbability, DEFAULT_STRIKE_BUMP};
pub use implied_volatility::{ImpliedVolMethod, ImpliedVolSettings, KirkImpliedVolatility};
pub use kirk_engine::{blended_volatility, kirk_price, KirkEngine, KirkSettings};
pub use mc_engine::{McEstimate, McSettings, MonteCarloEngine};
pub use pricer::Pricer;
pub use valuation::{
    summarize, value_contracts, ContractId, MemorySink, ScenarioSummary, ValuationRecord,
    ValuationSink,
};

//! # hr-instruments
//!
//! Heat rate call contract terms, market inputs, and the validated
//! [`PricingContext`] that every pricer consumes.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod contract;
pub mod effective;
pub mod market;

pub use context::{ContextEntry, PricingContext};
pub use contract::HeatRateCallSpec;
pub use effective::EffectiveParameters;
pub use market::{Corr, Df, Forwards, Vols};

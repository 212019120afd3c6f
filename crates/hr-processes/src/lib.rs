//! # hr-processes
//!
//! Stochastic processes driving the Monte Carlo pricer: the two-factor
//! process trait and the driftless lognormal forward model for power and
//! gas.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod lognormal_forward_process;
pub mod stochastic_process;

pub use lognormal_forward_process::LognormalForwardProcess;
pub use stochastic_process::{State2, StochasticProcess2D};

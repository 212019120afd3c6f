//! # hr-math
//!
//! Mathematical utilities: the standard normal distribution (via statrs),
//! seeded random number generation, paired sample statistics, 1D root
//! solvers, and the two-factor correlation factor (over nalgebra).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Two-factor Cholesky correlation factor.
pub mod correlation;

/// Probability distributions.
pub mod distributions;

/// Random number generators.
pub mod random_numbers;

/// 1D root-finding solvers.
pub mod solvers1d;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use correlation::CorrelationFactor;
pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use random_numbers::{
    entropy_seed, stream_seed, InverseCumulativeNormalRng, MersenneTwisterUniformRng,
};
pub use statistics::PairedStatistics;

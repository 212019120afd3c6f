//! # hr-methods
//!
//! Numerical methods: the uniform simulation time grid and the batched
//! two-factor Monte Carlo path generator.
//!
//! # Modules
//!
//! * [`monte_carlo`]: terminal path simulation with antithetic batches,
//!   seeded streams and cancellation
//! * [`time_grid`]: uniform time grid
//!
//! # Features
//!
//! * `parallel`: simulate batches on the rayon thread pool
//! * `serde`: (de)serialize [`PathGenSettings`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo simulation: path generation and terminal draws.
pub mod monte_carlo;

/// Uniform time grid.
pub mod time_grid;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::{PathGenSettings, TerminalDraws, TwoFactorPathGenerator, DEFAULT_BATCH_SIZE};
pub use time_grid::TimeGrid;

//! # hr-core
//!
//! Core types, traits, and error definitions for heatrate-rs.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – type aliases, the error hierarchy, the
//! scalar/vector [`Batch`] value, and non-fatal diagnostics.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Scalar-or-vector values and batch shapes.
pub mod batch;

/// Non-fatal advisories (correlation range checks).
pub mod diagnostics;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use batch::{Batch, Shape};
pub use diagnostics::{CorrelationAdvisory, Diagnostic};
pub use errors::{Error, Result};

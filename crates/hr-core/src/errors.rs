//! Error types for heatrate-rs.
//!
//! Every failure in the pricing core maps to a single `thiserror`-derived
//! enum. Precondition checks go through the `ensure!` macro and hard
//! failures through `fail!`, both defined here.
//!
//! Near-zero volatility and a degenerate control variate are *not* errors:
//! the pricers take a defined fallback branch instead.

use thiserror::Error;

/// The top-level error type used throughout heatrate-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (solver non-convergence and similar).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (raised by `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Pricing input that leaves the formula undefined.
    ///
    /// For vectorized inputs `indices` lists every offending entry, not
    /// just the first; it is empty for scalar inputs.
    #[error("domain error: {message}")]
    Domain {
        /// Human-readable description, including the offending indices.
        message: String,
        /// Offending batch indices (empty for a scalar context).
        indices: Vec<usize>,
    },

    /// Vector-valued fields of a pricing context disagree in length.
    #[error(
        "inconsistent vector lengths in pricing context, all vector fields must share one length; found: {}",
        format_fields(.fields)
    )]
    InconsistentLengths {
        /// Every vector field of the context with its length.
        fields: Vec<(String, usize)>,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A simulation was cancelled between batches.
    #[error("simulation cancelled")]
    Cancelled,
}

fn format_fields(fields: &[(String, usize)]) -> String {
    fields
        .iter()
        .map(|(name, len)| format!("{name}={len}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Build a [`Error::Domain`] from a message and the offending indices.
    pub fn domain(message: impl Into<String>, indices: Vec<usize>) -> Self {
        Error::Domain {
            message: message.into(),
            indices,
        }
    }
}

/// Shorthand `Result` type used throughout heatrate-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hr_core::{ensure, errors::Error};
/// fn positive(x: f64) -> hr_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use hr_core::{fail, errors::Error};
/// fn always_err() -> hr_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconsistent_lengths_lists_every_field() {
        let e = Error::InconsistentLengths {
            fields: vec![
                ("contract.strike".into(), 3),
                ("forwards.f_power".into(), 2),
                ("df.r".into(), 3),
            ],
        };
        let msg = e.to_string();
        assert!(msg.contains("contract.strike=3"), "{msg}");
        assert!(msg.contains("forwards.f_power=2"), "{msg}");
        assert!(msg.contains("df.r=3"), "{msg}");
    }

    #[test]
    fn domain_error_keeps_indices() {
        let e = Error::domain("invalid denominator at indices [0, 2]", vec![0, 2]);
        match &e {
            Error::Domain { indices, .. } => assert_eq!(indices, &vec![0, 2]),
            other => panic!("unexpected variant {other:?}"),
        }
        assert!(e.to_string().starts_with("domain error:"));
    }
}

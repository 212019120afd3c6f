//! Non-fatal advisories raised while building pricing inputs.
//!
//! An advisory never stops pricing. It is returned to the caller as a value
//! and also emitted as a `tracing` warning, so it can be inspected in tests
//! without capturing global output.

use crate::Real;
use std::fmt;

/// A correlation outside the expected `[0, 1]` range.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationAdvisory {
    /// Offending batch indices (`[0]` for a scalar correlation).
    pub indices: Vec<usize>,
    /// The offending values, aligned with `indices`.
    pub values: Vec<Real>,
    /// Whether the correlation was given as a scalar.
    pub scalar: bool,
}

impl fmt::Display for CorrelationAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scalar {
            write!(
                f,
                "correlation {:.4} is outside [0, 1]; this may indicate unusual market conditions",
                self.values.first().copied().unwrap_or(Real::NAN)
            )
        } else {
            write!(
                f,
                "correlation values outside [0, 1] at indices {:?}: {:?}; this may indicate unusual market conditions",
                self.indices, self.values
            )
        }
    }
}

/// Any advisory a pricing context can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// See [`CorrelationAdvisory`].
    CorrelationOutOfRange(CorrelationAdvisory),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::CorrelationOutOfRange(a) => a.fmt(f),
        }
    }
}

impl Diagnostic {
    /// Emit the advisory as a `tracing` warning.
    pub fn emit(&self) {
        tracing::warn!(target: "heatrate::diagnostics", "{self}");
    }
}

//! Two-factor correlation factor.
//!
//! Turns a scalar correlation `ρ` into the lower-triangular Cholesky factor
//! of `[[1, ρ], [ρ, 1]]`:
//!
//! ```text
//! L = | 1        0          |
//!     | ρ   √max(0, 1 − ρ²) |
//! ```
//!
//! `ρ` is always clamped to `[-1, 1]` first so the square root stays real.
//! This clamp is unconditional and independent of any pricer-level clipping
//! setting.

use hr_core::Real;
use nalgebra::{Matrix2, Vector2};

/// Cholesky factor of a 2×2 correlation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationFactor {
    rho: Real,
    l: Matrix2<Real>,
}

impl CorrelationFactor {
    /// Build the factor for correlation `rho`, clamping it to `[-1, 1]`.
    pub fn new(rho: Real) -> Self {
        let rho = rho.clamp(-1.0, 1.0);
        let tail = (1.0 - rho * rho).max(0.0).sqrt();
        Self {
            rho,
            l: Matrix2::new(1.0, 0.0, rho, tail),
        }
    }

    /// The (clamped) correlation the factor reproduces.
    pub fn rho(&self) -> Real {
        self.rho
    }

    /// The lower-triangular factor `L`.
    pub fn matrix(&self) -> &Matrix2<Real> {
        &self.l
    }

    /// `L·Lᵀ`, the correlation matrix the factor reproduces.
    pub fn correlation_matrix(&self) -> Matrix2<Real> {
        self.l * self.l.transpose()
    }

    /// Map independent standard normals `z` to correlated ones, `L·z`.
    #[inline]
    pub fn correlate(&self, z: Vector2<Real>) -> Vector2<Real> {
        self.l * z
    }
}

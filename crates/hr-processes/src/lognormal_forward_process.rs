//! Driftless lognormal forward prices for power and gas.
//!
//! ```text
//! dFᵢ/Fᵢ = σᵢ dWᵢ,   i ∈ {power, gas}
//! ```
//!
//! Under the forward measure both forwards are martingales, so the drift is
//! zero and each factor is stepped exactly in log space.

use crate::stochastic_process::{State2, StochasticProcess2D};
use hr_core::{Time, Volatility};

/// Two independent-vol lognormal forwards with zero drift.
///
/// Exact step per factor: `F·exp(−½σ²·dt + σ·√dt·dW)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LognormalForwardProcess {
    vol_power: Volatility,
    vol_gas: Volatility,
}

impl LognormalForwardProcess {
    /// Create the process from the power and gas volatilities.
    pub fn new(vol_power: Volatility, vol_gas: Volatility) -> Self {
        Self { vol_power, vol_gas }
    }

    /// Power volatility.
    pub fn vol_power(&self) -> Volatility {
        self.vol_power
    }

    /// Gas volatility.
    pub fn vol_gas(&self) -> Volatility {
        self.vol_gas
    }

    fn sigma(&self) -> State2 {
        State2::new(self.vol_power, self.vol_gas)
    }
}

impl StochasticProcess2D for LognormalForwardProcess {
    fn drift(&self, _x: &State2) -> State2 {
        State2::zeros()
    }

    fn diffusion(&self, x: &State2) -> State2 {
        self.sigma().component_mul(x)
    }

    fn variance(&self, dt: Time) -> State2 {
        let s = self.sigma();
        s.component_mul(&s) * dt
    }

    /// Exact: forwards are martingales.
    fn expectation(&self, x: &State2, _dt: Time) -> State2 {
        *x
    }

    /// Exact lognormal step.
    fn evolve(&self, x: &State2, dt: Time, dw: &State2) -> State2 {
        let sqrt_dt = dt.sqrt();
        let var = self.variance(dt);
        let s = self.sigma();
        State2::new(
            x[0] * (-0.5 * var[0] + s[0] * sqrt_dt * dw[0]).exp(),
            x[1] * (-0.5 * var[1] + s[1] * sqrt_dt * dw[1]).exp(),
        )
    }
}

//! `StochasticProcess2D`: the base trait for two-factor processes.
//!
//! A process `dXᵢ = μᵢ(X) dt + σᵢ(X) dWᵢ`, `i ∈ {power, gas}`, is described
//! by its per-factor drift and diffusion, and an `evolve` method that
//! advances the state over one step given correlated normal increments.
//! Correlation between the factors is applied by the caller; the process
//! only sees the already-correlated `dw`.

use hr_core::{Real, Time};
use nalgebra::Vector2;

/// State of a two-factor process, `(power, gas)`.
pub type State2 = Vector2<Real>;

/// A two-factor diffusion stepped on a time grid.
pub trait StochasticProcess2D: std::fmt::Debug + Send + Sync {
    /// Drift vector `μ(x)`.
    fn drift(&self, x: &State2) -> State2;

    /// Per-factor diffusion `σ(x)`.
    fn diffusion(&self, x: &State2) -> State2;

    /// Per-factor variance of the log-increment over `dt`.
    fn variance(&self, dt: Time) -> State2;

    /// Expectation `E[x(t+Δt) | x(t)]`.
    ///
    /// Default: first-order Euler `x + μ(x)·Δt`.
    fn expectation(&self, x: &State2, dt: Time) -> State2 {
        x + self.drift(x) * dt
    }

    /// Per-factor standard deviation `σ(x)·√Δt`.
    fn std_deviation(&self, x: &State2, dt: Time) -> State2 {
        self.diffusion(x) * dt.sqrt()
    }

    /// Advance the state by one step.
    ///
    /// Default: Euler step `E[x(t+Δt)] + σ·√Δt ⊙ dw`.
    fn evolve(&self, x: &State2, dt: Time, dw: &State2) -> State2 {
        self.expectation(x, dt) + self.std_deviation(x, dt).component_mul(dw)
    }
}

impl<P: StochasticProcess2D + ?Sized> StochasticProcess2D for &P {
    fn drift(&self, x: &State2) -> State2 {
        (**self).drift(x)
    }

    fn diffusion(&self, x: &State2) -> State2 {
        (**self).diffusion(x)
    }

    fn variance(&self, dt: Time) -> State2 {
        (**self).variance(dt)
    }

    fn expectation(&self, x: &State2, dt: Time) -> State2 {
        (**self).expectation(x, dt)
    }

    fn std_deviation(&self, x: &State2, dt: Time) -> State2 {
        (**self).std_deviation(x, dt)
    }

    fn evolve(&self, x: &State2, dt: Time, dw: &State2) -> State2 {
        (**self).evolve(x, dt, dw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Arithmetic Brownian motion with constant drift and vol per factor.
    #[derive(Debug)]
    struct ConstantProcess {
        mu: State2,
        sigma: State2,
    }

    impl StochasticProcess2D for ConstantProcess {
        fn drift(&self, _x: &State2) -> State2 {
            self.mu
        }

        fn diffusion(&self, _x: &State2) -> State2 {
            self.sigma
        }

        fn variance(&self, dt: Time) -> State2 {
            self.sigma.component_mul(&self.sigma) * dt
        }
    }

    fn process() -> ConstantProcess {
        ConstantProcess {
            mu: State2::new(0.05, -0.01),
            sigma: State2::new(0.20, 0.10),
        }
    }

    #[test]
    fn euler_step_without_noise_follows_drift() {
        let p = process();
        let x = p.evolve(&State2::new(100.0, 10.0), 1.0, &State2::zeros());
        assert_abs_diff_eq!(x[0], 100.05, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 9.99, epsilon = 1e-12);
    }

    #[test]
    fn euler_step_scales_noise_by_sqrt_dt() {
        let p = process();
        let x = p.evolve(&State2::new(0.0, 0.0), 0.25, &State2::new(1.0, -2.0));
        assert_abs_diff_eq!(x[0], 0.0125 + 0.20 * 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], -0.0025 - 0.10 * 0.5 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn reference_forwards_to_process() {
        let p = process();
        let r = &p;
        assert_eq!(r.variance(2.0), p.variance(2.0));
    }
}

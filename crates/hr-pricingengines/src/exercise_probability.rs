//! Exercise probability by central finite difference in the strike.
//!
//! ```text
//! p ≈ −(V(K + dK) − V(K − dK)) / (2·dK)
//! ```
//!
//! For a call, `−∂V/∂K` is the discounted probability of finishing in the
//! money. The wrapped pricer does the work, so strips are handled however
//! that pricer handles them.

use crate::kirk_engine::KirkEngine;
use crate::pricer::Pricer;
use hr_core::{ensure, Batch, Real, Result};
use hr_instruments::PricingContext;

/// Default strike bump.
pub const DEFAULT_STRIKE_BUMP: Real = 5e-6;

/// Finite-difference exercise probability over any [`Pricer`].
#[derive(Debug, Clone)]
pub struct ExerciseProbability<P> {
    pricer: P,
    dk: Real,
}

impl<P: Pricer> ExerciseProbability<P> {
    /// Wrap `pricer`, bumping the strike by `±dk`.
    pub fn new(pricer: P, dk: Real) -> Self {
        Self { pricer, dk }
    }

    /// Wrap `pricer` with the default bump.
    pub fn with_default_bump(pricer: P) -> Self {
        Self::new(pricer, DEFAULT_STRIKE_BUMP)
    }

    /// The strike bump.
    pub fn dk(&self) -> Real {
        self.dk
    }

    /// The wrapped pricer.
    pub fn pricer(&self) -> &P {
        &self.pricer
    }

    /// Exercise probability of every entry, optionally clipped to `[0, 1]`.
    ///
    /// # Errors
    /// `Precondition` if `dk` is not positive; otherwise whatever the
    /// wrapped pricer returns.
    pub fn calculate(&self, ctx: &PricingContext, clamp: bool) -> Result<Batch> {
        ensure!(self.dk > 0.0, "strike bump must be positive, got {}", self.dk);
        let up = self.pricer.price(&ctx.bump_strike(self.dk))?;
        let down = self.pricer.price(&ctx.bump_strike(-self.dk))?;
        let two_dk = 2.0 * self.dk;
        let prob = up.zip_with(&down, |u, d| -(u - d) / two_dk)?;
        Ok(if clamp {
            prob.map(|p| p.clamp(0.0, 1.0))
        } else {
            prob
        })
    }
}

/// Unclipped exercise probability with a default [`KirkEngine`] and the
/// default bump.
pub fn exercise_probability(ctx: &PricingContext) -> Result<Batch> {
    ExerciseProbability::with_default_bump(KirkEngine::default()).calculate(ctx, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hr_instruments::{Corr, Df, Forwards, HeatRateCallSpec, Vols};

    fn ctx(f_power: f64, f_gas: f64, h: f64, k: f64) -> PricingContext {
        PricingContext::new(
            HeatRateCallSpec::new(h, k, 1.0, 0.0),
            Forwards::new(f_power, f_gas),
            Vols::new(0.2, 0.3),
            Corr::new(0.5),
            Df::new(0.05),
        )
        .unwrap()
    }

    #[test]
    fn zero_bump_is_rejected() {
        let calc = ExerciseProbability::new(KirkEngine::default(), 0.0);
        assert!(calc.calculate(&ctx(50.0, 7.0, 7.0, 1.0), false).is_err());
    }

    #[test]
    fn zero_volatility_gives_discount_factor_in_the_money() {
        let zero_vol = ctx(60.0, 7.0, 7.0, 5.0).with_vols(Vols::new(0.0, 0.0)).unwrap();
        let p = exercise_probability(&zero_vol).unwrap();
        assert_abs_diff_eq!(p.at(0), (-0.05_f64).exp(), epsilon = 1e-6);
    }

    #[test]
    fn clamp_keeps_probabilities_in_unit_interval() {
        // intrinsic branch out of the money has slope exp(−rT) too
        let zero_vol = ctx(30.0, 10.0, 7.0, 10.0).with_vols(Vols::new(0.0, 0.0)).unwrap();
        let calc = ExerciseProbability::with_default_bump(KirkEngine::default());
        let p = calc.calculate(&zero_vol, true).unwrap().at(0);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn scalar_context_gives_scalar_probability() {
        let p = exercise_probability(&ctx(50.0, 7.0, 7.0, 1.0)).unwrap();
        assert!(p.is_scalar());
    }
}

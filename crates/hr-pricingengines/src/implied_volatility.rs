//! Implied power volatility under Kirk's approximation.
//!
//! Finds the `vol_power` at which the Kirk price of a single contract
//! matches a target price, holding gas volatility and correlation fixed.

use crate::kirk_engine::{blended_volatility, kirk_price, KirkEngine};
use crate::pricer::Pricer;
use hr_core::{Error, Real, Result, Volatility};
use hr_instruments::PricingContext;
use hr_math::distributions::normal_pdf;
use hr_math::solvers1d::{brent, newton_safe};

/// Root finder used by [`KirkImpliedVolatility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpliedVolMethod {
    /// Safeguarded Newton with the analytic Kirk vega.
    #[default]
    NewtonSafe,
    /// Brent's method, derivative-free.
    Brent,
}

/// Solver bracket and tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolSettings {
    /// Target accuracy on the volatility.
    pub accuracy: Real,
    /// Upper end of the search bracket.
    pub max_vol: Volatility,
    /// Lower end of the search bracket.
    pub min_vol: Volatility,
}

impl Default for ImpliedVolSettings {
    fn default() -> Self {
        Self {
            accuracy: 1e-8,
            max_vol: 5.0,
            min_vol: 1e-6,
        }
    }
}

/// Implied power volatility solver over a [`KirkEngine`].
#[derive(Debug, Clone, Default)]
pub struct KirkImpliedVolatility {
    engine: KirkEngine,
    settings: ImpliedVolSettings,
}

impl KirkImpliedVolatility {
    /// Create a solver.
    pub fn new(engine: KirkEngine, settings: ImpliedVolSettings) -> Self {
        Self { engine, settings }
    }

    /// The solver settings.
    pub fn settings(&self) -> &ImpliedVolSettings {
        &self.settings
    }

    /// Solve for `vol_power` such that the Kirk price equals `target`.
    ///
    /// # Errors
    /// * `InvalidArgument` if `ctx` is not scalar.
    /// * `Domain` if the effective denominator is not positive.
    /// * `Precondition` if `target` is not bracketed by the settings.
    /// * `Runtime` if the solver does not converge.
    pub fn solve(&self, ctx: &PricingContext, target: Real, method: ImpliedVolMethod) -> Result<Volatility> {
        if !ctx.is_scalar() {
            return Err(Error::InvalidArgument(format!(
                "implied volatility needs a scalar context, got {} entries",
                ctx.len()
            )));
        }
        // validates the denominator
        self.engine.price(ctx)?;

        let e = ctx.entry(0);
        let eff = e.effective();
        let denom = eff.denominator();
        let w = eff.h * eff.f_gas / denom;
        let rho = self.engine.rho(&e);
        let eps = self.engine.settings().eps_sigma;
        let (t, r) = (e.settle_t, e.r);

        let objective = |vol: Real| {
            let sigma = blended_volatility(vol, e.vol_gas, rho, w);
            kirk_price(e.f_power, denom, sigma, t, r, eps) - target
        };

        let s = &self.settings;
        let vol = match method {
            ImpliedVolMethod::Brent => brent(objective, s.min_vol, s.max_vol, s.accuracy)?,
            ImpliedVolMethod::NewtonSafe => newton_safe(
                |vol| {
                    let sigma = blended_volatility(vol, e.vol_gas, rho, w);
                    let vega = kirk_vega(e.f_power, denom, sigma, t, r, eps);
                    let dsigma = if sigma > 0.0 {
                        (vol - w * rho * e.vol_gas) / sigma
                    } else {
                        0.0
                    };
                    (objective(vol), vega * dsigma)
                },
                s.min_vol,
                s.max_vol,
                s.accuracy,
            )?,
        };
        tracing::debug!(vol, target, ?method, "implied power volatility");
        Ok(vol)
    }
}

/// Sensitivity of the Kirk price to the blended volatility.
fn kirk_vega(f_power: Real, denom: Real, sigma: Volatility, t: Real, r: Real, eps_sigma: Real) -> Real {
    if sigma < eps_sigma {
        return 0.0;
    }
    let sqrt_t = t.sqrt();
    let d1 = ((f_power / denom).ln() + 0.5 * sigma * sigma * t) / (sigma * sqrt_t);
    (-r * t).exp() * f_power * normal_pdf(d1) * sqrt_t
}

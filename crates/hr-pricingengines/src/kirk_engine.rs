//! Kirk's closed-form approximation for heat rate calls.
//!
//! The spread `P − h·G − K` is priced as a single-asset call on power with
//! strike `h·G + K`, treating that strike as lognormal with the blended
//! volatility
//!
//! ```text
//! denom = h_eff·F_gas_eff + K_eff
//! w     = h_eff·F_gas_eff / denom
//! σ²    = σ_p² − 2·w·ρ·σ_p·σ_g + w²·σ_g²
//! ```
//!
//! and the Black formula
//!
//! $$C = e^{-rT}\left(F_p N(d_1) - \text{denom}\,N(d_2)\right)$$
//!
//! where $d_{1,2} = \frac{\ln(F_p/\text{denom}) \pm \sigma^2 T/2}{\sigma\sqrt{T}}$.

use crate::pricer::Pricer;
use hr_core::{Batch, Error, Rate, Real, Result, Time, Volatility};
use hr_instruments::{ContextEntry, PricingContext};
use hr_math::distributions::normal_cdf;

/// Kirk engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KirkSettings {
    /// Clamp the correlation to `[-1, 1]` before blending volatilities.
    pub clip_rho: bool,
    /// Below this blended volatility the discounted forward intrinsic value
    /// is returned.
    pub eps_sigma: Real,
}

impl Default for KirkSettings {
    fn default() -> Self {
        Self {
            clip_rho: false,
            eps_sigma: 1e-12,
        }
    }
}

impl KirkSettings {
    /// Switch correlation clipping on or off.
    pub fn with_clip_rho(mut self, clip_rho: bool) -> Self {
        self.clip_rho = clip_rho;
        self
    }

    /// Set the near-zero volatility threshold.
    pub fn with_eps_sigma(mut self, eps_sigma: Real) -> Self {
        self.eps_sigma = eps_sigma;
        self
    }
}

/// Closed-form heat rate call engine.
#[derive(Debug, Clone, Default)]
pub struct KirkEngine {
    settings: KirkSettings,
}

impl KirkEngine {
    /// Create an engine with the given settings.
    pub fn new(settings: KirkSettings) -> Self {
        Self { settings }
    }

    /// The engine settings.
    pub fn settings(&self) -> &KirkSettings {
        &self.settings
    }

    /// Blended volatility `σ` of every entry.
    ///
    /// # Errors
    /// `Error::Domain` if any effective denominator is not positive.
    pub fn effective_volatility(&self, ctx: &PricingContext) -> Result<Batch> {
        let inputs = self.prepare(ctx)?;
        Batch::from_shape(ctx.shape(), inputs.iter().map(|k| k.sigma).collect())
    }

    pub(crate) fn rho(&self, e: &ContextEntry) -> Real {
        if self.settings.clip_rho {
            e.rho.clamp(-1.0, 1.0)
        } else {
            e.rho
        }
    }

    /// Reduce every entry to Black inputs, rejecting bad denominators.
    fn prepare(&self, ctx: &PricingContext) -> Result<Vec<KirkInputs>> {
        let entries: Vec<ContextEntry> = ctx.entries().collect();
        let denoms: Vec<Real> = entries.iter().map(|e| e.effective().denominator()).collect();

        let bad: Vec<usize> = denoms
            .iter()
            .enumerate()
            .filter(|&(_, &d)| !(d > 0.0))
            .map(|(i, _)| i)
            .collect();
        if !bad.is_empty() {
            let message = if ctx.is_scalar() {
                format!("invalid denominator: h*F_gas+K = {:.6} (must be > 0)", denoms[0])
            } else {
                format!("invalid denominator at indices {bad:?} (must be > 0)")
            };
            return Err(Error::domain(message, bad));
        }

        Ok(entries
            .iter()
            .zip(denoms)
            .map(|(e, denom)| {
                let eff = e.effective();
                let w = eff.h * eff.f_gas / denom;
                let sigma = blended_volatility(e.vol_power, e.vol_gas, self.rho(e), w);
                KirkInputs {
                    f_power: e.f_power,
                    denom,
                    sigma,
                    t: e.settle_t,
                    r: e.r,
                }
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy)]
struct KirkInputs {
    f_power: Real,
    denom: Real,
    sigma: Volatility,
    t: Time,
    r: Rate,
}

/// Kirk's blended volatility for strike weight `w`.
#[inline]
pub fn blended_volatility(vol_power: Volatility, vol_gas: Volatility, rho: Real, w: Real) -> Volatility {
    (vol_power * vol_power - 2.0 * w * rho * vol_power * vol_gas + w * w * vol_gas * vol_gas).sqrt()
}

/// Discounted Kirk price of one entry.
///
/// Below `eps_sigma` the discounted forward intrinsic value
/// `exp(−rT)·(F_p − denom)` is returned; it is not floored at zero.
pub fn kirk_price(
    f_power: Real,
    denom: Real,
    sigma: Volatility,
    t: Time,
    r: Rate,
    eps_sigma: Real,
) -> Real {
    let discount = (-r * t).exp();
    if sigma < eps_sigma {
        tracing::trace!(sigma, "Kirk near-zero volatility, using forward intrinsic");
        return discount * (f_power - denom);
    }
    let std_dev = sigma * t.sqrt();
    let d1 = ((f_power / denom).ln() + 0.5 * sigma * sigma * t) / std_dev;
    let d2 = d1 - std_dev;
    discount * (f_power * normal_cdf(d1) - denom * normal_cdf(d2))
}

impl Pricer for KirkEngine {
    fn price(&self, ctx: &PricingContext) -> Result<Batch> {
        let eps = self.settings.eps_sigma;
        let prices = self
            .prepare(ctx)?
            .iter()
            .map(|k| kirk_price(k.f_power, k.denom, k.sigma, k.t, k.r, eps))
            .collect();
        Batch::from_shape(ctx.shape(), prices)
    }

    fn name(&self) -> &str {
        "kirk"
    }
}

//! Cost-adjusted contract parameters shared by every pricer.

use crate::context::ContextEntry;
use hr_core::Real;

/// Heat rate, gas price and strike after folding in the contract's costs.
///
/// ```text
/// h_eff     = h + start_fuel / quantity
/// F_gas_eff = F_gas + tp_cost + gas_adder
/// K_eff     = K + vom + F_ghg · c_allowance
/// ```
///
/// The closed-form and simulation pricers both read these values, so the
/// two agree on what is being priced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveParameters {
    /// Effective heat rate.
    pub h: Real,
    /// Effective gas forward.
    pub f_gas: Real,
    /// Effective strike.
    pub strike: Real,
    /// Additive gas cost, applied to simulated gas prices.
    pub gas_shift: Real,
}

impl EffectiveParameters {
    /// Derive the effective parameters of one context entry.
    pub fn new(e: &ContextEntry) -> Self {
        let gas_shift = e.tp_cost + e.gas_adder;
        Self {
            h: e.h + e.start_fuel / e.quantity,
            f_gas: e.f_gas + gas_shift,
            strike: e.strike + e.vom + e.f_ghg * e.c_allowance,
            gas_shift,
        }
    }

    /// `h_eff · F_gas_eff + K_eff`, the strike of the single-asset option.
    #[inline]
    pub fn denominator(&self) -> Real {
        self.h * self.f_gas + self.strike
    }

    /// Spread payoff before flooring, for terminal power and gas prices.
    #[inline]
    pub fn spread(&self, power: Real, gas: Real) -> Real {
        power - self.h * (gas + self.gas_shift) - self.strike
    }

    /// Expected spread under the forward measure: `F_power − denominator`.
    #[inline]
    pub fn expected_spread(&self, f_power: Real) -> Real {
        f_power - self.denominator()
    }
}

//! Heat rate call contract terms.
//!
//! A heat rate call pays `max(P_T − h·G_T − K, 0)` per unit of notional at
//! settlement, with the heat rate, gas price and strike adjusted by the
//! operating costs carried on the contract (see
//! [`EffectiveParameters`](crate::EffectiveParameters)).

use hr_core::{Batch, Real};

/// Contract terms of a heat rate call (or a strip of them).
///
/// Every field is a [`Batch`]: a scalar for a single contract, or one value
/// per contract for a strip. Cost adjustments default to zero and the
/// notional to one.
///
/// Strike bumps are recorded separately from the quoted strike so a bump
/// followed by the opposite bump restores the strike exactly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatRateCallSpec {
    /// Heat rate multiplier `h`.
    pub h: Batch,
    /// Quoted strike `K`.
    pub strike: Batch,
    /// Time to settlement in years (> 0).
    pub settle_t: Batch,
    /// Variable operating and maintenance cost.
    pub vom: Batch,
    /// Notional quantity, e.g. MWh (> 0).
    pub quantity: Batch,
    /// Gas price adder (slippage on cost).
    pub gas_adder: Batch,
    /// Start cost of the plant. Carried for reporting; not priced.
    pub start_cost: Batch,
    /// Carbon allowance per unit of generation.
    pub c_allowance: Batch,
    /// Gas transportation cost.
    pub tp_cost: Batch,
    /// Fuel burnt at start-up.
    pub start_fuel: Batch,
    #[cfg_attr(feature = "serde", serde(default))]
    strike_shift: Real,
}

impl HeatRateCallSpec {
    /// Create a contract with the required terms; every cost adjustment is
    /// zero and the quantity is one.
    pub fn new(
        h: impl Into<Batch>,
        strike: impl Into<Batch>,
        settle_t: impl Into<Batch>,
        vom: impl Into<Batch>,
    ) -> Self {
        Self {
            h: h.into(),
            strike: strike.into(),
            settle_t: settle_t.into(),
            vom: vom.into(),
            quantity: Batch::Scalar(1.0),
            gas_adder: Batch::Scalar(0.0),
            start_cost: Batch::Scalar(0.0),
            c_allowance: Batch::Scalar(0.0),
            tp_cost: Batch::Scalar(0.0),
            start_fuel: Batch::Scalar(0.0),
            strike_shift: 0.0,
        }
    }

    /// Set the notional quantity.
    pub fn with_quantity(mut self, quantity: impl Into<Batch>) -> Self {
        self.quantity = quantity.into();
        self
    }

    /// Set the gas adder.
    pub fn with_gas_adder(mut self, gas_adder: impl Into<Batch>) -> Self {
        self.gas_adder = gas_adder.into();
        self
    }

    /// Set the start cost.
    pub fn with_start_cost(mut self, start_cost: impl Into<Batch>) -> Self {
        self.start_cost = start_cost.into();
        self
    }

    /// Set the carbon allowance.
    pub fn with_c_allowance(mut self, c_allowance: impl Into<Batch>) -> Self {
        self.c_allowance = c_allowance.into();
        self
    }

    /// Set the gas transportation cost.
    pub fn with_tp_cost(mut self, tp_cost: impl Into<Batch>) -> Self {
        self.tp_cost = tp_cost.into();
        self
    }

    /// Set the start-up fuel.
    pub fn with_start_fuel(mut self, start_fuel: impl Into<Batch>) -> Self {
        self.start_fuel = start_fuel.into();
        self
    }

    /// Replace the quoted strike, discarding any accumulated bump.
    pub fn with_strike(mut self, strike: impl Into<Batch>) -> Self {
        self.strike = strike.into();
        self.strike_shift = 0.0;
        self
    }

    /// A copy whose strike is shifted by `dk` on every entry.
    pub fn bumped_strike(&self, dk: Real) -> Self {
        let mut bumped = self.clone();
        bumped.strike_shift += dk;
        bumped
    }

    /// Total bump applied on top of the quoted strike.
    pub fn strike_shift(&self) -> Real {
        self.strike_shift
    }

    /// Strike of entry `i`, including any bump.
    #[inline]
    pub fn strike_at(&self, i: usize) -> Real {
        self.strike.at(i) + self.strike_shift
    }

    /// Strikes including any bump, in the contract's scalar/vector form.
    pub fn effective_strike(&self) -> Batch {
        self.strike.shift(self.strike_shift)
    }

    /// `(name, batch)` for every field, in declaration order.
    pub fn fields(&self) -> [(&'static str, &Batch); 10] {
        [
            ("contract.h", &self.h),
            ("contract.strike", &self.strike),
            ("contract.settle_t", &self.settle_t),
            ("contract.vom", &self.vom),
            ("contract.quantity", &self.quantity),
            ("contract.gas_adder", &self.gas_adder),
            ("contract.start_cost", &self.start_cost),
            ("contract.c_allowance", &self.c_allowance),
            ("contract.tp_cost", &self.tp_cost),
            ("contract.start_fuel", &self.start_fuel),
        ]
    }
}

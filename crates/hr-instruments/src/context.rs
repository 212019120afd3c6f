//! The pricing context: one contract (or strip) plus its market data.
//!
//! [`PricingContext::new`] is the single validation gate of the library.
//! It checks that every vector-valued field shares one length, and that
//! settlement times and quantities are positive. Pricers rely on a
//! constructed context and do not re-validate.
//!
//! Contexts are immutable. Variants (such as the strike bumps used for
//! exercise probabilities) are new contexts built by copy-with-override.

use crate::contract::HeatRateCallSpec;
use crate::effective::EffectiveParameters;
use crate::market::{Corr, Df, Forwards, Vols};
use hr_core::{Batch, Diagnostic, DiscountFactor, Error, Real, Result, Shape, Time};

/// Contract terms and market data for one pricing call.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingContext {
    contract: HeatRateCallSpec,
    forwards: Forwards,
    vols: Vols,
    corr: Corr,
    df: Df,
    shape: Shape,
}

impl PricingContext {
    /// Assemble and validate a context.
    ///
    /// # Errors
    /// * [`Error::InconsistentLengths`] if vector fields disagree in length;
    ///   the error lists every vector field with its length.
    /// * [`Error::Domain`] if any settlement time or quantity is not
    ///   positive; the error lists every offending index.
    pub fn new(
        contract: HeatRateCallSpec,
        forwards: Forwards,
        vols: Vols,
        corr: Corr,
        df: Df,
    ) -> Result<Self> {
        let shape = resolve_shape(&contract, &forwards, &vols, &corr, &df)?;
        check_positive("contract.settle_t", &contract.settle_t, shape)?;
        check_positive("contract.quantity", &contract.quantity, shape)?;
        tracing::trace!(?shape, "pricing context validated");
        Ok(Self {
            contract,
            forwards,
            vols,
            corr,
            df,
            shape,
        })
    }

    /// Contract terms.
    pub fn contract(&self) -> &HeatRateCallSpec {
        &self.contract
    }

    /// Forward prices.
    pub fn forwards(&self) -> &Forwards {
        &self.forwards
    }

    /// Volatilities.
    pub fn vols(&self) -> &Vols {
        &self.vols
    }

    /// Correlation.
    pub fn corr(&self) -> &Corr {
        &self.corr
    }

    /// Discount rate.
    pub fn df(&self) -> &Df {
        &self.df
    }

    /// Scalar, or vector of the common length.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of entries to price (1 for a scalar context).
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    /// `true` for a zero-length strip.
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// `true` when every field is a scalar.
    pub fn is_scalar(&self) -> bool {
        self.shape.is_scalar()
    }

    /// Time to settlement, read-only alias of `contract.settle_t`.
    pub fn t(&self) -> &Batch {
        &self.contract.settle_t
    }

    /// Advisories raised while building the market data.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.corr
            .advisory()
            .map(|a| Diagnostic::CorrelationOutOfRange(a.clone()))
            .into_iter()
            .collect()
    }

    /// All inputs of entry `i` as scalars.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    pub fn entry(&self, i: usize) -> ContextEntry {
        assert!(i < self.len(), "entry {i} out of range for {} entries", self.len());
        let c = &self.contract;
        ContextEntry {
            h: c.h.at(i),
            strike: c.strike_at(i),
            settle_t: c.settle_t.at(i),
            vom: c.vom.at(i),
            quantity: c.quantity.at(i),
            gas_adder: c.gas_adder.at(i),
            start_cost: c.start_cost.at(i),
            c_allowance: c.c_allowance.at(i),
            tp_cost: c.tp_cost.at(i),
            start_fuel: c.start_fuel.at(i),
            f_power: self.forwards.f_power.at(i),
            f_gas: self.forwards.f_gas.at(i),
            f_ghg: self.forwards.f_ghg.at(i),
            vol_power: self.vols.vol_power.at(i),
            vol_gas: self.vols.vol_gas.at(i),
            rho: self.corr.rho_pg().at(i),
            r: self.df.r.at(i),
        }
    }

    /// Iterate over every entry in order.
    pub fn entries(&self) -> impl Iterator<Item = ContextEntry> + '_ {
        (0..self.len()).map(|i| self.entry(i))
    }

    // ── copy-with-override ───────────────────────────────────────────────────

    /// A new context with different contract terms.
    pub fn with_contract(&self, contract: HeatRateCallSpec) -> Result<Self> {
        Self::new(
            contract,
            self.forwards.clone(),
            self.vols.clone(),
            self.corr.clone(),
            self.df.clone(),
        )
    }

    /// A new context with different forwards.
    pub fn with_forwards(&self, forwards: Forwards) -> Result<Self> {
        Self::new(
            self.contract.clone(),
            forwards,
            self.vols.clone(),
            self.corr.clone(),
            self.df.clone(),
        )
    }

    /// A new context with different volatilities.
    pub fn with_vols(&self, vols: Vols) -> Result<Self> {
        Self::new(
            self.contract.clone(),
            self.forwards.clone(),
            vols,
            self.corr.clone(),
            self.df.clone(),
        )
    }

    /// A new context with a different correlation.
    pub fn with_corr(&self, corr: Corr) -> Result<Self> {
        Self::new(
            self.contract.clone(),
            self.forwards.clone(),
            self.vols.clone(),
            corr,
            self.df.clone(),
        )
    }

    /// A new context with a different discount rate.
    pub fn with_df(&self, df: Df) -> Result<Self> {
        Self::new(
            self.contract.clone(),
            self.forwards.clone(),
            self.vols.clone(),
            self.corr.clone(),
            df,
        )
    }

    /// A new context with a different quoted strike.
    pub fn with_strike(&self, strike: impl Into<Batch>) -> Result<Self> {
        self.with_contract(self.contract.clone().with_strike(strike))
    }

    /// A new context whose strike is shifted by `dk` on every entry.
    ///
    /// Only the strike changes, so the shape is unchanged and no validation
    /// can fail. Bumping by `dk` then by `-dk` restores the strike exactly.
    pub fn bump_strike(&self, dk: Real) -> Self {
        Self {
            contract: self.contract.bumped_strike(dk),
            ..self.clone()
        }
    }
}

/// Every input of one context entry, as plain scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextEntry {
    /// Heat rate.
    pub h: Real,
    /// Strike, including any bump.
    pub strike: Real,
    /// Time to settlement.
    pub settle_t: Time,
    /// VOM cost.
    pub vom: Real,
    /// Notional.
    pub quantity: Real,
    /// Gas adder.
    pub gas_adder: Real,
    /// Start cost (not priced).
    pub start_cost: Real,
    /// Carbon allowance.
    pub c_allowance: Real,
    /// Gas transportation cost.
    pub tp_cost: Real,
    /// Start-up fuel.
    pub start_fuel: Real,
    /// Power forward.
    pub f_power: Real,
    /// Gas forward.
    pub f_gas: Real,
    /// GHG forward.
    pub f_ghg: Real,
    /// Power volatility.
    pub vol_power: Real,
    /// Gas volatility.
    pub vol_gas: Real,
    /// Power/gas correlation, as given.
    pub rho: Real,
    /// Discount rate.
    pub r: Real,
}

impl ContextEntry {
    /// Cost-adjusted heat rate, gas price and strike.
    pub fn effective(&self) -> EffectiveParameters {
        EffectiveParameters::new(self)
    }

    /// `exp(−r·T)`.
    pub fn discount_factor(&self) -> DiscountFactor {
        (-self.r * self.settle_t).exp()
    }
}

fn resolve_shape(
    contract: &HeatRateCallSpec,
    forwards: &Forwards,
    vols: &Vols,
    corr: &Corr,
    df: &Df,
) -> Result<Shape> {
    let mut lengths: Vec<(String, usize)> = Vec::new();
    let named = contract
        .fields()
        .into_iter()
        .chain(forwards.fields())
        .chain(vols.fields())
        .chain([("corr.rho_pg", corr.rho_pg()), ("df.r", &df.r)]);
    for (name, batch) in named {
        if let Some(n) = batch.len() {
            lengths.push((name.to_string(), n));
        }
    }

    match lengths.first() {
        None => Ok(Shape::Scalar),
        Some(&(_, n)) if lengths.iter().all(|(_, m)| *m == n) => Ok(Shape::Vector(n)),
        Some(_) => Err(Error::InconsistentLengths { fields: lengths }),
    }
}

fn check_positive(name: &str, batch: &Batch, shape: Shape) -> Result<()> {
    let bad: Vec<usize> = (0..shape.len())
        .filter(|&i| !(batch.at(i) > 0.0))
        .collect();
    if bad.is_empty() {
        return Ok(());
    }
    let message = match batch {
        Batch::Scalar(x) => format!("{name} = {x} (must be > 0)"),
        Batch::Vector(_) => format!("{name} must be > 0, offending indices {bad:?}"),
    };
    Err(Error::domain(message, bad))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_ctx() -> PricingContext {
        PricingContext::new(
            HeatRateCallSpec::new(7.0, 5.0, 1.0, 0.0),
            Forwards::new(60.0, 7.0),
            Vols::new(0.3, 0.25),
            Corr::new(0.6),
            Df::new(0.05),
        )
        .unwrap()
    }

    #[test]
    fn all_scalar_context_is_scalar() {
        let ctx = scalar_ctx();
        assert!(ctx.is_scalar());
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.t(), &Batch::Scalar(1.0));
    }

    #[test]
    fn mixed_scalar_and_vector_fields_broadcast() {
        let ctx = PricingContext::new(
            HeatRateCallSpec::new(7.0, [0.0, 1.0, 10.0], 1.0, 0.0),
            Forwards::new(50.0, [7.0, 7.0, 7.0]),
            Vols::new(0.2, 0.3),
            Corr::new(0.5),
            Df::new(0.05),
        )
        .unwrap();
        assert_eq!(ctx.shape(), Shape::Vector(3));
        let e = ctx.entry(2);
        assert_eq!(e.strike, 10.0);
        assert_eq!(e.f_power, 50.0);
        assert_eq!(e.f_gas, 7.0);
    }

    #[test]
    fn inconsistent_lengths_name_every_vector_field() {
        let err = PricingContext::new(
            HeatRateCallSpec::new(7.0, [1.0, 2.0, 3.0], 1.0, 0.0),
            Forwards::new([50.0, 51.0], 7.0),
            Vols::new(0.2, 0.3),
            Corr::new([0.5, 0.5, 0.5]),
            Df::new(0.05),
        )
        .unwrap_err();
        match err {
            Error::InconsistentLengths { fields } => {
                assert_eq!(
                    fields,
                    vec![
                        ("contract.strike".to_string(), 3),
                        ("forwards.f_power".to_string(), 2),
                        ("corr.rho_pg".to_string(), 3),
                    ]
                );
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_positive_settlement_is_rejected() {
        let err = PricingContext::new(
            HeatRateCallSpec::new(7.0, 5.0, [1.0, 0.0, -1.0], 0.0),
            Forwards::new(60.0, 7.0),
            Vols::new(0.3, 0.25),
            Corr::new(0.6),
            Df::new(0.05),
        )
        .unwrap_err();
        match err {
            Error::Domain { indices, .. } => assert_eq!(indices, vec![1, 2]),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn bump_round_trip_restores_strike() {
        let ctx = scalar_ctx();
        let back = ctx.bump_strike(5e-6).bump_strike(-5e-6);
        assert_eq!(back.entry(0).strike, ctx.entry(0).strike);
        assert_eq!(back, ctx);
    }

    #[test]
    fn bump_does_not_touch_other_fields() {
        let ctx = scalar_ctx();
        let up = ctx.bump_strike(1.0);
        assert_eq!(up.entry(0).strike, 6.0);
        assert_eq!(up.forwards(), ctx.forwards());
        assert_eq!(ctx.entry(0).strike, 5.0);
    }

    #[test]
    fn with_strike_revalidates() {
        let ctx = PricingContext::new(
            HeatRateCallSpec::new(7.0, [1.0, 2.0], 1.0, 0.0),
            Forwards::new(50.0, 7.0),
            Vols::new(0.2, 0.3),
            Corr::new(0.5),
            Df::new(0.05),
        )
        .unwrap();
        assert!(ctx.with_strike([1.0, 2.0, 3.0]).is_err());
        assert!(ctx.with_strike([4.0, 5.0]).is_ok());
    }

    #[test]
    fn diagnostics_surface_correlation_advisory() {
        let ctx = scalar_ctx().with_corr(Corr::new(-0.3)).unwrap();
        let d = ctx.diagnostics();
        assert_eq!(d.len(), 1);
        assert!(scalar_ctx().diagnostics().is_empty());
    }
}

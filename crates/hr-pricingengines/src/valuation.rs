//! Valuation records: priced contracts ready to be stored.
//!
//! [`value_contracts`] prices a strip once and turns it into one
//! [`ValuationRecord`] per contract. Storage is left to a
//! [`ValuationSink`]; [`MemorySink`] keeps records in memory.

use std::collections::BTreeMap;

use crate::exercise_probability::ExerciseProbability;
use crate::pricer::Pricer;
use chrono::{DateTime, Utc};
use hr_core::{Error, Price, Real, Result, Time};
use hr_instruments::PricingContext;

/// Identifier of a stored contract.
pub type ContractId = u64;

/// One priced contract under one market scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationRecord {
    /// Contract identifier.
    pub contract_id: ContractId,
    /// Market scenario name.
    pub scenario: String,
    /// Time to settlement of the contract.
    pub maturity: Time,
    /// Discounted price per unit of notional.
    pub price_per_unit: Price,
    /// `price_per_unit × quantity`.
    pub total_value: Price,
    /// Exercise probability, when requested.
    pub exercise_probability: Option<Real>,
    /// [`Pricer::name`] of the pricer used.
    pub pricer_name: String,
    /// When the strip was priced.
    pub priced_at: DateTime<Utc>,
}

/// Price every entry of `ctx` and build one record per contract.
///
/// `ids[i]` identifies entry `i`. All records share one timestamp.
///
/// # Errors
/// `InconsistentLengths` if `ids` does not match the context length, or any
/// error of the pricer.
pub fn value_contracts<P: Pricer>(
    pricer: &P,
    ids: &[ContractId],
    ctx: &PricingContext,
    scenario: &str,
    with_exercise_probability: bool,
) -> Result<Vec<ValuationRecord>> {
    if ids.len() != ctx.len() {
        return Err(Error::InconsistentLengths {
            fields: vec![
                ("contract_ids".to_string(), ids.len()),
                ("context".to_string(), ctx.len()),
            ],
        });
    }

    let n = ctx.len();
    let prices = pricer.price(ctx)?.to_vec(n);
    let probabilities = if with_exercise_probability {
        let calc = ExerciseProbability::with_default_bump(pricer);
        Some(calc.calculate(ctx, false)?.to_vec(n))
    } else {
        None
    };

    let priced_at = Utc::now();
    let records: Vec<ValuationRecord> = ids
        .iter()
        .enumerate()
        .map(|(i, &contract_id)| {
            let e = ctx.entry(i);
            ValuationRecord {
                contract_id,
                scenario: scenario.to_string(),
                maturity: e.settle_t,
                price_per_unit: prices[i],
                total_value: prices[i] * e.quantity,
                exercise_probability: probabilities.as_ref().map(|p| p[i]),
                pricer_name: pricer.name().to_string(),
                priced_at,
            }
        })
        .collect();
    tracing::debug!(scenario, count = records.len(), pricer = pricer.name(), "valued contracts");
    Ok(records)
}

/// Somewhere to put valuation records.
pub trait ValuationSink {
    /// Store a set of records.
    fn store(&mut self, records: &[ValuationRecord]) -> Result<()>;
}

/// In-memory [`ValuationSink`].
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<ValuationRecord>,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything stored so far, in insertion order.
    pub fn records(&self) -> &[ValuationRecord] {
        &self.records
    }

    /// Records of one contract.
    pub fn for_contract(&self, id: ContractId) -> impl Iterator<Item = &ValuationRecord> + '_ {
        self.records.iter().filter(move |r| r.contract_id == id)
    }
}

impl ValuationSink for MemorySink {
    fn store(&mut self, records: &[ValuationRecord]) -> Result<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }
}

/// Aggregate figures of the records of one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioSummary {
    /// Number of records.
    pub count: usize,
    /// Average price per unit.
    pub mean_price: Real,
    /// Lowest price per unit.
    pub min_price: Real,
    /// Highest price per unit.
    pub max_price: Real,
    /// Sum of total values.
    pub total_value: Price,
}

/// Per-scenario summary of `records`, keyed by scenario name.
pub fn summarize(records: &[ValuationRecord]) -> BTreeMap<String, ScenarioSummary> {
    let mut out: BTreeMap<String, ScenarioSummary> = BTreeMap::new();
    for r in records {
        let s = out.entry(r.scenario.clone()).or_insert(ScenarioSummary {
            count: 0,
            mean_price: 0.0,
            min_price: Real::INFINITY,
            max_price: Real::NEG_INFINITY,
            total_value: 0.0,
        });
        s.count += 1;
        s.mean_price += (r.price_per_unit - s.mean_price) / s.count as Real;
        s.min_price = s.min_price.min(r.price_per_unit);
        s.max_price = s.max_price.max(r.price_per_unit);
        s.total_value += r.total_value;
    }
    out
}

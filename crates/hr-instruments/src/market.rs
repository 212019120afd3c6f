//! Market inputs: forwards, volatilities, correlation, and discounting.

use hr_core::{Batch, CorrelationAdvisory, Diagnostic, Real};

/// Forward prices for power, gas, and greenhouse-gas allowances.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forwards {
    /// Power forward price.
    pub f_power: Batch,
    /// Gas forward price.
    pub f_gas: Batch,
    /// Greenhouse-gas allowance forward price (default 0).
    pub f_ghg: Batch,
}

impl Forwards {
    /// Power and gas forwards with a zero GHG price.
    pub fn new(f_power: impl Into<Batch>, f_gas: impl Into<Batch>) -> Self {
        Self {
            f_power: f_power.into(),
            f_gas: f_gas.into(),
            f_ghg: Batch::Scalar(0.0),
        }
    }

    /// Set the GHG allowance forward.
    pub fn with_ghg(mut self, f_ghg: impl Into<Batch>) -> Self {
        self.f_ghg = f_ghg.into();
        self
    }

    pub(crate) fn fields(&self) -> [(&'static str, &Batch); 3] {
        [
            ("forwards.f_power", &self.f_power),
            ("forwards.f_gas", &self.f_gas),
            ("forwards.f_ghg", &self.f_ghg),
        ]
    }
}

/// Lognormal volatilities of the power and gas forwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vols {
    /// Power forward volatility.
    pub vol_power: Batch,
    /// Gas forward volatility.
    pub vol_gas: Batch,
}

impl Vols {
    /// Create a volatility pair.
    pub fn new(vol_power: impl Into<Batch>, vol_gas: impl Into<Batch>) -> Self {
        Self {
            vol_power: vol_power.into(),
            vol_gas: vol_gas.into(),
        }
    }

    pub(crate) fn fields(&self) -> [(&'static str, &Batch); 2] {
        [("vols.vol_power", &self.vol_power), ("vols.vol_gas", &self.vol_gas)]
    }
}

/// Power/gas correlation.
///
/// Values outside `[0, 1]` are accepted as given. Construction records a
/// [`CorrelationAdvisory`] for them and emits it as a `tracing` warning;
/// nothing is clamped here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "CorrData", into = "CorrData")
)]
pub struct Corr {
    rho_pg: Batch,
    advisory: Option<CorrelationAdvisory>,
}

impl Corr {
    /// Create a correlation, checking it against `[0, 1]`.
    pub fn new(rho_pg: impl Into<Batch>) -> Self {
        let rho_pg = rho_pg.into();
        let advisory = range_advisory(&rho_pg);
        if let Some(a) = &advisory {
            Diagnostic::CorrelationOutOfRange(a.clone()).emit();
        }
        Self { rho_pg, advisory }
    }

    /// The correlation as given.
    pub fn rho_pg(&self) -> &Batch {
        &self.rho_pg
    }

    /// The range advisory raised at construction, if any.
    pub fn advisory(&self) -> Option<&CorrelationAdvisory> {
        self.advisory.as_ref()
    }
}

fn range_advisory(rho: &Batch) -> Option<CorrelationAdvisory> {
    let outside = |x: Real| !(0.0..=1.0).contains(&x);
    match rho {
        Batch::Scalar(x) => outside(*x).then(|| CorrelationAdvisory {
            indices: vec![0],
            values: vec![*x],
            scalar: true,
        }),
        Batch::Vector(v) => {
            let (indices, values): (Vec<usize>, Vec<Real>) = v
                .iter()
                .enumerate()
                .filter(|&(_, &x)| outside(x))
                .map(|(i, &x)| (i, x))
                .unzip();
            (!indices.is_empty()).then_some(CorrelationAdvisory {
                indices,
                values,
                scalar: false,
            })
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct CorrData {
    rho_pg: Batch,
}

#[cfg(feature = "serde")]
impl From<CorrData> for Corr {
    fn from(d: CorrData) -> Self {
        Corr::new(d.rho_pg)
    }
}

#[cfg(feature = "serde")]
impl From<Corr> for CorrData {
    fn from(c: Corr) -> Self {
        CorrData { rho_pg: c.rho_pg }
    }
}

/// Continuously-compounded discount rate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Df {
    /// The rate `r`; the discount factor to `T` is `exp(−r·T)`.
    pub r: Batch,
}

impl Df {
    /// Create a discount rate.
    pub fn new(r: impl Into<Batch>) -> Self {
        Self { r: r.into() }
    }
}

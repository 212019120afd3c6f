//! Monte Carlo engine for heat rate calls.
//!
//! Power and gas forwards follow driftless correlated lognormal dynamics
//! under the forward measure. Each entry of the context is simulated to
//! settlement, the terminal payoff `max(P_T − h_eff·(G_T + gas costs) −
//! K_eff, 0)` is averaged, and the result is discounted with `exp(−r·T)`.
//!
//! The unfloored spread `C` has the known expectation
//! `F_power − h_eff·F_gas_eff − K_eff`, so it serves as a control variate:
//! the estimator is `mean(X) − b*·(mean(C) − E[C])` with
//! `b* = Cov(X, C) / Var(C)` estimated from the same sample.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::pricer::Pricer;
use hr_core::{ensure, Batch, Real, Result};
use hr_instruments::{ContextEntry, PricingContext};
use hr_math::{entropy_seed, PairedStatistics};
use hr_methods::{PathGenSettings, TerminalDraws, TimeGrid, TwoFactorPathGenerator, DEFAULT_BATCH_SIZE};
use hr_processes::{LognormalForwardProcess, State2};

/// Monte Carlo engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McSettings {
    /// Stored paths per entry.
    pub n_paths: usize,
    /// Time steps to settlement.
    pub n_steps: usize,
    /// Antithetic sampling.
    pub antithetic: bool,
    /// Base seed; `None` draws one from OS entropy on every `price` call.
    pub seed: Option<u64>,
    /// Use the terminal spread as a control variate.
    pub use_control_variate: bool,
    /// Maximum underlying draws per simulation batch.
    pub batch_size: usize,
}

impl Default for McSettings {
    fn default() -> Self {
        Self {
            n_paths: 200_000,
            n_steps: 365,
            antithetic: true,
            seed: Some(42),
            use_control_variate: true,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl McSettings {
    /// Set the number of paths.
    pub fn with_n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = n_paths;
        self
    }

    /// Set the number of time steps.
    pub fn with_n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    /// Switch antithetic sampling on or off.
    pub fn with_antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Set (or clear) the base seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Switch the control variate on or off.
    pub fn with_control_variate(mut self, use_control_variate: bool) -> Self {
        self.use_control_variate = use_control_variate;
        self
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    fn path_settings(&self) -> PathGenSettings {
        PathGenSettings {
            n_paths: self.n_paths,
            antithetic: self.antithetic,
            batch_size: self.batch_size,
        }
    }
}

/// Estimate for one context entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McEstimate {
    /// Discounted price per unit.
    pub price: Real,
    /// Discounted standard error of `price`.
    pub std_error: Real,
    /// Control coefficient `b*`, when the control variate was applied.
    pub control_beta: Option<Real>,
    /// Number of simulated paths.
    pub n_paths: usize,
}

/// Monte Carlo heat rate call engine.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    settings: McSettings,
    cancel: Option<Arc<AtomicBool>>,
}

impl MonteCarloEngine {
    /// Create an engine with the given settings.
    pub fn new(settings: McSettings) -> Self {
        Self {
            settings,
            cancel: None,
        }
    }

    /// Abort simulations once `flag` is set.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The engine settings.
    pub fn settings(&self) -> &McSettings {
        &self.settings
    }

    /// Price every entry and report the sampling statistics.
    ///
    /// All entries share one base seed.
    ///
    /// # Errors
    /// * `Precondition` if `n_paths` or `n_steps` is zero.
    /// * `Cancelled` if the cancellation flag was raised.
    pub fn price_with_statistics(&self, ctx: &PricingContext) -> Result<Vec<McEstimate>> {
        let s = &self.settings;
        ensure!(s.n_paths > 0, "Monte Carlo needs at least one path");
        ensure!(s.n_steps > 0, "Monte Carlo needs at least one time step");

        let seed = s.seed.unwrap_or_else(entropy_seed);
        ctx.entries().map(|e| self.price_entry(&e, seed)).collect()
    }

    fn simulate(&self, e: &ContextEntry, seed: u64) -> Result<TerminalDraws> {
        let grid = TimeGrid::new(e.settle_t, self.settings.n_steps)?;
        let process = LognormalForwardProcess::new(e.vol_power, e.vol_gas);
        let mut generator = TwoFactorPathGenerator::new(process, e.rho, self.settings.path_settings());
        if let Some(flag) = &self.cancel {
            generator = generator.with_cancellation(Arc::clone(flag));
        }
        generator.simulate_terminal(State2::new(e.f_power, e.f_gas), &grid, seed)
    }

    fn price_entry(&self, e: &ContextEntry, seed: u64) -> Result<McEstimate> {
        let draws = self.simulate(e, seed)?;
        let eff = e.effective();

        let mut stats = PairedStatistics::new();
        for (power, gas) in draws.iter() {
            let spread = eff.spread(power, gas);
            stats.add(spread.max(0.0), spread);
        }

        let n = stats.samples();
        let mean_payoff = stats.mean_x().unwrap_or(0.0);
        let var_payoff = stats.variance_x().unwrap_or(0.0);
        let var_control = stats.variance_y().unwrap_or(0.0);

        let (estimate, variance, control_beta) = if self.settings.use_control_variate && var_control > 0.0 {
            let cov = stats.covariance().unwrap_or(0.0);
            let beta = cov / var_control;
            let mean_control = stats.mean_y().unwrap_or(0.0);
            let expected_control = eff.expected_spread(e.f_power);
            let residual = (var_payoff - beta * cov).max(0.0);
            tracing::debug!(beta, mean_control, expected_control, "control variate applied");
            (mean_payoff - beta * (mean_control - expected_control), residual, Some(beta))
        } else {
            (mean_payoff, var_payoff, None)
        };

        let discount = e.discount_factor();
        Ok(McEstimate {
            price: discount * estimate,
            std_error: discount * (variance / n as Real).sqrt(),
            control_beta,
            n_paths: n,
        })
    }
}

impl Pricer for MonteCarloEngine {
    fn price(&self, ctx: &PricingContext) -> Result<Batch> {
        let prices = self
            .price_with_statistics(ctx)?
            .into_iter()
            .map(|est| est.price)
            .collect();
        Batch::from_shape(ctx.shape(), prices)
    }

    fn name(&self) -> &str {
        "monte_carlo"
    }
}

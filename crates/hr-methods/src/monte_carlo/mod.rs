//! Monte Carlo simulation of correlated power and gas forwards.
//!
//! # Overview
//!
//! * [`PathGenSettings`]: path count, antithetic switch and batch size
//! * [`TwoFactorPathGenerator`]: batched, seeded, cancellable simulation
//!   of terminal `(P_T, G_T)` pairs
//! * [`TerminalDraws`]: the simulated terminal prices
//!
//! # Batching and reproducibility
//!
//! Paths are produced in batches of at most `batch_size` underlying draws.
//! Batch `b` draws from its own MT19937-64 stream seeded with
//! [`stream_seed(seed, b)`](hr_math::stream_seed), so output depends only on
//! the seed and the settings, never on the order in which batches run. With
//! the `parallel` feature batches are simulated on the rayon pool and the
//! result is bit-identical to the sequential run.
//!
//! Within a batch of `m` underlying draws each path consumes `2·n_steps`
//! standard normals in path-major order `(step, factor)`. In antithetic
//! mode the batch yields the block `[Z; −Z]`: rows `0..m` use `Z`, rows
//! `m..2m` use `−Z`, and `m = min(batch_size, ⌈remaining/2⌉)`. The last
//! batch is trimmed so exactly `n_paths` rows are returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::time_grid::TimeGrid;
use hr_core::{ensure, Error, Real, Result};
use hr_math::{stream_seed, CorrelationFactor, InverseCumulativeNormalRng};
use hr_processes::{State2, StochasticProcess2D};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of underlying draws per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

// ─── Settings ─────────────────────────────────────────────────────────────────

/// How many paths to simulate and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathGenSettings {
    /// Number of stored paths (rows of the result).
    pub n_paths: usize,
    /// Mirror each batch of draws.
    pub antithetic: bool,
    /// Maximum underlying draws per batch.
    pub batch_size: usize,
}

impl Default for PathGenSettings {
    fn default() -> Self {
        Self {
            n_paths: 200_000,
            antithetic: true,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl PathGenSettings {
    /// Set the number of paths.
    pub fn with_n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = n_paths;
        self
    }

    /// Switch antithetic sampling on or off.
    pub fn with_antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// `(draws, rows)` for every batch, in order.
    ///
    /// `draws` is the number of independent normal vectors drawn, `rows` the
    /// number of paths kept from the batch.
    pub fn batch_plan(&self) -> Vec<(usize, usize)> {
        let mut plan = Vec::new();
        let mut remaining = self.n_paths;
        while remaining > 0 {
            let (draws, rows) = if self.antithetic {
                let m = self.batch_size.min(remaining.div_ceil(2));
                (m, remaining.min(2 * m))
            } else {
                let m = self.batch_size.min(remaining);
                (m, m)
            };
            plan.push((draws, rows));
            remaining -= rows;
        }
        plan
    }
}

// ─── TerminalDraws ────────────────────────────────────────────────────────────

/// Simulated terminal forward prices, one row per path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerminalDraws {
    power: Vec<Real>,
    gas: Vec<Real>,
}

impl TerminalDraws {
    fn with_capacity(n: usize) -> Self {
        Self {
            power: Vec::with_capacity(n),
            gas: Vec::with_capacity(n),
        }
    }

    fn append(&mut self, mut other: TerminalDraws) {
        self.power.append(&mut other.power);
        self.gas.append(&mut other.gas);
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// `true` if no path was simulated.
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// Terminal power prices `P_T`.
    pub fn power(&self) -> &[Real] {
        &self.power
    }

    /// Terminal gas prices `G_T`.
    pub fn gas(&self) -> &[Real] {
        &self.gas
    }

    /// Iterate over `(P_T, G_T)` rows.
    pub fn iter(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.power.iter().copied().zip(self.gas.iter().copied())
    }
}

// ─── TwoFactorPathGenerator ───────────────────────────────────────────────────

/// Simulates correlated two-factor paths and keeps the terminal values.
#[derive(Debug, Clone)]
pub struct TwoFactorPathGenerator<P> {
    process: P,
    factor: CorrelationFactor,
    settings: PathGenSettings,
    cancel: Option<Arc<AtomicBool>>,
}

impl<P: StochasticProcess2D> TwoFactorPathGenerator<P> {
    /// Create a generator for `process` with factor correlation `rho`.
    ///
    /// `rho` is clamped to `[-1, 1]` by [`CorrelationFactor`].
    pub fn new(process: P, rho: Real, settings: PathGenSettings) -> Self {
        Self {
            process,
            factor: CorrelationFactor::new(rho),
            settings,
            cancel: None,
        }
    }

    /// Abort between batches once `flag` is set.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The generator settings.
    pub fn settings(&self) -> &PathGenSettings {
        &self.settings
    }

    /// The correlation factor in use.
    pub fn factor(&self) -> &CorrelationFactor {
        &self.factor
    }

    /// Simulate `n_paths` paths from `f0` over `grid` and return the
    /// terminal values.
    ///
    /// # Errors
    /// * `Precondition` if `batch_size` is zero.
    /// * [`Error::Cancelled`] if the cancellation flag was raised.
    pub fn simulate_terminal(&self, f0: State2, grid: &TimeGrid, seed: u64) -> Result<TerminalDraws> {
        ensure!(self.settings.batch_size > 0, "batch_size must be positive");
        let plan = self.settings.batch_plan();
        tracing::debug!(
            n_paths = self.settings.n_paths,
            n_steps = grid.steps(),
            batches = plan.len(),
            antithetic = self.settings.antithetic,
            "simulating terminal forwards"
        );

        #[cfg(feature = "parallel")]
        let batches: Vec<TerminalDraws> = plan
            .par_iter()
            .enumerate()
            .map(|(b, &(draws, rows))| self.run_batch(b, draws, rows, f0, grid, seed))
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let batches: Vec<TerminalDraws> = plan
            .iter()
            .enumerate()
            .map(|(b, &(draws, rows))| self.run_batch(b, draws, rows, f0, grid, seed))
            .collect::<Result<_>>()?;

        let mut out = TerminalDraws::with_capacity(self.settings.n_paths);
        for batch in batches {
            out.append(batch);
        }
        debug_assert_eq!(out.len(), self.settings.n_paths);
        Ok(out)
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn run_batch(
        &self,
        index: usize,
        draws: usize,
        rows: usize,
        f0: State2,
        grid: &TimeGrid,
        seed: u64,
    ) -> Result<TerminalDraws> {
        if self.cancelled() {
            tracing::debug!(batch = index, "path generation cancelled");
            return Err(Error::Cancelled);
        }
        tracing::trace!(batch = index, draws, rows, "simulating batch");

        let n_steps = grid.steps();
        let dt = grid.dt();
        let mut rng = InverseCumulativeNormalRng::new(stream_seed(seed, index));
        let mut z = vec![0.0; 2 * n_steps];
        let mut power = vec![0.0; rows];
        let mut gas = vec![0.0; rows];

        for j in 0..draws {
            rng.fill(&mut z);
            let x = self.evolve_path(f0, dt, &z, 1.0);
            power[j] = x[0];
            gas[j] = x[1];
            if self.settings.antithetic && draws + j < rows {
                let x = self.evolve_path(f0, dt, &z, -1.0);
                power[draws + j] = x[0];
                gas[draws + j] = x[1];
            }
        }
        Ok(TerminalDraws { power, gas })
    }

    #[inline]
    fn evolve_path(&self, f0: State2, dt: Real, z: &[Real], sign: Real) -> State2 {
        z.chunks_exact(2).fold(f0, |x, step| {
            let dw = self
                .factor
                .correlate(State2::new(sign * step[0], sign * step[1]));
            self.process.evolve(&x, dt, &dw)
        })
    }
}

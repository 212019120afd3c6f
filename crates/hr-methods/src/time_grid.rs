//! Uniform simulation time grid.

use hr_core::{ensure, Real, Result, Time};

/// A uniform grid of `n_steps` intervals from 0 to `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    t: Time,
    n_steps: usize,
}

impl TimeGrid {
    /// Create a uniform grid ending at `t`.
    ///
    /// # Errors
    /// `Precondition` if `n_steps == 0` or `t` is not positive and finite.
    pub fn new(t: Time, n_steps: usize) -> Result<Self> {
        ensure!(n_steps > 0, "time grid needs at least one step");
        ensure!(t > 0.0 && t.is_finite(), "time grid end must be positive, got {t}");
        Ok(Self { t, n_steps })
    }

    /// Number of steps.
    pub fn steps(&self) -> usize {
        self.n_steps
    }

    /// Number of time points (= steps + 1).
    pub fn size(&self) -> usize {
        self.n_steps + 1
    }

    /// Step length `t / n_steps`.
    pub fn dt(&self) -> Time {
        self.t / self.n_steps as Real
    }

    /// Time at index `i`.
    pub fn time(&self, i: usize) -> Time {
        if i == self.n_steps {
            self.t
        } else {
            i as Real * self.dt()
        }
    }

    /// Final time.
    pub fn end(&self) -> Time {
        self.t
    }

    /// All time points, `0, dt, …, t`.
    pub fn grid(&self) -> Vec<Time> {
        (0..=self.n_steps).map(|i| self.time(i)).collect()
    }
}

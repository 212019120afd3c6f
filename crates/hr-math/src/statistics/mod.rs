//! Sample statistics over pairs of observations.
//!
//! [`PairedStatistics`] accumulates `(x, y)` samples with Welford's update,
//! giving both means, both sample variances and the sample covariance in
//! one pass. Accumulators built on disjoint sub-samples can be merged, so
//! global statistics can be reduced after independent batches finish.

use hr_core::Real;

/// Incremental accumulator for paired samples `(x, y)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairedStatistics {
    count: usize,
    mean_x: Real,
    mean_y: Real,
    m2_x: Real,
    m2_y: Real,
    c_xy: Real,
}

impl PairedStatistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one paired sample.
    pub fn add(&mut self, x: Real, y: Real) {
        self.count += 1;
        let n = self.count as Real;
        let dx = x - self.mean_x;
        let dy = y - self.mean_y;
        self.mean_x += dx / n;
        self.mean_y += dy / n;
        self.m2_x += dx * (x - self.mean_x);
        self.m2_y += dy * (y - self.mean_y);
        self.c_xy += dx * (y - self.mean_y);
    }

    /// Fold another accumulator into this one (Chan et al. pairwise update).
    pub fn merge(&mut self, other: &PairedStatistics) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let na = self.count as Real;
        let nb = other.count as Real;
        let n = na + nb;
        let dx = other.mean_x - self.mean_x;
        let dy = other.mean_y - self.mean_y;
        self.mean_x += dx * nb / n;
        self.mean_y += dy * nb / n;
        self.m2_x += other.m2_x + dx * dx * na * nb / n;
        self.m2_y += other.m2_y + dy * dy * na * nb / n;
        self.c_xy += other.c_xy + dx * dy * na * nb / n;
        self.count += other.count;
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Mean of `x`.  Returns `None` if no samples have been added.
    pub fn mean_x(&self) -> Option<Real> {
        (self.count > 0).then_some(self.mean_x)
    }

    /// Mean of `y`.  Returns `None` if no samples have been added.
    pub fn mean_y(&self) -> Option<Real> {
        (self.count > 0).then_some(self.mean_y)
    }

    /// Unbiased (Bessel-corrected) variance of `x`.  `None` for fewer than 2
    /// samples.
    pub fn variance_x(&self) -> Option<Real> {
        (self.count > 1).then(|| self.m2_x / (self.count as Real - 1.0))
    }

    /// Unbiased variance of `y`.  `None` for fewer than 2 samples.
    pub fn variance_y(&self) -> Option<Real> {
        (self.count > 1).then(|| self.m2_y / (self.count as Real - 1.0))
    }

    /// Unbiased sample covariance of `x` and `y`.  `None` for fewer than 2
    /// samples.
    pub fn covariance(&self) -> Option<Real> {
        (self.count > 1).then(|| self.c_xy / (self.count as Real - 1.0))
    }

    /// Standard error of the mean of `x`.
    pub fn error_estimate_x(&self) -> Option<Real> {
        self.variance_x()
            .map(|v| (v.max(0.0) / self.count as Real).sqrt())
    }
}

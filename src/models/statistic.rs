//! Per-arm summary statistics consumed by the test engines.

use serde::{Deserialize, Serialize};

/// Whether an arm's mean has been effect-adjusted (e.g. by a CUPED-style
/// variance reduction).
///
/// Kept as an explicit variant rather than an optional number: an adjusted
/// mean of exactly 0.0 is a legitimate value, distinct from "no adjustment".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeanAdjustment {
    /// The raw sample mean is used for the point estimate
    #[default]
    Unadjusted,
    /// The point estimate uses this adjusted mean
    Adjusted { mean: f64 },
}

/// Summary statistic of one experiment arm.
///
/// Produced upstream from unit-level data; the engines only read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmStatistic {
    /// Raw sample mean
    unadjusted_mean: f64,
    /// Optional effect adjustment of the mean
    #[serde(default)]
    adjustment: MeanAdjustment,
    /// Variance of the metric. Zero or negative marks degenerate input.
    variance: f64,
    /// Number of units in the arm
    n: u64,
}

impl ArmStatistic {
    /// Create an unadjusted statistic.
    ///
    /// # Arguments
    /// * `mean` - Raw sample mean
    /// * `variance` - Metric variance (not divided by `n`)
    /// * `n` - Sample count
    pub fn new(mean: f64, variance: f64, n: u64) -> Self {
        Self {
            unadjusted_mean: mean,
            adjustment: MeanAdjustment::Unadjusted,
            variance,
            n,
        }
    }

    /// Attach an effect-adjusted mean. The raw mean stays available through
    /// [`unadjusted_mean`](Self::unadjusted_mean).
    pub fn with_adjusted_mean(mut self, adjusted_mean: f64) -> Self {
        self.adjustment = MeanAdjustment::Adjusted {
            mean: adjusted_mean,
        };
        self
    }

    /// Mean used in the point estimate (adjusted when an adjustment exists).
    pub fn mean(&self) -> f64 {
        match self.adjustment {
            MeanAdjustment::Unadjusted => self.unadjusted_mean,
            MeanAdjustment::Adjusted { mean } => mean,
        }
    }

    /// Raw sample mean, used as the relative-effect denominator.
    pub fn unadjusted_mean(&self) -> f64 {
        self.unadjusted_mean
    }

    pub fn adjustment(&self) -> MeanAdjustment {
        self.adjustment
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    /// Variance of the arm mean, `variance / n`.
    pub fn variance_of_mean(&self) -> f64 {
        self.variance / self.n as f64
    }

    /// True when the variance cannot support inference.
    pub fn has_zero_variance(&self) -> bool {
        self.variance <= 0.0
    }

    /// Validate structural invariants.
    ///
    /// Non-positive variance is accepted here: it is a data degeneracy that the
    /// engines report through a diagnostic, not a malformed input.
    pub fn validate(&self) -> Result<(), String> {
        if self.n == 0 {
            return Err("n must be >= 1, got 0".to_string());
        }
        if !self.unadjusted_mean.is_finite() {
            return Err(format!(
                "unadjusted mean must be finite, got {}",
                self.unadjusted_mean
            ));
        }
        if let MeanAdjustment::Adjusted { mean } = self.adjustment {
            if !mean.is_finite() {
                return Err(format!("adjusted mean must be finite, got {mean}"));
            }
        }
        if !self.variance.is_finite() {
            return Err(format!("variance must be finite, got {}", self.variance));
        }
        Ok(())
    }
}

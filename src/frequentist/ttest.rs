//! Fixed-horizon Welch t-tests.
//!
//! The three variants share every quantity in [`TTestCore`] and differ only
//! in how the t statistic becomes a p-value and an interval:
//!
//! | Variant | p-value | interval |
//! |---|---|---|
//! | TwoSided | `2·(1 − F(|t|))` | `pe ± q(1 − α/2)·se` |
//! | OneSidedGreater | `1 − F(t)` | `[pe − q(1 − α)·se, +∞]` |
//! | OneSidedLesser | `F(t)` | `[−∞, pe − q(1 − α)·se]` |

use serde::{Deserialize, Serialize};

use super::base::{Inference, TTestCore};
use super::AbTest;
use crate::errors::Result;
use crate::models::{ArmStatistic, ConfidenceInterval, Diagnostic, FrequentistConfig, TestResult};
use crate::numeric::TDistribution;

/// Alternative hypothesis of a fixed-horizon t-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alternative {
    /// B differs from A
    #[default]
    TwoSided,
    /// B is greater than A
    OneSidedGreater,
    /// B is less than A
    OneSidedLesser,
}

impl Alternative {
    pub fn name(&self) -> &'static str {
        match self {
            Alternative::TwoSided => "two_sided",
            Alternative::OneSidedGreater => "one_sided_greater",
            Alternative::OneSidedLesser => "one_sided_lesser",
        }
    }

    /// p-value of the critical value `t`.
    pub fn p_value(&self, dist: &TDistribution, t: f64) -> f64 {
        match self {
            Alternative::TwoSided => 2.0 * dist.sf(t.abs()),
            Alternative::OneSidedGreater => dist.sf(t),
            Alternative::OneSidedLesser => dist.cdf(t),
        }
    }

    /// Interval around `point_estimate` with standard error `std_error`.
    pub fn confidence_interval(
        &self,
        dist: &TDistribution,
        point_estimate: f64,
        std_error: f64,
        alpha: f64,
    ) -> ConfidenceInterval {
        match self {
            Alternative::TwoSided => {
                let width = dist.quantile(1.0 - alpha / 2.0) * std_error;
                ConfidenceInterval::symmetric(point_estimate, width)
            }
            Alternative::OneSidedGreater => {
                let width = dist.quantile(1.0 - alpha) * std_error;
                ConfidenceInterval::new(point_estimate - width, f64::INFINITY)
            }
            Alternative::OneSidedLesser => {
                let width = dist.quantile(1.0 - alpha) * std_error;
                ConfidenceInterval::new(f64::NEG_INFINITY, point_estimate - width)
            }
        }
    }
}

/// Welch two-sample t-test with unequal variances.
///
/// ```ignore
/// let test = TTest::two_sided(stat_a, stat_b, FrequentistConfig::default())?;
/// let result = test.compute_result();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTest {
    core: TTestCore,
    alternative: Alternative,
}

impl TTest {
    /// Create a t-test.
    ///
    /// # Arguments
    /// * `stat_a` - Control ("baseline") statistic
    /// * `stat_b` - Treatment ("variation") statistic
    /// * `config` - Test configuration
    /// * `alternative` - Alternative hypothesis
    ///
    /// # Errors
    /// Invalid config or malformed statistics.
    pub fn new(
        stat_a: ArmStatistic,
        stat_b: ArmStatistic,
        config: FrequentistConfig,
        alternative: Alternative,
    ) -> Result<Self> {
        Ok(Self {
            core: TTestCore::new(stat_a, stat_b, config)?,
            alternative,
        })
    }

    pub fn two_sided(
        stat_a: ArmStatistic,
        stat_b: ArmStatistic,
        config: FrequentistConfig,
    ) -> Result<Self> {
        Self::new(stat_a, stat_b, config, Alternative::TwoSided)
    }

    pub fn one_sided_greater(
        stat_a: ArmStatistic,
        stat_b: ArmStatistic,
        config: FrequentistConfig,
    ) -> Result<Self> {
        Self::new(stat_a, stat_b, config, Alternative::OneSidedGreater)
    }

    pub fn one_sided_lesser(
        stat_a: ArmStatistic,
        stat_b: ArmStatistic,
        config: FrequentistConfig,
    ) -> Result<Self> {
        Self::new(stat_a, stat_b, config, Alternative::OneSidedLesser)
    }

    pub fn alternative(&self) -> Alternative {
        self.alternative
    }

    /// Shared two-sample quantities.
    pub fn core(&self) -> &TTestCore {
        &self.core
    }

    fn inference(&self, core: &TTestCore) -> std::result::Result<Inference, Diagnostic> {
        let dist = TDistribution::new(core.dof())
            .map_err(|_| Diagnostic::UndefinedDegreesOfFreedom)?;
        let ci = self.alternative.confidence_interval(
            &dist,
            core.point_estimate(),
            core.variance().sqrt(),
            core.config().alpha,
        );
        let p_value = self.alternative.p_value(&dist, core.critical_value());
        Ok(Inference { ci, p_value })
    }
}

impl AbTest for TTest {
    fn compute_result(&self) -> TestResult {
        self.core
            .compute_with(self.alternative.name(), |core| self.inference(core))
    }
}

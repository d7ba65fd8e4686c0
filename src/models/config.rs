//! Test configuration types.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ALPHA, DEFAULT_PHASE_LENGTH_DAYS, DEFAULT_SEQUENTIAL_TUNING_PARAMETER,
    DEFAULT_TEST_VALUE, DEFAULT_TRAFFIC_PROPORTION_B,
};

/// Parameterization of the treatment effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceType {
    /// `mean_b − mean_a`
    Absolute,
    /// `(mean_b − mean_a) / unadjusted_mean_a`
    #[default]
    Relative,
    /// Absolute effect projected to a daily total impact:
    /// multiplied by `n_b / traffic_proportion_b / phase_length_days`
    Scaled,
}

/// Configuration for fixed-horizon frequentist t-tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequentistConfig {
    /// Significance level, in (0, 1).
    pub alpha: f64,

    /// Effect under the null hypothesis, in the units of `difference_type`.
    pub test_value: f64,

    /// Effect parameterization.
    pub difference_type: DifferenceType,

    /// Fraction of all experiment traffic assigned to B, in [0, 1].
    /// Only read for [`DifferenceType::Scaled`].
    pub traffic_proportion_b: f64,

    /// Length of the analysed phase in days.
    /// Only read for [`DifferenceType::Scaled`].
    pub phase_length_days: f64,
}

impl Default for FrequentistConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            test_value: DEFAULT_TEST_VALUE,
            difference_type: DifferenceType::default(),
            traffic_proportion_b: DEFAULT_TRAFFIC_PROPORTION_B,
            phase_length_days: DEFAULT_PHASE_LENGTH_DAYS,
        }
    }
}

impl FrequentistConfig {
    /// Builder method to set the significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder method to set the null-hypothesis effect.
    pub fn with_test_value(mut self, test_value: f64) -> Self {
        self.test_value = test_value;
        self
    }

    /// Builder method to set the effect parameterization.
    pub fn with_difference_type(mut self, difference_type: DifferenceType) -> Self {
        self.difference_type = difference_type;
        self
    }

    /// Builder method for scaled effects: sets the difference type to
    /// [`DifferenceType::Scaled`] along with traffic share and phase length.
    pub fn scaled(mut self, traffic_proportion_b: f64, phase_length_days: f64) -> Self {
        self.difference_type = DifferenceType::Scaled;
        self.traffic_proportion_b = traffic_proportion_b;
        self.phase_length_days = phase_length_days;
        self
    }

    pub fn is_relative(&self) -> bool {
        self.difference_type == DifferenceType::Relative
    }

    pub fn is_scaled(&self) -> bool {
        self.difference_type == DifferenceType::Scaled
    }

    /// Validate invariants.
    ///
    /// A zero traffic proportion is accepted: the scaled result then degrades
    /// to an uninformative result with a diagnostic.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(format!("alpha must be in (0.0, 1.0), got {}", self.alpha));
        }
        if !self.test_value.is_finite() {
            return Err(format!("test_value must be finite, got {}", self.test_value));
        }
        if !(0.0..=1.0).contains(&self.traffic_proportion_b) {
            return Err(format!(
                "traffic_proportion_b must be in [0.0, 1.0], got {}",
                self.traffic_proportion_b
            ));
        }
        if !(self.phase_length_days.is_finite() && self.phase_length_days > 0.0) {
            return Err(format!(
                "phase_length_days must be > 0.0, got {}",
                self.phase_length_days
            ));
        }
        Ok(())
    }
}

/// Configuration for the always-valid sequential t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequentialConfig {
    /// Shared frequentist settings
    #[serde(flatten)]
    pub base: FrequentistConfig,

    /// Sample size at which the confidence sequence is tightest. Smaller
    /// values narrow the sequence early and widen it late.
    #[serde(alias = "sequential_tuning_parameter")]
    pub tuning_parameter: f64,
}

impl Default for SequentialConfig {
    fn default() -> Self {
        Self {
            base: FrequentistConfig::default(),
            tuning_parameter: DEFAULT_SEQUENTIAL_TUNING_PARAMETER,
        }
    }
}

impl SequentialConfig {
    /// Create a sequential config on top of existing frequentist settings.
    pub fn new(base: FrequentistConfig) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    /// Builder method to set the tuning parameter.
    pub fn with_tuning_parameter(mut self, tuning_parameter: f64) -> Self {
        self.tuning_parameter = tuning_parameter;
        self
    }

    /// Validate invariants of the base config and the tuning parameter.
    pub fn validate(&self) -> Result<(), String> {
        self.base.validate()?;
        if !(self.tuning_parameter.is_finite() && self.tuning_parameter > 0.0) {
            return Err(format!(
                "tuning_parameter must be > 0.0, got {}",
                self.tuning_parameter
            ));
        }
        Ok(())
    }
}

impl From<FrequentistConfig> for SequentialConfig {
    fn from(base: FrequentistConfig) -> Self {
        Self::new(base)
    }
}

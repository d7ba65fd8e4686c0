//! Quantities shared by every two-sample t-test variant.
//!
//! All values are recomputed from the two arm statistics and the config on
//! each call; nothing is cached.

use tracing::{debug, trace};

use crate::errors::{Error, Result};
use crate::models::{
    ArmStatistic, ConfidenceInterval, Diagnostic, FrequentistConfig, TestResult, Uplift,
};
use crate::numeric::variance_of_ratios;

/// Interval and p-value produced by a specific test variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Inference {
    pub(crate) ci: ConfidenceInterval,
    pub(crate) p_value: f64,
}

/// Two-sample comparison of a control arm `a` against a treatment arm `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestCore {
    stat_a: ArmStatistic,
    stat_b: ArmStatistic,
    config: FrequentistConfig,
}

impl TTestCore {
    /// Validate inputs and build the core.
    ///
    /// # Errors
    /// Malformed config or statistics. Degenerate data (zero baseline, zero
    /// variance) is accepted and reported by `compute_with`.
    pub fn new(
        stat_a: ArmStatistic,
        stat_b: ArmStatistic,
        config: FrequentistConfig,
    ) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        stat_a
            .validate()
            .map_err(|msg| Error::invalid_statistic("a", msg))?;
        stat_b
            .validate()
            .map_err(|msg| Error::invalid_statistic("b", msg))?;
        Ok(Self {
            stat_a,
            stat_b,
            config,
        })
    }

    pub fn stat_a(&self) -> &ArmStatistic {
        &self.stat_a
    }

    pub fn stat_b(&self) -> &ArmStatistic {
        &self.stat_b
    }

    pub fn config(&self) -> &FrequentistConfig {
        &self.config
    }

    /// Variance of the point estimate.
    ///
    /// Relative effects use the delta method on the unadjusted means; other
    /// parameterizations add the variances of the two arm means.
    pub fn variance(&self) -> f64 {
        let var_mean_a = self.stat_a.variance_of_mean();
        let var_mean_b = self.stat_b.variance_of_mean();
        if self.config.is_relative() {
            variance_of_ratios(
                self.stat_b.unadjusted_mean(),
                var_mean_b,
                self.stat_a.unadjusted_mean(),
                var_mean_a,
                0.0,
            )
        } else {
            var_mean_b + var_mean_a
        }
    }

    /// Effect estimate in the configured parameterization.
    ///
    /// The relative denominator is the *unadjusted* baseline mean, so an
    /// effect-adjusted baseline does not distort the percentage uplift.
    pub fn point_estimate(&self) -> f64 {
        let diff = self.stat_b.mean() - self.stat_a.mean();
        if self.config.is_relative() {
            diff / self.stat_a.unadjusted_mean()
        } else {
            diff
        }
    }

    /// Standardized distance of the estimate from the null value.
    pub fn critical_value(&self) -> f64 {
        (self.point_estimate() - self.config.test_value) / self.variance().sqrt()
    }

    /// Welch–Satterthwaite degrees of freedom.
    pub fn dof(&self) -> f64 {
        let (var_a, n_a) = (self.stat_a.variance(), self.stat_a.n() as f64);
        let (var_b, n_b) = (self.stat_b.variance(), self.stat_b.n() as f64);
        (var_b / n_b + var_a / n_a).powi(2)
            / (var_b.powi(2) / (n_b.powi(2) * (n_b - 1.0))
                + var_a.powi(2) / (n_a.powi(2) * (n_a - 1.0)))
    }

    /// Combined sample size `n_a + n_b`.
    pub fn total_n(&self) -> f64 {
        self.stat_a.n() as f64 + self.stat_b.n() as f64
    }

    /// Data degeneracy that prevents any inference, checked in order.
    pub fn degeneracy(&self) -> Option<Diagnostic> {
        if self.stat_a.mean() == 0.0 || self.stat_a.unadjusted_mean() == 0.0 {
            return Some(Diagnostic::BaselineZero);
        }
        if self.stat_a.has_zero_variance() || self.stat_b.has_zero_variance() {
            return Some(Diagnostic::ZeroNegativeVariance);
        }
        None
    }

    /// Run the shared pipeline with a variant-specific interval and p-value.
    ///
    /// Degenerate inputs short-circuit to an uninformative result; scaled
    /// effects are rescaled after the variant has run.
    pub(crate) fn compute_with<F>(&self, method: &'static str, inference: F) -> TestResult
    where
        F: FnOnce(&Self) -> std::result::Result<Inference, Diagnostic>,
    {
        if let Some(diagnostic) = self.degeneracy() {
            debug!(method, %diagnostic, "Returning uninformative test result");
            return TestResult::uninformative(Some(diagnostic));
        }

        let Inference { ci, p_value } = match inference(self) {
            Ok(inference) => inference,
            Err(diagnostic) => {
                debug!(method, %diagnostic, "Returning uninformative test result");
                return TestResult::uninformative(Some(diagnostic));
            }
        };

        let point_estimate = self.point_estimate();
        let result = TestResult {
            expected: point_estimate,
            ci,
            p_value: p_value.clamp(0.0, 1.0),
            uplift: Uplift::normal(point_estimate, self.variance().sqrt()),
            error_message: None,
        };

        trace!(
            method,
            point_estimate,
            variance = self.variance(),
            ci_lower = ci.lower,
            ci_upper = ci.upper,
            p_value = result.p_value,
            "Test result computed"
        );

        if self.config.is_scaled() {
            self.scale_result(&result)
        } else {
            result
        }
    }

    /// Project an absolute per-unit result to a daily total impact.
    fn scale_result(&self, result: &TestResult) -> TestResult {
        let traffic = self.config.traffic_proportion_b;
        if traffic == 0.0 {
            debug!(
                diagnostic = %Diagnostic::ZeroScaledVariation,
                "Returning uninformative test result"
            );
            return TestResult::uninformative(Some(Diagnostic::ZeroScaledVariation));
        }
        let adjustment = self.stat_b.n() as f64 / traffic / self.config.phase_length_days;
        result.scaled(adjustment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DifferenceType;

    fn absolute() -> FrequentistConfig {
        FrequentistConfig::default().with_difference_type(DifferenceType::Absolute)
    }

    #[test]
    fn test_absolute_quantities() {
        let core = TTestCore::new(
            ArmStatistic::new(10.0, 2.0, 6),
            ArmStatistic::new(11.0, 2.0, 6),
            absolute(),
        )
        .unwrap();
        assert_eq!(core.point_estimate(), 1.0);
        assert!((core.variance() - 2.0 / 3.0).abs() < 1e-15);
        // Equal n and variance: dof = 2(n − 1)
        assert!((core.dof() - 10.0).abs() < 1e-12);
        assert!((core.critical_value() - 1.224744871391589).abs() < 1e-12);
        assert_eq!(core.total_n(), 12.0);
    }

    #[test]
    fn test_relative_quantities() {
        let core = TTestCore::new(
            ArmStatistic::new(10.0, 9.0, 100),
            ArmStatistic::new(10.5, 16.0, 120),
            FrequentistConfig::default(),
        )
        .unwrap();
        assert!((core.point_estimate() - 0.05).abs() < 1e-15);
        assert!((core.variance() - 0.002325583333333333).abs() < 1e-15);
        assert!((core.dof() - 215.7238151180293).abs() < 1e-9);
    }

    #[test]
    fn test_relative_uses_unadjusted_denominator() {
        let a = ArmStatistic::new(10.0, 9.0, 100).with_adjusted_mean(8.0);
        let b = ArmStatistic::new(10.5, 16.0, 120).with_adjusted_mean(9.0);
        let core = TTestCore::new(a, b, FrequentistConfig::default()).unwrap();
        // (9 − 8) / 10
        assert!((core.point_estimate() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_test_value_shifts_critical_value() {
        let a = ArmStatistic::new(10.0, 2.0, 6);
        let b = ArmStatistic::new(11.0, 2.0, 6);
        let core = TTestCore::new(a, b, absolute().with_test_value(1.0)).unwrap();
        assert_eq!(core.critical_value(), 0.0);
    }

    #[test]
    fn test_degeneracy_order() {
        // Zero baseline wins over zero variance
        let core = TTestCore::new(
            ArmStatistic::new(0.0, 0.0, 10),
            ArmStatistic::new(1.0, 1.0, 10),
            FrequentistConfig::default(),
        )
        .unwrap();
        assert_eq!(core.degeneracy(), Some(Diagnostic::BaselineZero));

        let core = TTestCore::new(
            ArmStatistic::new(1.0, 1.0, 10),
            ArmStatistic::new(1.0, -1.0, 10),
            FrequentistConfig::default(),
        )
        .unwrap();
        assert_eq!(core.degeneracy(), Some(Diagnostic::ZeroNegativeVariance));
    }

    #[test]
    fn test_new_rejects_malformed_inputs() {
        let ok = ArmStatistic::new(1.0, 1.0, 10);

        let err = TTestCore::new(ArmStatistic::new(1.0, 1.0, 0), ok, absolute()).unwrap_err();
        assert!(matches!(err, Error::InvalidStatistic { arm: "a", .. }));

        let err = TTestCore::new(ok, ArmStatistic::new(f64::NAN, 1.0, 5), absolute()).unwrap_err();
        assert!(matches!(err, Error::InvalidStatistic { arm: "b", .. }));

        let err = TTestCore::new(ok, ok, absolute().with_alpha(0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_variant_diagnostic_is_surfaced() {
        let core = TTestCore::new(
            ArmStatistic::new(1.0, 1.0, 10),
            ArmStatistic::new(2.0, 1.0, 10),
            absolute(),
        )
        .unwrap();
        let result = core.compute_with("test", |_| Err(Diagnostic::UndefinedDegreesOfFreedom));
        assert_eq!(
            result,
            TestResult::uninformative(Some(Diagnostic::UndefinedDegreesOfFreedom))
        );
    }

    #[test]
    fn test_scaled_zero_traffic() {
        let core = TTestCore::new(
            ArmStatistic::new(1.0, 1.0, 10),
            ArmStatistic::new(2.0, 1.0, 10),
            FrequentistConfig::default().scaled(0.0, 7.0),
        )
        .unwrap();
        let result = core.compute_with("test", |core| {
            Ok(Inference {
                ci: ConfidenceInterval::symmetric(core.point_estimate(), 0.1),
                p_value: 0.5,
            })
        });
        assert_eq!(result.error_message, Some(Diagnostic::ZeroScaledVariation));
        assert_eq!(result.p_value, 1.0);
    }
}

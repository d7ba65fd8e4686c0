//! Always-valid sequential two-sided t-test.
//!
//! Replaces the fixed-horizon interval with an asymptotic confidence sequence
//! (Waudby-Smith et al., "Time-uniform central limit theory and asymptotic
//! confidence sequences", eq. 9) and the p-value with the reciprocal of a
//! normal-mixture e-value (eq. 155). Results stay valid when the experiment is
//! analysed repeatedly as data accumulates.
//!
//! ```text
//! ρ      = sqrt((−2 ln α + ln(1 − 2 ln α)) / tuning)
//! width  = sqrt(s²) · sqrt(2 (Nρ² + 1) · ln(sqrt(Nρ² + 1) / α) / (Nρ)²)
//! e      = exp(ρ² · st² / (2 (Nρ² + 1))) / sqrt(Nρ² + 1)
//! p      = min(1/e, 1)
//! ```
//!
//! with `N = n_a + n_b`, `s² = variance · N` and `st² = (pe − θ₀)² · N / variance`.

use super::base::{Inference, TTestCore};
use super::AbTest;
use crate::errors::{Error, Result};
use crate::models::{ArmStatistic, ConfidenceInterval, Diagnostic, SequentialConfig, TestResult};

/// Sequential two-sided t-test built on confidence sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialTTest {
    core: TTestCore,
    tuning_parameter: f64,
}

impl SequentialTTest {
    /// Create a sequential test.
    ///
    /// # Errors
    /// Invalid config (including a non-positive tuning parameter) or malformed
    /// statistics.
    pub fn new(stat_a: ArmStatistic, stat_b: ArmStatistic, config: SequentialConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self {
            core: TTestCore::new(stat_a, stat_b, config.base)?,
            tuning_parameter: config.tuning_parameter,
        })
    }

    pub fn tuning_parameter(&self) -> f64 {
        self.tuning_parameter
    }

    /// Shared two-sample quantities.
    pub fn core(&self) -> &TTestCore {
        &self.core
    }

    /// Mixture bandwidth ρ.
    pub fn rho(&self) -> f64 {
        let log_alpha = self.core.config().alpha.ln();
        ((-2.0 * log_alpha + (1.0 - 2.0 * log_alpha).ln()) / self.tuning_parameter).sqrt()
    }

    /// Half width of the confidence sequence at the current sample size.
    pub fn half_width(&self) -> f64 {
        let n = self.core.total_n();
        let rho = self.rho();
        let s2 = self.core.variance() * n;
        let tr2p1 = n * rho.powi(2) + 1.0;
        s2.sqrt()
            * (2.0 * tr2p1 * (tr2p1.sqrt() / self.core.config().alpha).ln() / (n * rho).powi(2))
                .sqrt()
    }

    /// Normal-mixture e-value against the configured null.
    pub fn e_value(&self) -> f64 {
        let n = self.core.total_n();
        let rho2 = self.rho().powi(2);
        let st2 = (self.core.point_estimate() - self.core.config().test_value).powi(2) * n
            / self.core.variance();
        let tr2p1 = n * rho2 + 1.0;
        (rho2 * st2 / (2.0 * tr2p1)).exp() / tr2p1.sqrt()
    }

    fn inference(&self, core: &TTestCore) -> std::result::Result<Inference, Diagnostic> {
        let ci = ConfidenceInterval::symmetric(core.point_estimate(), self.half_width());
        let p_value = (1.0 / self.e_value()).min(1.0);
        Ok(Inference { ci, p_value })
    }
}

impl AbTest for SequentialTTest {
    fn compute_result(&self) -> TestResult {
        self.core
            .compute_with("sequential_two_sided", |core| self.inference(core))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequentist::TTest;
    use crate::models::FrequentistConfig;

    #[test]
    fn test_rho_default() {
        let test = SequentialTTest::new(
            ArmStatistic::new(10.0, 9.0, 100),
            ArmStatistic::new(10.5, 16.0, 120),
            SequentialConfig::default(),
        )
        .unwrap();
        assert!((test.rho() - 0.03984006677137368).abs() < 1e-14);
    }

    #[test]
    fn test_reference_values_not_significant() {
        let result = SequentialTTest::new(
            ArmStatistic::new(10.0, 9.0, 100),
            ArmStatistic::new(10.5, 16.0, 120),
            SequentialConfig::default(),
        )
        .unwrap()
        .compute_result();

        assert!((result.expected - 0.05).abs() < 1e-12);
        assert!((result.ci.width() / 2.0 - 0.2377552046580212).abs() < 1e-10);
        // e-value just under 1
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_reference_values_significant() {
        let result = SequentialTTest::new(
            ArmStatistic::new(10.0, 9.0, 1000),
            ArmStatistic::new(11.0, 16.0, 1000),
            SequentialConfig::default(),
        )
        .unwrap()
        .compute_result();

        assert!((result.ci.width() / 2.0 - 0.05122426255469952).abs() < 1e-10);
        assert!((result.p_value - 1.4770141063862186e-6).abs() < 1e-12);
        assert!(result.is_significant(0.05));
    }

    #[test]
    fn test_wider_than_fixed_horizon() {
        let a = ArmStatistic::new(10.0, 9.0, 1000);
        let b = ArmStatistic::new(11.0, 16.0, 1000);
        let sequential = SequentialTTest::new(a, b, SequentialConfig::default())
            .unwrap()
            .compute_result();
        let fixed = TTest::two_sided(a, b, FrequentistConfig::default())
            .unwrap()
            .compute_result();
        assert!(sequential.ci.width() > fixed.ci.width());
        assert!((fixed.ci.width() / 2.0 - 0.03216083370263847).abs() < 1e-6);
    }

    #[test]
    fn test_huge_tuning_parameter_stays_finite() {
        let a = ArmStatistic::new(10.0, 9.0, 1000);
        let b = ArmStatistic::new(11.0, 16.0, 1000);
        for tuning in [1e9, 1e12, 1e15] {
            let config = SequentialConfig::default().with_tuning_parameter(tuning);
            let result = SequentialTTest::new(a, b, config).unwrap().compute_result();
            assert!(!result.ci.lower.is_nan() && !result.ci.upper.is_nan());
            assert!(result.ci.width().is_finite(), "tuning {tuning}");
            assert!(!result.p_value.is_nan());
            assert!((0.0..=1.0).contains(&result.p_value));
        }
    }

    #[test]
    fn test_invalid_tuning_parameter() {
        let a = ArmStatistic::new(10.0, 9.0, 1000);
        let config = SequentialConfig::default().with_tuning_parameter(0.0);
        let err = SequentialTTest::new(a, a, config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_degenerate_inputs_inherited() {
        let a = ArmStatistic::new(10.0, 0.0, 1000);
        let b = ArmStatistic::new(11.0, 16.0, 1000);
        let result = SequentialTTest::new(a, b, SequentialConfig::default())
            .unwrap()
            .compute_result();
        assert_eq!(result.error_message, Some(Diagnostic::ZeroNegativeVariance));
    }
}

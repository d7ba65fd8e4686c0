//! Result types returned by the test engines.
//!
//! Results serialize with camelCase keys (`pValue`, `errorMessage`) for the
//! reporting layer. One-sided intervals carry an infinite bound, which
//! `serde_json` renders as `null`; a `null` bound reads back as the infinity
//! on its side.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Distribution family of the uplift estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpliftDistribution {
    #[default]
    Normal,
}

/// Inferential distribution of the effect estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Uplift {
    pub dist: UpliftDistribution,
    pub mean: f64,
    pub stddev: f64,
}

impl Uplift {
    /// Normal uplift with the given mean and standard deviation.
    pub fn normal(mean: f64, stddev: f64) -> Self {
        Self {
            dist: UpliftDistribution::Normal,
            mean,
            stddev,
        }
    }
}

/// Confidence interval `[lower, upper]`. Bounds may be infinite for one-sided
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[Option<f64>; 2]", into = "[f64; 2]")]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Symmetric interval `center ± half_width`.
    pub fn symmetric(center: f64, half_width: f64) -> Self {
        Self::new(center - half_width, center + half_width)
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Both bounds multiplied by `factor` (`factor > 0` keeps the order).
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.lower * factor, self.upper * factor)
    }
}

impl From<[f64; 2]> for ConfidenceInterval {
    fn from([lower, upper]: [f64; 2]) -> Self {
        Self::new(lower, upper)
    }
}

/// Missing bounds are unbounded: `null` lower is −∞, `null` upper is +∞.
impl From<[Option<f64>; 2]> for ConfidenceInterval {
    fn from([lower, upper]: [Option<f64>; 2]) -> Self {
        Self::new(
            lower.unwrap_or(f64::NEG_INFINITY),
            upper.unwrap_or(f64::INFINITY),
        )
    }
}

impl From<ConfidenceInterval> for [f64; 2] {
    fn from(ci: ConfidenceInterval) -> Self {
        [ci.lower, ci.upper]
    }
}

/// Why a test could not produce an informative result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Diagnostic {
    /// Baseline (control) mean or unadjusted mean is zero
    BaselineZero,
    /// Zero or negative variance in either arm
    ZeroNegativeVariance,
    /// Zero traffic proportion for the scaled effect
    ZeroScaledVariation,
    /// Welch–Satterthwaite degrees of freedom are not finite and positive
    UndefinedDegreesOfFreedom,
}

impl Diagnostic {
    const ALL: [Diagnostic; 4] = [
        Diagnostic::BaselineZero,
        Diagnostic::ZeroNegativeVariance,
        Diagnostic::ZeroScaledVariation,
        Diagnostic::UndefinedDegreesOfFreedom,
    ];

    /// Human-readable message.
    pub fn message(&self) -> &'static str {
        match self {
            Diagnostic::BaselineZero => "baseline variation mean is zero",
            Diagnostic::ZeroNegativeVariance => "zero or negative variance",
            Diagnostic::ZeroScaledVariation => "zero traffic in scaled variation",
            Diagnostic::UndefinedDegreesOfFreedom => {
                "degrees of freedom undefined; each variation needs at least 2 units"
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<Diagnostic> for String {
    fn from(diagnostic: Diagnostic) -> Self {
        diagnostic.message().to_string()
    }
}

impl TryFrom<String> for Diagnostic {
    type Error = String;

    fn try_from(message: String) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.message() == message)
            .ok_or_else(|| format!("unknown diagnostic message: {message}"))
    }
}

/// Outcome of one frequentist or sequential test.
///
/// Created once per `compute_result` call and never modified; the scaled
/// path builds a new value through [`TestResult::scaled`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Point estimate of the effect
    pub expected: f64,
    /// Confidence interval (or confidence sequence) for the effect
    pub ci: ConfidenceInterval,
    /// p-value in [0, 1]
    pub p_value: f64,
    /// Distribution of the effect estimate
    pub uplift: Uplift,
    /// Present only when the analysis could not proceed
    pub error_message: Option<Diagnostic>,
}

impl TestResult {
    /// Uninformative result: zero effect, `[0, 0]` interval, p-value 1.
    pub fn uninformative(diagnostic: Option<Diagnostic>) -> Self {
        Self {
            expected: 0.0,
            ci: ConfidenceInterval::new(0.0, 0.0),
            p_value: 1.0,
            uplift: Uplift::normal(0.0, 0.0),
            error_message: diagnostic,
        }
    }

    /// New result with effect, interval and uplift multiplied by
    /// `adjustment`. The p-value is carried over unchanged.
    pub fn scaled(&self, adjustment: f64) -> Self {
        Self {
            expected: self.expected * adjustment,
            ci: self.ci.scaled(adjustment),
            p_value: self.p_value,
            uplift: Uplift {
                dist: self.uplift.dist,
                mean: self.uplift.mean * adjustment,
                stddev: self.uplift.stddev * adjustment,
            },
            error_message: self.error_message,
        }
    }

    /// True when no diagnostic was raised.
    pub fn is_informative(&self) -> bool {
        self.error_message.is_none()
    }

    /// True for an informative result with `p_value < alpha`.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.is_informative() && self.p_value < alpha
    }
}

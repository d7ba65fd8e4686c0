//! Frequentist two-sample test engines.
//!
//! - **TTestCore**: pooled variance, point estimate, Welch dof, critical value,
//!   degenerate-input checks and scaling shared by every variant
//! - **TTest**: fixed-horizon t-test, one of three [`Alternative`]s
//! - **SequentialTTest**: always-valid confidence sequence and e-value p-value
//!
//! ## Usage
//!
//! ```ignore
//! let a = ArmStatistic::new(10.0, 9.0, 1000);
//! let b = ArmStatistic::new(10.4, 9.5, 1010);
//!
//! let result = TTest::two_sided(a, b, FrequentistConfig::default())?.compute_result();
//! if let Some(diagnostic) = result.error_message {
//!     // uninformative result, render as-is
//! }
//! ```

mod base;
mod sequential;
mod ttest;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::{ArmStatistic, FrequentistConfig, SequentialConfig, TestResult};

pub use base::TTestCore;
pub use sequential::SequentialTTest;
pub use ttest::{Alternative, TTest};

/// A configured A/B test that can produce a result.
///
/// Implementations are pure: repeated calls return identical results.
pub trait AbTest {
    /// Compute the test result. Degenerate data yields an uninformative result
    /// carrying a diagnostic; this never fails.
    fn compute_result(&self) -> TestResult;
}

/// Which test to run for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TestKind {
    TwoSided,
    OneSidedGreater,
    OneSidedLesser,
    SequentialTwoSided { tuning_parameter: f64 },
}

/// Build the requested test and compute its result.
///
/// # Errors
/// Invalid config or malformed statistics.
pub fn run_test(
    kind: TestKind,
    stat_a: ArmStatistic,
    stat_b: ArmStatistic,
    config: FrequentistConfig,
) -> Result<TestResult> {
    let result = match kind {
        TestKind::TwoSided => TTest::two_sided(stat_a, stat_b, config)?.compute_result(),
        TestKind::OneSidedGreater => {
            TTest::one_sided_greater(stat_a, stat_b, config)?.compute_result()
        }
        TestKind::OneSidedLesser => {
            TTest::one_sided_lesser(stat_a, stat_b, config)?.compute_result()
        }
        TestKind::SequentialTwoSided { tuning_parameter } => {
            let config = SequentialConfig::new(config).with_tuning_parameter(tuning_parameter);
            SequentialTTest::new(stat_a, stat_b, config)?.compute_result()
        }
    };
    Ok(result)
}

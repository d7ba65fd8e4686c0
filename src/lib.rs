#![deny(unreachable_pub)]

//! Inference for two-arm experiments from per-arm summary statistics.
//!
//! Given a control arm `a` and a treatment arm `b` (mean, variance, sample
//! count), the engines return an effect estimate, interval, p-value and
//! uplift distribution. Degenerate data never errors: it yields an
//! uninformative [`TestResult`] carrying a [`Diagnostic`].

// Core modules
mod consts;
mod errors;

// Feature modules
pub mod frequentist;
pub mod models;
pub mod numeric;

#[cfg(test)]
mod tests;

// Re-exports
pub use consts::{
    DEFAULT_ALPHA, DEFAULT_PHASE_LENGTH_DAYS, DEFAULT_SEQUENTIAL_TUNING_PARAMETER,
    DEFAULT_TEST_VALUE, DEFAULT_TRAFFIC_PROPORTION_B,
};
pub use errors::{Error, Result};
pub use frequentist::{
    run_test, AbTest, Alternative, SequentialTTest, TTest, TTestCore, TestKind,
};
pub use models::{
    ArmStatistic, ConfidenceInterval, Diagnostic, DifferenceType, FrequentistConfig,
    MeanAdjustment, SequentialConfig, TestResult, Uplift, UpliftDistribution,
};
pub use numeric::{check_srm, truncated_normal_mean, variance_of_ratios};

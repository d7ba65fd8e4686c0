//! Data model at the engine boundary: per-arm inputs, configs, results.

pub mod config;
pub mod result;
pub mod statistic;

pub use config::{DifferenceType, FrequentistConfig, SequentialConfig};
pub use result::{ConfidenceInterval, Diagnostic, TestResult, Uplift, UpliftDistribution};
pub use statistic::{ArmStatistic, MeanAdjustment};

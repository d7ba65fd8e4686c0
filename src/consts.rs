/// Default significance level for frequentist tests.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default null-hypothesis effect.
pub const DEFAULT_TEST_VALUE: f64 = 0.0;

/// Default sequential tuning parameter (expected sample size at which the
/// confidence sequence is tightest).
pub const DEFAULT_SEQUENTIAL_TUNING_PARAMETER: f64 = 5000.0;

/// Default fraction of traffic in the treatment arm for scaled effects.
pub const DEFAULT_TRAFFIC_PROPORTION_B: f64 = 1.0;

/// Default experiment phase length in days for scaled effects.
pub const DEFAULT_PHASE_LENGTH_DAYS: f64 = 1.0;

use thiserror::Error;

/// Errors raised for malformed inputs at the crate boundary.
///
/// Degenerate experiment data (zero baseline, zero variance, ...) never
/// produces an `Error`; it yields a [`TestResult`](crate::TestResult) carrying
/// a [`Diagnostic`](crate::Diagnostic) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Test configuration is outside its valid domain
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Per-arm statistic is malformed
    #[error("Invalid statistic for arm {arm}: {message}")]
    InvalidStatistic { arm: &'static str, message: String },

    /// Function argument violates a precondition
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Distribution could not be constructed from the given parameters
    #[error("Distribution error: {0}")]
    Distribution(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

// Convenience constructors for common error patterns
impl Error {
    /// Create a config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Create a statistic error for the named arm
    pub fn invalid_statistic(arm: &'static str, msg: impl Into<String>) -> Self {
        Error::InvalidStatistic {
            arm,
            message: msg.into(),
        }
    }

    /// Create an argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a distribution error
    pub fn distribution(msg: impl Into<String>) -> Self {
        Error::Distribution(msg.into())
    }
}

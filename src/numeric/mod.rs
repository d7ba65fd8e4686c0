//! Numeric building blocks shared by the test engines.
//!
//! - **variance_of_ratios**: delta-method variance of `M / D`
//! - **truncated_normal_mean**: mean of a normal truncated to `[a, b]`
//! - **check_srm**: chi-squared sample ratio mismatch p-value
//! - **distributions**: normal, Student's t and chi-squared functions
//!
//! Everything here is a pure function of its arguments.

pub mod distributions;
mod ratio;
mod srm;
mod truncated_normal;

pub use distributions::{chi2_sf, normal_cdf, normal_pdf, normal_sf, TDistribution};
pub use ratio::variance_of_ratios;
pub use srm::check_srm;
pub use truncated_normal::truncated_normal_mean;

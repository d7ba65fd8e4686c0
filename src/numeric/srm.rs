//! Sample ratio mismatch (SRM) check.
//!
//! Compares the observed number of units per variation against the traffic
//! split the experiment was configured with, using a Pearson chi-squared
//! goodness-of-fit test:
//!
//! ```text
//! X² = Σᵢ (oᵢ − eᵢ)² / eᵢ,   eᵢ = wᵢ / Σw · Σo
//! ```
//!
//! with `k − 1` degrees of freedom for `k` variations. A small p-value means
//! the observed split is unlikely under the configured weights.

use tracing::warn;

use super::distributions::chi2_sf;
use crate::errors::{Error, Result};

/// Run the SRM chi-squared test and return its p-value.
///
/// - Zero total traffic returns 1.0.
/// - Variations with weight 0 contribute nothing to the statistic; they are
///   expected to receive no traffic and are not penalised for stray units.
/// - A single variation (0 degrees of freedom) returns 1.0.
///
/// # Errors
/// `users` and `weights` must have the same length, and every weight must be
/// finite and non-negative.
pub fn check_srm(users: &[u64], weights: &[f64]) -> Result<f64> {
    if users.len() != weights.len() {
        return Err(Error::invalid_argument(format!(
            "users and weights must have the same length, got {} and {}",
            users.len(),
            weights.len()
        )));
    }

    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::invalid_argument(format!(
            "weights must be finite and non-negative, got {w}"
        )));
    }

    let total_observed: f64 = users.iter().map(|&o| o as f64).sum();
    if total_observed == 0.0 {
        return Ok(1.0);
    }

    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        warn!(
            n_variations = users.len(),
            "SRM check received all-zero weights; reporting no mismatch"
        );
        return Ok(1.0);
    }

    let stat: f64 = users
        .iter()
        .zip(weights)
        .filter(|(_, w)| **w > 0.0)
        .map(|(&o, &w)| {
            let expected = w / total_weight * total_observed;
            (o as f64 - expected).powi(2) / expected
        })
        .sum();

    chi2_sf(stat, users.len().saturating_sub(1))
}

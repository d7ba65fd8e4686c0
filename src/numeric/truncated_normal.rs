//! Mean of a truncated normal distribution.
//!
//! For `X ~ N(μ, σ²)` restricted to `[a, b]`, with standardized bounds
//! `α = (a − μ)/σ` and `β = (b − μ)/σ`:
//!
//! ```text
//! E[X | a ≤ X ≤ b] = μ + σ · (φ(α) − φ(β)) / (Φ(β) − Φ(α))
//! ```
//!
//! The direct form loses all precision once both bounds sit in the same far
//! tail (`Φ(β) − Φ(α)` rounds to zero). Bounds entirely below zero are
//! reflected into the upper tail, and upper-tail intervals are evaluated through
//! the Mills ratio `R(x) = (1 − Φ(x)) / φ(x)`, which stays well scaled.

use super::distributions::{normal_cdf, normal_pdf, normal_sf};
use crate::errors::{Error, Result};

/// Beyond this point `R(x)` is taken from its continued fraction.
const MILLS_CF_THRESHOLD: f64 = 8.0;
const MILLS_CF_TERMS: u32 = 60;

/// Mean of `N(mu, sigma²)` truncated to `[a, b]`. Bounds may be infinite.
///
/// # Errors
/// `sigma` must be finite and positive, `mu` finite, and `a < b`.
pub fn truncated_normal_mean(mu: f64, sigma: f64, a: f64, b: f64) -> Result<f64> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(Error::invalid_argument(format!(
            "sigma must be finite and > 0, got {sigma}"
        )));
    }
    if !mu.is_finite() {
        return Err(Error::invalid_argument(format!("mu must be finite, got {mu}")));
    }
    // Also rejects NaN bounds
    if !(a < b) {
        return Err(Error::invalid_argument(format!(
            "truncation bounds must satisfy a < b, got [{a}, {b}]"
        )));
    }

    let alpha = (a - mu) / sigma;
    let beta = (b - mu) / sigma;
    Ok(mu + sigma * standard_truncated_mean(alpha, beta))
}

/// Mean of the standard normal truncated to `[alpha, beta]`.
fn standard_truncated_mean(alpha: f64, beta: f64) -> f64 {
    if alpha >= 0.0 {
        upper_tail_mean(alpha, beta)
    } else if beta <= 0.0 {
        -upper_tail_mean(-beta, -alpha)
    } else {
        // Interval straddles zero, so the mass is at least bounded away from 0
        (normal_pdf(alpha) - normal_pdf(beta)) / (normal_cdf(beta) - normal_cdf(alpha))
    }
}

/// Truncated mean for `0 <= alpha < beta`, factored by `φ(alpha)`.
fn upper_tail_mean(alpha: f64, beta: f64) -> f64 {
    if beta.is_infinite() {
        return 1.0 / mills_ratio(alpha);
    }
    // φ(β)/φ(α) = exp((α² − β²)/2)
    let log_ratio = 0.5 * (alpha - beta) * (alpha + beta);
    let density_ratio = log_ratio.exp();
    -log_ratio.exp_m1() / (mills_ratio(alpha) - mills_ratio(beta) * density_ratio)
}

/// Mills ratio `(1 − Φ(x)) / φ(x)` for `x >= 0`.
fn mills_ratio(x: f64) -> f64 {
    if x.is_infinite() {
        return 0.0;
    }
    if x < MILLS_CF_THRESHOLD {
        return normal_sf(x) / normal_pdf(x);
    }
    // R(x) = 1 / (x + 1/(x + 2/(x + 3/(x + ...))))
    let mut t = x;
    for k in (1..=MILLS_CF_TERMS).rev() {
        t = x + f64::from(k) / t;
    }
    1.0 / t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_normal_mean() {
        // E[X | X > 0] = sqrt(2/π)
        let m = truncated_normal_mean(0.0, 1.0, 0.0, f64::INFINITY).unwrap();
        assert!((m - 0.7978845608028654).abs() < 1e-12);

        let m = truncated_normal_mean(0.0, 1.0, f64::NEG_INFINITY, 0.0).unwrap();
        assert!((m + 0.7978845608028654).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_truncation_keeps_mean() {
        let m = truncated_normal_mean(1.0, 2.0, -1.0, 3.0).unwrap();
        assert!((m - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_untruncated_is_mu() {
        let m = truncated_normal_mean(3.5, 0.7, f64::NEG_INFINITY, f64::INFINITY).unwrap();
        assert!((m - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_far_tail_interval() {
        let m = truncated_normal_mean(0.0, 1.0, 10.0, 12.0).unwrap();
        assert!((m - 10.098093233499937).abs() < 1e-9, "m = {m}");
        assert!(m > 10.0 && m < 12.0);
    }

    #[test]
    fn test_far_lower_tail() {
        let m = truncated_normal_mean(0.0, 1.0, f64::NEG_INFINITY, -40.0).unwrap();
        assert!((m + 40.02496884720726).abs() < 1e-9, "m = {m}");
    }

    #[test]
    fn test_location_scale() {
        let standard = truncated_normal_mean(0.0, 1.0, -0.5, 2.0).unwrap();
        let shifted = truncated_normal_mean(5.0, 3.0, 5.0 - 1.5, 5.0 + 6.0).unwrap();
        assert!((shifted - (5.0 + 3.0 * standard)).abs() < 1e-12);
    }

    #[test]
    fn test_mills_ratio_continuity() {
        let below = mills_ratio(MILLS_CF_THRESHOLD - 1e-9);
        let above = mills_ratio(MILLS_CF_THRESHOLD);
        assert!((below - above).abs() / above < 1e-9);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(truncated_normal_mean(0.0, 0.0, -1.0, 1.0).is_err());
        assert!(truncated_normal_mean(0.0, -1.0, -1.0, 1.0).is_err());
        assert!(truncated_normal_mean(0.0, 1.0, 1.0, 1.0).is_err());
        assert!(truncated_normal_mean(0.0, 1.0, 2.0, 1.0).is_err());
        assert!(truncated_normal_mean(0.0, 1.0, f64::NAN, 1.0).is_err());
    }
}

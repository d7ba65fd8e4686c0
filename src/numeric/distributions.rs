//! Distribution functions backing the tests.
//!
//! Student's t and chi-squared come from `statrs`; the standard normal is
//! evaluated through `erfc` on either side, so the upper tail does not
//! cancel to zero. Accuracy is that of `statrs::function::erf::erfc`, a
//! few parts in 10¹² near the center.

use std::f64::consts::{PI, SQRT_2};

use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};
use statrs::function::erf::erfc;

use crate::errors::{Error, Result};

/// Standard normal density.
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal CDF.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal survival function, `1 - Φ(x)`.
pub fn normal_sf(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

/// Standard Student's t distribution with `dof` degrees of freedom.
#[derive(Debug, Clone)]
pub struct TDistribution {
    inner: StudentsT,
}

impl TDistribution {
    /// Create a t distribution. `dof` must be finite and positive.
    pub fn new(dof: f64) -> Result<Self> {
        if !(dof.is_finite() && dof > 0.0) {
            return Err(Error::distribution(format!(
                "degrees of freedom must be finite and > 0, got {dof}"
            )));
        }
        let inner = StudentsT::new(0.0, 1.0, dof).map_err(|e| Error::distribution(e.to_string()))?;
        Ok(Self { inner })
    }

    /// `F_t(x)`
    pub fn cdf(&self, x: f64) -> f64 {
        self.inner.cdf(x)
    }

    /// `1 - F_t(x)`
    pub fn sf(&self, x: f64) -> f64 {
        self.inner.sf(x)
    }

    /// `F_t⁻¹(p)`
    pub fn quantile(&self, p: f64) -> f64 {
        self.inner.inverse_cdf(p)
    }
}

/// Chi-squared survival function.
///
/// Returns 1.0 for `dof == 0`: with a single category there is no evidence
/// against the expected split.
pub fn chi2_sf(stat: f64, dof: usize) -> Result<f64> {
    if dof == 0 || stat <= 0.0 {
        return Ok(1.0);
    }
    let dist = ChiSquared::new(dof as f64).map_err(|e| Error::distribution(e.to_string()))?;
    Ok(dist.sf(stat).clamp(0.0, 1.0))
}

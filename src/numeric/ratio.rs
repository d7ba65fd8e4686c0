/// Delta-method variance of a ratio `M / D`.
///
/// Given numerator `M` (mean `mean_num`, variance `var_num`), denominator `D`
/// (mean `mean_den`, variance `var_den`) and their covariance:
///
/// ```text
/// Var(M/D) ≈ var_M / μ_D² + var_D · μ_M² / μ_D⁴ − 2 · cov_MD · μ_M / μ_D³
/// ```
///
/// Undefined (non-finite) for `mean_den == 0`; callers guard the zero baseline.
pub fn variance_of_ratios(
    mean_num: f64,
    var_num: f64,
    mean_den: f64,
    var_den: f64,
    cov_num_den: f64,
) -> f64 {
    var_num / mean_den.powi(2) + var_den * mean_num.powi(2) / mean_den.powi(4)
        - 2.0 * cov_num_den * mean_num / mean_den.powi(3)
}

//! Residual diagnostics reported alongside the design-matrix fit.

use crate::regerror::RegResult;
use crate::stats::stats::{central_moment, chi2_p_value};

use itertools::Itertools;
use serde::Serialize;

/// A test statistic with its p-value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TestResult {
    pub statistic: f64,
    pub p_value: f64,
}

/// Breusch–Pagan Lagrange multiplier test, Koenker's studentized form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BreuschPagan {
    pub lm: TestResult,
    pub f: TestResult,
}

/// Biased sample skewness.
pub fn skew(resid: &[f64]) -> f64 {
    central_moment(resid, 3) / central_moment(resid, 2).powf(1.5)
}

/// Biased sample kurtosis, Pearson definition (normal = 3).
pub fn kurtosis(resid: &[f64]) -> f64 {
    central_moment(resid, 4) / central_moment(resid, 2).powi(2)
}

pub fn durbin_watson(resid: &[f64]) -> f64 {
    let diff_sq: f64 = resid.iter().tuple_windows().map(|(a, b)| (b - a).powi(2)).sum();
    diff_sq / resid.iter().map(|r| r * r).sum::<f64>()
}

pub fn jarque_bera(resid: &[f64]) -> RegResult<TestResult> {
    let n = resid.len() as f64;
    let s = skew(resid);
    let k = kurtosis(resid);
    let statistic = n / 6.0 * (s.powi(2) + (k - 3.0).powi(2) / 4.0);
    Ok(TestResult { statistic, p_value: chi2_p_value(statistic, 2.0)? })
}

// D'Agostino skewness z-score, valid from 8 samples.
fn skew_z(resid: &[f64]) -> f64 {
    let n = resid.len() as f64;
    let b2 = skew(resid);
    let mut y = b2 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    if y == 0.0 {
        y = 1.0;
    }
    delta * (y / alpha + ((y / alpha).powi(2) + 1.0).sqrt()).ln()
}

// Anscombe–Glynn kurtosis z-score.
fn kurtosis_z(resid: &[f64]) -> f64 {
    let n = resid.len() as f64;
    let b2 = kurtosis(resid);
    let e = 3.0 * (n - 1.0) / (n + 1.0);
    let var_b2 =
        24.0 * n * (n - 2.0) * (n - 3.0) / ((n + 1.0).powi(2) * (n + 3.0) * (n + 5.0));
    let x = (b2 - e) / var_b2.sqrt();
    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0 + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / sqrt_beta1.powi(2)).sqrt());
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    (term1 - term2) / (2.0 / (9.0 * a)).sqrt()
}

/// D'Agostino–Pearson omnibus normality test. `None` below 8 residuals.
pub fn omnibus(resid: &[f64]) -> RegResult<Option<TestResult>> {
    if resid.len() < 8 {
        return Ok(None);
    }
    let statistic = skew_z(resid).powi(2) + kurtosis_z(resid).powi(2);
    Ok(Some(TestResult { statistic, p_value: chi2_p_value(statistic, 2.0)? }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_has_no_skew() {
        let r = [-2., -1., 0., 1., 2.];
        assert!(skew(&r).abs() < 1e-12);
        // m4 = 6.8, m2 = 2
        assert!((kurtosis(&r) - 1.7).abs() < 1e-12);
    }

    #[test]
    fn test_right_skew_positive() {
        let r = [-1., -1., -1., -1., 4.];
        assert!(skew(&r) > 1.0);
    }

    #[test]
    fn test_durbin_watson() {
        // diffs: 2, -2, 2 -> 12; sum sq: 4
        let r = [1., -1., 1., -1.];
        assert!((durbin_watson(&r) - 3.0).abs() < 1e-12);
        let smooth = [1., 1., 1., 1.];
        assert_eq!(durbin_watson(&smooth), 0.0);
    }

    #[test]
    fn test_jarque_bera() {
        let r = [-2., -1., 0., 1., 2.];
        let jb = jarque_bera(&r).unwrap();
        // 5/6 * (1.3^2 / 4)
        assert!((jb.statistic - 5.0 / 6.0 * 1.69 / 4.0).abs() < 1e-12);
        assert!((jb.p_value - (-jb.statistic / 2.0).exp()).abs() < 1e-10);
    }

    #[test]
    fn test_omnibus_needs_eight() {
        let r = [0.1, -0.3, 0.2, 0.5, -0.4, 0.0, -0.1];
        assert!(omnibus(&r).unwrap().is_none());
    }

    #[test]
    fn test_omnibus_flags_outlier() {
        let calm: Vec<f64> = (0..40).map(|i| ((i * 7 % 11) as f64 - 5.0) / 5.0).collect();
        let mut wild = calm.clone();
        wild[3] = 40.0;

        let calm_p = omnibus(&calm).unwrap().unwrap().p_value;
        let wild_p = omnibus(&wild).unwrap().unwrap().p_value;
        assert!(wild_p < 1e-3);
        assert!(calm_p > wild_p);
    }
}

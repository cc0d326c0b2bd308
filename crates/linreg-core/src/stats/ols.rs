use crate::regerror::{check_same_len, RegResult, RegressionError};
use crate::stats::diagnostics::{
    durbin_watson, jarque_bera, kurtosis, omnibus, skew, BreuschPagan, TestResult,
};
use crate::stats::stats::{
    adjusted_r2, chi2_p_value, f_test_p_value, mean, r2_from_predictions, t_critical,
    t_test_p_value,
};

use log::info;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

pub const COEF_NAMES: [&str; 2] = ["const", "x1"];
const CONF_ALPHA: f64 = 0.05;

#[derive(Clone, Debug, Serialize)]
pub struct Coefficient {
    pub name: &'static str,
    pub estimate: f64,
    pub std_err: f64,
    pub t_value: f64,
    pub p_value: f64,
    pub conf_low: f64,
    pub conf_high: f64,
}

/// Regression diagnostics for a fitted `y ~ const + x` model.
#[derive(Clone, Debug, Serialize)]
pub struct SummaryReport {
    /// Intercept first, then slope.
    pub coefficients: Vec<Coefficient>,
    pub nobs: usize,
    pub df_model: f64,
    pub df_resid: f64,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub f_statistic: f64,
    pub f_p_value: f64,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    pub omnibus: Option<TestResult>,
    pub durbin_watson: f64,
    pub jarque_bera: TestResult,
    pub skew: f64,
    pub kurtosis: f64,
    pub condition_number: f64,
}

impl SummaryReport {
    pub fn intercept(&self) -> &Coefficient {
        &self.coefficients[0]
    }
    pub fn slope(&self) -> &Coefficient {
        &self.coefficients[1]
    }
}

// Least squares through the SVD pseudo-inverse. Returns the coefficients
// and (XᵀX)⁻¹ as pinv·pinvᵀ.
fn lstsq(design: &DMatrix<f64>, y: &DVector<f64>) -> RegResult<(DVector<f64>, DMatrix<f64>)> {
    let svd = design.clone().svd(true, true);
    let max_sv = svd.singular_values.max();
    let tol = max_sv * design.nrows().max(design.ncols()) as f64 * f64::EPSILON;
    if svd.singular_values.iter().any(|&sv| sv <= tol) {
        return Err(RegressionError::DivisionByZero);
    }
    let pinv = svd.pseudo_inverse(tol).map_err(RegressionError::StatError)?;
    let params = &pinv * y;
    let normalized_cov = &pinv * pinv.transpose();
    Ok((params, normalized_cov))
}

fn design_matrix(x: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), 2, |i, j| if j == 0 { 1.0 } else { x[i] })
}

/// Ordinary least squares on the constant-augmented design matrix `[1 | x]`.
#[derive(Clone, Debug)]
pub struct OlsFit {
    design: DMatrix<f64>,
    y: Vec<f64>,
    params: DVector<f64>,
    normalized_cov: DMatrix<f64>,
    fitted: Vec<f64>,
    resid: Vec<f64>,
}

impl OlsFit {
    pub fn fit(x: &[f64], y: &[f64]) -> RegResult<Self> {
        check_same_len(x, y)?;
        if x.len() < 3 {
            return Err(RegressionError::InsufficientData { len: x.len(), needed: 3 });
        }
        if x.iter().all(|&v| v == x[0]) {
            return Err(RegressionError::DivisionByZero);
        }

        let design = design_matrix(x);
        let (params, normalized_cov) = lstsq(&design, &DVector::from_column_slice(y))?;

        let fitted: Vec<f64> = (&design * &params).iter().copied().collect();
        let resid: Vec<f64> = y.iter().zip(&fitted).map(|(&yi, &fi)| yi - fi).collect();

        Ok(Self { design, y: y.to_vec(), params, normalized_cov, fitted, resid })
    }

    pub fn intercept(&self) -> f64 {
        self.params[0]
    }
    pub fn slope(&self) -> f64 {
        self.params[1]
    }
    pub fn nobs(&self) -> usize {
        self.y.len()
    }
    pub fn df_model(&self) -> f64 {
        (self.design.ncols() - 1) as f64
    }
    pub fn df_resid(&self) -> f64 {
        (self.nobs() - self.design.ncols()) as f64
    }
    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }
    pub fn residuals(&self) -> &[f64] {
        &self.resid
    }
    pub fn design(&self) -> &DMatrix<f64> {
        &self.design
    }

    pub fn ssr(&self) -> f64 {
        self.resid.iter().map(|r| r * r).sum()
    }
    /// Explained sum of squares around the mean of `y`.
    pub fn ess(&self) -> f64 {
        let y_mean = mean(&self.y);
        self.fitted.iter().map(|f| (f - y_mean).powi(2)).sum()
    }
    /// Residual variance `SSR / (n - 2)`.
    pub fn scale(&self) -> f64 {
        self.ssr() / self.df_resid()
    }

    pub fn std_errors(&self) -> Vec<f64> {
        let scale = self.scale();
        self.normalized_cov.diagonal().iter().map(|v| (v * scale).sqrt()).collect()
    }

    pub fn r_squared(&self) -> f64 {
        r2_from_predictions(&self.y, &self.fitted).unwrap_or(f64::NAN)
    }

    pub fn log_likelihood(&self) -> f64 {
        let nobs2 = self.nobs() as f64 / 2.0;
        let ssr_per_obs = self.ssr() / self.nobs() as f64;
        -nobs2 * (2.0 * std::f64::consts::PI).ln() - nobs2 * ssr_per_obs.ln() - nobs2
    }

    pub fn condition_number(&self) -> f64 {
        let eig = (self.design.transpose() * &self.design).symmetric_eigenvalues();
        (eig.max() / eig.min()).sqrt()
    }

    pub fn summary(&self) -> RegResult<SummaryReport> {
        let df_resid = self.df_resid();
        let df_model = self.df_model();
        let t_crit = t_critical(CONF_ALPHA, df_resid)?;

        let coefficients = COEF_NAMES
            .iter()
            .zip(self.params.iter())
            .zip(self.std_errors())
            .map(|((&name, &estimate), std_err)| {
                let t_value = estimate / std_err;
                Ok(Coefficient {
                    name,
                    estimate,
                    std_err,
                    t_value,
                    p_value: t_test_p_value(t_value, df_resid)?,
                    conf_low: estimate - t_crit * std_err,
                    conf_high: estimate + t_crit * std_err,
                })
            })
            .collect::<RegResult<Vec<_>>>()?;

        let r_squared = self.r_squared();
        let f_statistic = (self.ess() / df_model) / self.scale();
        let log_likelihood = self.log_likelihood();
        let k_params = df_model + 1.0;

        Ok(SummaryReport {
            coefficients,
            nobs: self.nobs(),
            df_model,
            df_resid,
            r_squared,
            adj_r_squared: adjusted_r2(r_squared, self.nobs(), df_model as usize),
            f_statistic,
            f_p_value: f_test_p_value(f_statistic, df_model, df_resid)?,
            log_likelihood,
            aic: -2.0 * log_likelihood + 2.0 * k_params,
            bic: -2.0 * log_likelihood + (self.nobs() as f64).ln() * k_params,
            omnibus: omnibus(&self.resid)?,
            durbin_watson: durbin_watson(&self.resid),
            jarque_bera: jarque_bera(&self.resid)?,
            skew: skew(&self.resid),
            kurtosis: kurtosis(&self.resid),
            condition_number: self.condition_number(),
        })
    }

    /// Regresses the squared residuals on this fit's design matrix.
    pub fn breusch_pagan(&self) -> RegResult<BreuschPagan> {
        let resid_sq: Vec<f64> = self.resid.iter().map(|r| r * r).collect();
        let (params, _) = lstsq(&self.design, &DVector::from_column_slice(&resid_sq))?;
        let aux_fitted: Vec<f64> = (&self.design * &params).iter().copied().collect();

        let n = self.nobs() as f64;
        let df_model = self.df_model();
        let df_resid = self.df_resid();
        let r2 = r2_from_predictions(&resid_sq, &aux_fitted).unwrap_or(f64::NAN);

        let lm = n * r2;
        let f = (r2 / df_model) / ((1.0 - r2) / df_resid);
        info!("Breusch-Pagan LM: {lm:.4}");

        Ok(BreuschPagan {
            lm: TestResult { statistic: lm, p_value: chi2_p_value(lm, df_model)? },
            f: TestResult { statistic: f, p_value: f_test_p_value(f, df_model, df_resid)? },
        })
    }
}

pub fn summarize(x: &[f64], y: &[f64]) -> RegResult<SummaryReport> {
    OlsFit::fit(x, y)?.summary()
}

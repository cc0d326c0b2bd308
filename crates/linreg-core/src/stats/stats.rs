use crate::regerror::{RegResult, RegressionError};

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, StudentsT};

pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// k-th central moment with divisor `n`.
pub fn central_moment(data: &[f64], k: i32) -> f64 {
    let m = mean(data);
    data.iter().map(|&v| (v - m).powi(k)).sum::<f64>() / data.len() as f64
}

pub fn r2_from_predictions(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() != y_hat.len() || y.len() < 2 {
        return None;
    }

    let y_mean = mean(y);

    let ss_res: f64 = y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return None;
    }

    Some(1.0 - ss_res / ss_tot)
}

pub fn adjusted_r2(r2: f64, n: usize, k: usize) -> f64 {
    if n <= k + 1 {
        return r2; // Not enough data to adjust
    }
    1.0 - (1.0 - r2) * (n as f64 - 1.0) / (n as f64 - k as f64 - 1.0)
}

// Non-finite statistics come out of perfect fits. NaN stays NaN, an
// infinite statistic lies beyond any critical value.
fn guard_statistic(stat: f64) -> Option<f64> {
    if stat.is_nan() {
        Some(f64::NAN)
    } else if stat.is_infinite() {
        Some(0.0)
    } else {
        None
    }
}

/// Two-sided p-value of a t statistic with `df` degrees of freedom.
pub fn t_test_p_value(t_stat: f64, df: f64) -> RegResult<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|_| RegressionError::StatError("failed to construct StudentsT"))?;
    if let Some(p) = guard_statistic(t_stat) {
        return Ok(p);
    }
    Ok(2.0 * dist.sf(t_stat.abs()))
}

/// Two-sided critical value at significance `alpha`.
pub fn t_critical(alpha: f64, df: f64) -> RegResult<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|_| RegressionError::StatError("failed to construct StudentsT"))?;
    Ok(dist.inverse_cdf(1.0 - alpha / 2.0))
}

pub fn f_test_p_value(f_stat: f64, df_num: f64, df_den: f64) -> RegResult<f64> {
    let dist = FisherSnedecor::new(df_num, df_den)
        .map_err(|_| RegressionError::StatError("failed to construct FisherSnedecor"))?;
    if let Some(p) = guard_statistic(f_stat) {
        return Ok(p);
    }
    Ok(dist.sf(f_stat.max(0.0)))
}

pub fn chi2_p_value(stat: f64, df: f64) -> RegResult<f64> {
    let dist = ChiSquared::new(df)
        .map_err(|_| RegressionError::StatError("failed to construct ChiSquared"))?;
    if let Some(p) = guard_statistic(stat) {
        return Ok(p);
    }
    Ok(dist.sf(stat.max(0.0)))
}

use crate::regerror::{check_same_len, RegResult};

/// Observed minus predicted, point by point.
pub fn residuals(y: &[f64], predictions: &[f64]) -> RegResult<Vec<f64>> {
    check_same_len(predictions, y)?;
    Ok(y.iter().zip(predictions).map(|(&yi, &yhi)| yi - yhi).collect())
}

pub fn sum_of_squares(resid: &[f64]) -> f64 {
    resid.iter().map(|r| r.powi(2)).sum()
}

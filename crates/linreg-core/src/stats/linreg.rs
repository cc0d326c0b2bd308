use crate::regerror::{check_same_len, RegResult, RegressionError};
use crate::stats::stats::mean;

use serde::Serialize;
use std::fmt;

/// Fitted line `y = intercept + slope * x`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LinReg {
    pub intercept: f64,
    pub slope: f64,
}

impl fmt::Display for LinReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Slope: {}", self.slope)?;
        write!(f, "Intercept: {}", self.intercept)
    }
}

impl LinReg {
    pub fn calculate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
    pub fn from_val(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Closed-form least squares over paired samples.
    ///
    /// Fails with `DivisionByZero` when `x` carries no variance, which
    /// includes every input shorter than two points.
    pub fn train(x: &[f64], y: &[f64]) -> RegResult<Self> {
        check_same_len(x, y)?;
        if x.len() < 2 || x.iter().all(|&v| v == x[0]) {
            return Err(RegressionError::DivisionByZero);
        }

        let avg_x = mean(x);
        let avg_y = mean(y);

        let (ss_xy, ss_xx) = x.iter().zip(y).fold((0.0, 0.0), |(sxy, sxx), (&xi, &yi)| {
            let dx = xi - avg_x;
            (sxy + dx * (yi - avg_y), sxx + dx * dx)
        });
        if ss_xx == 0.0 || !ss_xx.is_finite() {
            return Err(RegressionError::DivisionByZero);
        }

        let slope = ss_xy / ss_xx;
        let intercept = avg_y - slope * avg_x;

        Ok(Self { intercept, slope })
    }

    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.calculate(xi)).collect()
    }
}

pub fn compute_regression_parameters(x: &[f64], y: &[f64]) -> RegResult<LinReg> {
    LinReg::train(x, y)
}

pub fn predict(x: &[f64], model: &LinReg) -> Vec<f64> {
    model.predict(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let x = [0., 1., 2., 3., 4.];
        let y = [1., 3., 5., 7., 9.];

        let model = LinReg::train(&x, &y).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-12);
        assert!((model.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_slope() {
        let x = [1., 2., 3., 4.];
        let y = [10., 8., 6., 4.];

        let model = LinReg::train(&x, &y).unwrap();
        assert!((model.slope + 2.0).abs() < 1e-12);
        assert!((model.intercept - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_is_division_by_zero() {
        assert_eq!(LinReg::train(&[3.], &[1.]), Err(RegressionError::DivisionByZero));
    }

    #[test]
    fn test_identical_x_is_division_by_zero() {
        let x = [5., 5., 5., 5.];
        let y = [1., 2., 3., 4.];
        assert_eq!(LinReg::train(&x, &y), Err(RegressionError::DivisionByZero));

        let x = [0.1; 7];
        let y = [0., 1., 2., 3., 4., 5., 6.];
        assert_eq!(LinReg::train(&x, &y), Err(RegressionError::DivisionByZero));
    }

    #[test]
    fn test_empty_is_division_by_zero() {
        assert_eq!(LinReg::train(&[], &[]), Err(RegressionError::DivisionByZero));
    }

    #[test]
    fn test_length_mismatch() {
        let x = [1., 2., 3.];
        let y = [1., 2.];
        assert_eq!(
            LinReg::train(&x, &y),
            Err(RegressionError::ShapeMismatch { len_x: 3, len_y: 2 })
        );
    }

    #[test]
    fn test_two_points() {
        let model = LinReg::train(&[1., 3.], &[2., 6.]).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-12);
        assert!(model.intercept.abs() < 1e-12);
    }

    #[test]
    fn test_train_is_idempotent() {
        let x = [0.5, 1.7, 2.2, 3.9, 4.1, 6.0];
        let y = [1.2, 0.4, 3.3, 2.8, 5.5, 4.9];
        assert_eq!(LinReg::train(&x, &y).unwrap(), LinReg::train(&x, &y).unwrap());
    }

    #[test]
    fn test_predict() {
        let model = LinReg::from_val(1., 2.);
        assert_eq!(predict(&[0., 1., -1.5], &model), vec![1., 3., -2.]);
        assert!(model.predict(&[]).is_empty());
    }

    #[test]
    fn test_display() {
        let model = LinReg::from_val(1.5, -0.25);
        assert_eq!(model.to_string(), "Slope: -0.25\nIntercept: 1.5");
    }
}

use crate::regerror::{RegResult, RegressionError};

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

/// Random draws that shaped a generated sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NoiseParams {
    pub noise_mean: f64,
    pub noise_std_dev: f64,
    pub y_end: f64,
}

impl NoiseParams {
    /// Draws mean and std dev from `0..10` and the trend end from `-10..10`, in that order.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let noise_mean = rng.random_range(0..10) as f64;
        let noise_std_dev = rng.random_range(0..10) as f64;
        let y_end = rng.random_range(-10..10) as f64;
        Self { noise_mean, noise_std_dev, y_end }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Sample {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub noise: NoiseParams,
}

impl Sample {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// `n` evenly spaced values over `[start, end]`, both ends included.
///
/// A single point yields `[start]`. The last element is pinned to `end` so
/// accumulated rounding never moves the upper bound.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| i as f64 * step + start).collect();
            out[n - 1] = end;
            out
        },
    }
}

/// Builds `x = linspace(x_start, x_end, n)` and a noisy linear `y` on top of it.
pub fn generate_data<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    x_start: f64,
    x_end: f64,
) -> RegResult<Sample> {
    if n == 0 {
        return Err(RegressionError::InvalidArgument(
            "number of values must be positive".to_owned(),
        ));
    }
    if !x_start.is_finite() || !x_end.is_finite() {
        return Err(RegressionError::InvalidArgument(format!(
            "x range must be finite, got [{x_start}, {x_end}]"
        )));
    }

    let noise = NoiseParams::draw(rng);
    debug!(
        "noise mean: {}, noise std dev: {}, y end: {}",
        noise.noise_mean, noise.noise_std_dev, noise.y_end
    );
    sample_with(rng, n, x_start, x_end, noise)
}

/// Same as [`generate_data`] but with fixed noise parameters.
pub fn sample_with<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    x_start: f64,
    x_end: f64,
    noise: NoiseParams,
) -> RegResult<Sample> {
    let dist = Normal::new(noise.noise_mean, noise.noise_std_dev)
        .map_err(|_| RegressionError::StatError("failed to construct Normal"))?;

    let x = linspace(x_start, x_end, n);
    let y = linspace(0.0, noise.y_end, n).into_iter().map(|trend| trend + dist.sample(rng)).collect();

    Ok(Sample { x, y, noise })
}

use crate::regerror::RegResult;
use crate::report::RunReport;
use crate::sample::{generate_data, Sample};
use crate::stats::residuals::{residuals, sum_of_squares};
use crate::stats::{
    compute_regression_parameters, predict, BreuschPagan, LinReg, OlsFit, SummaryReport,
};

use log::info;
use rand::Rng;

pub const DEFAULT_NUM_VALUES: usize = 1000;
pub const DEFAULT_X_START: f64 = 0.0;
pub const DEFAULT_X_END: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationOptions {
    pub num_values: usize,
    pub x_start: f64,
    pub x_end: f64,
    pub heteroscedasticity: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            num_values: DEFAULT_NUM_VALUES,
            x_start: DEFAULT_X_START,
            x_end: DEFAULT_X_END,
            heteroscedasticity: false,
        }
    }
}

/// Everything derived from one generated sample.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub sample: Sample,
    pub model: LinReg,
    pub predictions: Vec<f64>,
    pub residuals: Vec<f64>,
    pub summary: SummaryReport,
    pub heteroscedasticity: Option<BreuschPagan>,
}

impl Simulation {
    pub fn report(&self) -> RunReport<'_> {
        RunReport {
            noise: &self.sample.noise,
            model: &self.model,
            summary: &self.summary,
            heteroscedasticity: self.heteroscedasticity.as_ref(),
        }
    }
}

/// Fits, predicts and summarizes an existing sample.
pub fn analyse(sample: Sample, heteroscedasticity: bool) -> RegResult<Simulation> {
    let model = compute_regression_parameters(&sample.x, &sample.y)?;
    info!("fitted slope {} and intercept {}", model.slope, model.intercept);

    let predictions = predict(&sample.x, &model);
    let residuals = residuals(&sample.y, &predictions)?;
    info!("sum of squared residuals: {}", sum_of_squares(&residuals));

    let fit = OlsFit::fit(&sample.x, &sample.y)?;
    let summary = fit.summary()?;
    let heteroscedasticity = if heteroscedasticity { Some(fit.breusch_pagan()?) } else { None };

    Ok(Simulation { sample, model, predictions, residuals, summary, heteroscedasticity })
}

pub fn simulate<R: Rng + ?Sized>(rng: &mut R, opts: &SimulationOptions) -> RegResult<Simulation> {
    info!("generating {} values over [{}, {}]", opts.num_values, opts.x_start, opts.x_end);
    let sample = generate_data(rng, opts.num_values, opts.x_start, opts.x_end)?;
    analyse(sample, opts.heteroscedasticity)
}

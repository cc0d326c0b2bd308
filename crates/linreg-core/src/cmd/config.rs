use crate::pipeline::{simulate, Simulation, SimulationOptions};
use crate::plot::{plot_data_and_regression, plot_residuals, REGRESSION_FILE, RESIDUALS_FILE};
use crate::regerror::RegressionError;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;

/* =================== Public configuration types =================== */

#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Simulate(Simulate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Simulate {
    pub num_values: usize,
    pub x_start: f64,
    pub x_end: f64,
    pub seed: Option<u64>,
    pub out_dir: PathBuf,
    pub plot: bool,
    pub heteroscedasticity: bool,
    pub format: OutputFormat,
}

impl Simulate {
    pub fn options(&self) -> SimulationOptions {
        SimulationOptions {
            num_values: self.num_values,
            x_start: self.x_start,
            x_end: self.x_end,
            heteroscedasticity: self.heteroscedasticity,
        }
    }
}

/* =================== Error type (no process::exit) =================== */

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error(transparent)]
    Regression(#[from] RegressionError),
    #[error("plotting failed: {0}")]
    Plot(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/* =================== Entry point =================== */

impl Config {
    pub fn run(&self) -> Result<(), CmdError> {
        match &self.action {
            Action::Simulate(s) => self.run_simulate(s),
        }
    }
}

/* =================== Actions =================== */

impl Config {
    fn run_simulate(&self, s: &Simulate) -> Result<(), CmdError> {
        // all numbers are computed before anything is printed or drawn
        let sim = match s.seed {
            Some(seed) => simulate(&mut StdRng::seed_from_u64(seed), &s.options())?,
            None => simulate(&mut rand::rng(), &s.options())?,
        };

        match s.format {
            OutputFormat::Text => print_text(&sim),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sim.report())?),
        }

        if s.plot {
            self.render_charts(s, &sim)?;
        }
        Ok(())
    }

    fn render_charts(&self, s: &Simulate, sim: &Simulation) -> Result<(), CmdError> {
        fs::create_dir_all(&s.out_dir)?;
        let x = &sim.sample.x;

        let regression_path = s.out_dir.join(REGRESSION_FILE);
        plot_data_and_regression(&regression_path, x, &sim.sample.y, &sim.predictions)
            .map_err(|e| CmdError::Plot(e.to_string()))?;
        info!("wrote {}", regression_path.display());

        let residuals_path = s.out_dir.join(RESIDUALS_FILE);
        plot_residuals(&residuals_path, x, &sim.residuals)
            .map_err(|e| CmdError::Plot(e.to_string()))?;
        info!("wrote {}", residuals_path.display());
        Ok(())
    }
}

fn print_text(sim: &Simulation) {
    println!("{}", sim.model);
    println!();
    println!("{}", sim.summary);
    if let Some(bp) = &sim.heteroscedasticity {
        println!();
        println!("{bp}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulate_cfg(out_dir: PathBuf, num_values: usize) -> Simulate {
        Simulate {
            num_values,
            x_start: 0.,
            x_end: 10.,
            seed: Some(11),
            out_dir,
            plot: false,
            heteroscedasticity: true,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_run_without_plots() {
        let cfg = Config { action: Action::Simulate(simulate_cfg(PathBuf::from("."), 50)) };
        assert!(cfg.run().is_ok());
    }

    #[test]
    fn test_run_reports_bad_input() {
        let cfg = Config { action: Action::Simulate(simulate_cfg(PathBuf::from("."), 0)) };
        let err = cfg.run().unwrap_err();
        assert!(matches!(err, CmdError::Regression(RegressionError::InvalidArgument(_))));
    }

    #[test]
    fn test_run_too_few_points_for_summary() {
        let cfg = Config { action: Action::Simulate(simulate_cfg(PathBuf::from("."), 2)) };
        assert!(matches!(
            cfg.run().unwrap_err(),
            CmdError::Regression(RegressionError::InsufficientData { len: 2, needed: 3 })
        ));
    }

    #[test]
    fn test_options_mapping() {
        let s = simulate_cfg(PathBuf::from("out"), 123);
        let opts = s.options();
        assert_eq!(opts.num_values, 123);
        assert!(opts.heteroscedasticity);
    }
}

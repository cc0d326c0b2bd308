use clap::{Args, Parser, ValueEnum, ValueHint};
use std::path::PathBuf;

use crate::cmd::config::{Action, Config, OutputFormat, Simulate as SimulateCfg};
use crate::pipeline::{DEFAULT_NUM_VALUES, DEFAULT_X_END, DEFAULT_X_START};

#[derive(Debug, Parser)]
#[command(
    name = "linreg",
    about = "Simple linear regression on randomly generated data",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub simulate: SimulateArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Number of data points to generate
    #[arg(short = 'n', long = "num-values", default_value_t = DEFAULT_NUM_VALUES)]
    pub num_values: usize,

    /// Start of the independent variable range
    #[arg(long = "x-start", default_value_t = DEFAULT_X_START, allow_negative_numbers = true)]
    pub x_start: f64,

    /// End of the independent variable range
    #[arg(long = "x-end", default_value_t = DEFAULT_X_END, allow_negative_numbers = true)]
    pub x_end: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory the charts are written to
    #[arg(short = 'o', long = "out-dir", value_hint = ValueHint::DirPath, default_value = ".")]
    pub out_dir: PathBuf,

    /// Skip chart rendering
    #[arg(long = "no-plot")]
    pub no_plot: bool,

    /// Also run the Breusch-Pagan heteroscedasticity test
    #[arg(long = "het")]
    pub heteroscedasticity: bool,

    /// Console output format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,
}

// -------- Map CLI -> Config/Action --------

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    pub fn into_config(self) -> Config {
        let args = self.simulate;

        Config {
            action: Action::Simulate(SimulateCfg {
                num_values: args.num_values,
                x_start: args.x_start,
                x_end: args.x_end,
                seed: args.seed,
                out_dir: args.out_dir,
                plot: !args.no_plot,
                heteroscedasticity: args.heteroscedasticity,
                format: args.format.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulate_of(cfg: Config) -> SimulateCfg {
        match cfg.action {
            Action::Simulate(s) => s,
        }
    }

    #[test]
    fn test_defaults() {
        let s = simulate_of(Cli::parse_from(["linreg"]).into_config());
        assert_eq!(s.num_values, 1000);
        assert_eq!(s.x_start, 0.);
        assert_eq!(s.x_end, 10.);
        assert_eq!(s.seed, None);
        assert!(s.plot);
        assert!(!s.heteroscedasticity);
        assert_eq!(s.format, OutputFormat::Text);
        assert_eq!(s.out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_all_args() {
        let cli = Cli::parse_from([
            "linreg", "-n", "25", "--x-start", "-5", "--x-end", "5", "--seed", "3",
            "--no-plot", "--het", "--format", "json",
        ]);
        let s = simulate_of(cli.into_config());
        assert_eq!(s.num_values, 25);
        assert_eq!(s.x_start, -5.);
        assert_eq!(s.x_end, 5.);
        assert_eq!(s.seed, Some(3));
        assert!(!s.plot);
        assert!(s.heteroscedasticity);
        assert_eq!(s.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_bad_count() {
        assert!(Cli::try_parse_from(["linreg", "-n", "many"]).is_err());
    }
}

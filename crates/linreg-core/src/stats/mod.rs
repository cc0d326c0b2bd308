pub mod diagnostics;
pub mod linreg;
pub mod ols;
pub mod residuals;
pub mod stats;

pub use diagnostics::{BreuschPagan, TestResult};
pub use linreg::{compute_regression_parameters, predict, LinReg};
pub use ols::{summarize, Coefficient, OlsFit, SummaryReport};
pub use residuals::residuals;

pub mod cmd;
pub mod pipeline;
pub mod plot;
pub mod regerror;
pub mod report;
pub mod sample;
pub mod stats;

pub use pipeline::{analyse, simulate, Simulation, SimulationOptions};
pub use regerror::{RegResult, RegressionError};
pub use sample::{generate_data, linspace, NoiseParams, Sample};

//! Monte Carlo simulation engine and return sampling

mod engine;
mod params;
mod random;

pub use engine::{yearly_bands, MonteCarloEngine};
pub use params::{
    MonteCarloParams, MonteCarloResults, SimulationPath, YearlyBand, DEFAULT_NUM_SIMULATIONS,
};
pub use random::{lognormal_annual_return, standard_normal};

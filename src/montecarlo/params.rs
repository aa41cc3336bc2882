//! Parameter and result structures for Monte Carlo runs

use serde::{Deserialize, Serialize};

use crate::projection::ProductType;

/// Trials per run when the caller does not say otherwise
pub const DEFAULT_NUM_SIMULATIONS: usize = 1000;

fn default_num_simulations() -> usize {
    DEFAULT_NUM_SIMULATIONS
}

/// Parameters for a Monte Carlo run.
///
/// Unlike [`crate::projection::ProjectionInput`], all rates and fees here
/// are decimals (0.08 = 8%): the stochastic engine is the decimal-unit
/// call site of the shared monthly update rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloParams {
    /// Gross contribution credited every month
    pub monthly_contribution: f64,

    /// Expected annual return, decimal
    pub mean_return: f64,

    /// Annual return volatility, decimal
    pub volatility: f64,

    /// Accumulation horizon in years
    pub years: u32,

    /// Age at the start of accumulation
    pub current_age: u32,

    /// Annual administration fee on the balance, decimal, applied monthly pro-rata
    pub admin_fee: f64,

    /// Loading fee charged on each contribution, decimal
    pub loading_fee: f64,

    /// Tax regime applied to every path at the end of the horizon
    pub product_type: ProductType,

    /// Annual inflation, decimal. Carried for parity with the deterministic
    /// inputs; paths are reported nominal.
    #[serde(default)]
    pub inflation: Option<f64>,

    /// Number of independent trials
    #[serde(default = "default_num_simulations")]
    pub num_simulations: usize,

    /// Fixed seed for reproducible runs; `None` seeds from the OS
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Outcome of one stochastic trial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationPath {
    /// Balance at the end of the horizon
    pub future_value: f64,

    /// Balance net of regressive IR withholding
    pub after_tax_value: f64,

    /// Balance at the end of each simulated year (length = years)
    pub yearly_values: Vec<f64>,
}

/// Aggregate of all trials in one run.
///
/// Percentiles and mean are computed over the after-tax values, nearest-rank
/// at indices `floor(N * p)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloResults {
    /// 5th percentile of after-tax values (worst plausible case)
    pub percentile5: f64,

    /// Median after-tax value
    pub percentile50: f64,

    /// 95th percentile of after-tax values (best plausible case)
    pub percentile95: f64,

    /// Arithmetic mean of after-tax values
    pub mean: f64,

    /// Every simulated path, in trial order
    pub paths: Vec<SimulationPath>,
}

/// Cross-path percentile band for one simulated year, for confidence-band
/// charts. Produced by [`super::yearly_bands`] as a post-processing step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YearlyBand {
    /// Simulated year (1-indexed)
    pub year: u32,

    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
}

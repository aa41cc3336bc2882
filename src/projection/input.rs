//! Input parameters for a deterministic projection run

use serde::{Deserialize, Serialize};

/// Retirement-product tax regime
///
/// PGBL contributions are deductible up front, so IR at withdrawal falls on
/// the whole balance. VGBL taxes only accumulated gains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "PGBL")]
    Pgbl,
    #[serde(rename = "VGBL")]
    Vgbl,
}

/// Parameters for one deterministic projection
///
/// Rates and fees are in percent units at this boundary (8.0 = 8% a.a.);
/// the engine normalizes them to decimals before the monthly loop. The
/// engine does not validate ranges: negative contributions or pathological
/// fees produce garbage output, and `years` must be at least 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Gross contribution credited every month
    pub monthly_contribution: f64,

    /// Nominal annual return, percent (compounded at a flat monthly rate)
    pub annual_return_pct: f64,

    /// Accumulation horizon in years
    pub years: u32,

    /// Age at the start of accumulation
    pub current_age: u32,

    /// Annual administration fee on the balance, percent, applied monthly pro-rata
    pub admin_fee_pct: f64,

    /// Loading fee charged on each contribution, percent
    pub loading_fee_pct: f64,

    /// Tax regime applied at the end of the horizon
    pub product_type: ProductType,

    /// Annual inflation, percent. `None` disables real-value output.
    #[serde(default)]
    pub inflation_pct: Option<f64>,
}

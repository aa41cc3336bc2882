//! Output structures for deterministic projections

use serde::{Deserialize, Serialize};

/// Snapshot of the account at the end of one elapsed year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyEvolution {
    /// Elapsed years since the start of accumulation (1-indexed)
    pub year: u32,

    /// Contributions credited so far, net of loading fees
    pub total_contributions: f64,

    /// Balance at the end of the year
    pub future_value: f64,

    /// Gain over contributions at the end of the year
    pub total_return: f64,

    /// Balance deflated to start-of-accumulation purchasing power.
    /// Equals `future_value` when no inflation was supplied.
    pub real_value: f64,
}

/// Complete result of one deterministic projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Total contributions credited over the horizon, net of loading fees
    pub total_contributions: f64,

    /// Balance at the end of the horizon
    pub future_value: f64,

    /// `future_value - total_contributions`
    pub total_return: f64,

    /// Balance net of regressive IR withholding
    pub after_tax_value: f64,

    /// Age at the end of the horizon
    pub retirement_age: u32,

    /// Flat monthly compounding rate used, decimal
    pub monthly_rate: f64,

    /// Projection horizon in months (`years * 12`)
    pub total_months: u32,

    /// Inflation-deflated balance; `Some` only when inflation was supplied
    pub real_future_value: Option<f64>,

    /// Inflation-deflated after-tax value; `Some` only when inflation was supplied
    pub real_after_tax_value: Option<f64>,

    /// One snapshot per elapsed year
    pub yearly_evolution: Vec<YearlyEvolution>,
}

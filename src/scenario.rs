//! Scenario composition helpers: return-rate sensitivity and
//! fund-vs-benchmark comparison
//!
//! Thin consumers of the deterministic engine; each helper re-invokes
//! [`project`] with perturbed inputs and packages the results for display.

use serde::{Deserialize, Serialize};

use crate::funds::FundProfile;
use crate::projection::{project, ProjectionInput, ProjectionResult};

/// Spread applied to the base annual return for the sensitivity scenarios,
/// in percentage points
pub const SENSITIVITY_SPREAD_PCT: f64 = 2.0;

/// Base projection bracketed by pessimistic and optimistic return scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSet {
    /// Annual return used for the pessimistic case, percent (floored at 0)
    pub pessimistic_return_pct: f64,

    /// Annual return used for the optimistic case, percent
    pub optimistic_return_pct: f64,

    pub pessimistic: ProjectionResult,
    pub base: ProjectionResult,
    pub optimistic: ProjectionResult,
}

/// Project the same inputs under base, base-2p.p., and base+2p.p. returns.
pub fn run_sensitivity(input: &ProjectionInput) -> ScenarioSet {
    let pessimistic_return_pct = (input.annual_return_pct - SENSITIVITY_SPREAD_PCT).max(0.0);
    let optimistic_return_pct = input.annual_return_pct + SENSITIVITY_SPREAD_PCT;

    let pessimistic = project(&ProjectionInput {
        annual_return_pct: pessimistic_return_pct,
        ..input.clone()
    });
    let optimistic = project(&ProjectionInput {
        annual_return_pct: optimistic_return_pct,
        ..input.clone()
    });

    ScenarioSet {
        pessimistic_return_pct,
        optimistic_return_pct,
        pessimistic,
        base: project(input),
        optimistic,
    }
}

/// Caller-side parameters shared by every fund in a comparison; each fund
/// supplies its own fees, mean return, and tax regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonBasis {
    pub monthly_contribution: f64,
    pub years: u32,
    pub current_age: u32,
    #[serde(default)]
    pub inflation_pct: Option<f64>,
}

/// One fund's projected outcome under the shared basis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundComparison {
    pub fund: FundProfile,
    pub result: ProjectionResult,
}

/// Project every fund under the same contribution plan and rank by
/// after-tax value, best first.
pub fn compare_funds(basis: &ComparisonBasis, funds: &[FundProfile]) -> Vec<FundComparison> {
    let mut comparisons: Vec<FundComparison> = funds
        .iter()
        .map(|fund| {
            let result = project(&ProjectionInput {
                monthly_contribution: basis.monthly_contribution,
                annual_return_pct: fund.mean_return_pct,
                years: basis.years,
                current_age: basis.current_age,
                admin_fee_pct: fund.admin_fee_pct,
                loading_fee_pct: fund.loading_fee_pct,
                product_type: fund.product_type,
                inflation_pct: basis.inflation_pct,
            });
            FundComparison {
                fund: fund.clone(),
                result,
            }
        })
        .collect();

    comparisons.sort_by(|a, b| {
        b.result
            .after_tax_value
            .total_cmp(&a.result.after_tax_value)
    });
    comparisons
}

//! Core deterministic projection: one fixed-path month-by-month simulation

use super::input::ProjectionInput;
use super::results::{ProjectionResult, YearlyEvolution};
use super::state::AccountState;
use crate::tax;

/// Run one deterministic projection.
///
/// Pure arithmetic over the inputs: the engine never fails. NaN or infinity
/// from pathological fee/return combinations propagate through to the
/// result; callers are expected to pre-validate ranges and guarantee
/// `years >= 1`.
pub fn project(input: &ProjectionInput) -> ProjectionResult {
    let total_months = input.years * 12;
    let monthly_rate = input.annual_return_pct / 100.0 / 12.0;
    let loading_fee = input.loading_fee_pct / 100.0;
    let admin_fee = input.admin_fee_pct / 100.0;
    let inflation = input.inflation_pct.unwrap_or(0.0) / 100.0;

    let mut state = AccountState::new();
    let mut yearly_evolution = Vec::with_capacity(input.years as usize);

    for month in 1..=total_months {
        state.apply_month(
            input.monthly_contribution,
            loading_fee,
            admin_fee,
            monthly_rate,
        );

        if month % 12 == 0 {
            let year = month / 12;
            let deflator = (1.0 + inflation).powi(year as i32);
            yearly_evolution.push(YearlyEvolution {
                year,
                total_contributions: state.total_contributions,
                future_value: state.balance,
                total_return: state.total_return(),
                real_value: state.balance / deflator,
            });
        }
    }

    let future_value = state.balance;
    let total_return = state.total_return();
    let ir_amount = tax::withholding(input.product_type, future_value, total_return, total_months);
    let after_tax_value = future_value - ir_amount;

    let deflator = (1.0 + inflation).powi(input.years as i32);

    ProjectionResult {
        total_contributions: state.total_contributions,
        future_value,
        total_return,
        after_tax_value,
        retirement_age: input.current_age + input.years,
        monthly_rate,
        total_months,
        real_future_value: input.inflation_pct.map(|_| future_value / deflator),
        real_after_tax_value: input.inflation_pct.map(|_| after_tax_value / deflator),
        yearly_evolution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProductType;
    use approx::assert_relative_eq;

    fn base_input() -> ProjectionInput {
        ProjectionInput {
            monthly_contribution: 1000.0,
            annual_return_pct: 8.0,
            years: 10,
            current_age: 30,
            admin_fee_pct: 0.0,
            loading_fee_pct: 0.0,
            product_type: ProductType::Vgbl,
            inflation_pct: None,
        }
    }

    #[test]
    fn test_loading_fee_reduces_contributions() {
        let result = project(&ProjectionInput {
            monthly_contribution: 1000.0,
            annual_return_pct: 0.0,
            years: 1,
            loading_fee_pct: 5.0,
            ..base_input()
        });

        // 12 months of 950 net
        assert_relative_eq!(result.total_contributions, 11_400.0);
        assert_relative_eq!(result.future_value, 11_400.0);
    }

    #[test]
    fn test_zero_return_zero_fee_is_idempotent() {
        let result = project(&ProjectionInput {
            annual_return_pct: 0.0,
            ..base_input()
        });

        assert_relative_eq!(result.future_value, result.total_contributions);
        assert_relative_eq!(result.total_return, 0.0);
    }

    #[test]
    fn test_thirty_year_vgbl_reference_case() {
        let result = project(&ProjectionInput {
            monthly_contribution: 2000.0,
            annual_return_pct: 8.0,
            years: 30,
            current_age: 30,
            admin_fee_pct: 0.5,
            ..base_input()
        });

        assert_eq!(result.total_months, 360);
        assert_eq!(result.retirement_age, 60);
        assert_relative_eq!(result.total_contributions, 720_000.0, max_relative = 1e-9);
        assert!(result.future_value > 700_000.0);
        assert!(result.total_return > 0.0);

        // Beyond 120 months the regressive table bottoms out at 10% on gains
        let expected_after_tax = result.future_value - result.total_return * 0.10;
        assert_relative_eq!(result.after_tax_value, expected_after_tax, max_relative = 1e-9);
    }

    #[test]
    fn test_admin_fee_monotonicity() {
        let cheap = project(&ProjectionInput {
            admin_fee_pct: 0.5,
            ..base_input()
        });
        let expensive = project(&ProjectionInput {
            admin_fee_pct: 2.0,
            ..base_input()
        });

        assert!(expensive.future_value < cheap.future_value);
    }

    #[test]
    fn test_pgbl_taxes_more_than_vgbl() {
        let vgbl = project(&base_input());
        let pgbl = project(&ProjectionInput {
            product_type: ProductType::Pgbl,
            ..base_input()
        });

        // Identical paths, larger PGBL tax base whenever balance > gain
        assert_relative_eq!(pgbl.future_value, vgbl.future_value);
        assert!(pgbl.future_value > pgbl.total_return);
        assert!(pgbl.after_tax_value < vgbl.after_tax_value);
    }

    #[test]
    fn test_retirement_age() {
        let result = project(&ProjectionInput {
            years: 25,
            current_age: 35,
            ..base_input()
        });
        assert_eq!(result.retirement_age, 60);
    }

    #[test]
    fn test_large_values_stay_finite() {
        let result = project(&ProjectionInput {
            monthly_contribution: 10_000.0,
            annual_return_pct: 15.0,
            years: 40,
            current_age: 20,
            ..base_input()
        });

        assert!(result.future_value.is_finite());
        assert!(result.future_value > 0.0);
    }

    #[test]
    fn test_inflation_controls_real_fields() {
        let nominal = project(&base_input());
        assert!(nominal.real_future_value.is_none());
        assert!(nominal.real_after_tax_value.is_none());
        // Yearly snapshots deflate by 1.0 when inflation is absent
        let last = nominal.yearly_evolution.last().unwrap();
        assert_relative_eq!(last.real_value, last.future_value);

        let real = project(&ProjectionInput {
            inflation_pct: Some(4.0),
            ..base_input()
        });
        let deflator = 1.04_f64.powi(10);
        assert_relative_eq!(
            real.real_future_value.unwrap(),
            real.future_value / deflator,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            real.real_after_tax_value.unwrap(),
            real.after_tax_value / deflator,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_yearly_evolution_shape() {
        let result = project(&base_input());
        assert_eq!(result.yearly_evolution.len(), 10);
        assert_eq!(result.yearly_evolution[0].year, 1);
        assert_eq!(result.yearly_evolution[9].year, 10);

        // Final snapshot matches the terminal values
        let last = result.yearly_evolution.last().unwrap();
        assert_relative_eq!(last.future_value, result.future_value);
        assert_relative_eq!(last.total_contributions, result.total_contributions);
    }
}

//! Regressive income-tax (IR) withholding table for PGBL/VGBL products
//!
//! The withholding rate decreases with holding duration, from 35% under two
//! years down to 10% past ten years. Both the deterministic and the Monte
//! Carlo engine apply the same table through [`withholding`].

use crate::projection::ProductType;

/// Regressive IR rate for a holding duration in months.
///
/// Pure step function, total over `u32`. Callers supply the full
/// accumulation horizon (`years * 12`), typically 12 or more.
pub fn regressive_rate(months: u32) -> f64 {
    match months {
        0..=24 => 0.35,
        25..=48 => 0.30,
        49..=72 => 0.25,
        73..=96 => 0.20,
        97..=120 => 0.15,
        _ => 0.10,
    }
}

/// IR amount due at withdrawal.
///
/// PGBL contributions were tax-deductible, so the whole balance is taxed.
/// VGBL taxes only the gain over total contributions.
pub fn withholding(
    product_type: ProductType,
    future_value: f64,
    total_return: f64,
    months: u32,
) -> f64 {
    let tax_base = match product_type {
        ProductType::Pgbl => future_value,
        ProductType::Vgbl => total_return,
    };
    tax_base * regressive_rate(months)
}

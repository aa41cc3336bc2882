//! Monte Carlo engine: N independent stochastic trials over the shared
//! monthly update rule, aggregated into percentiles and per-year bands

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::params::{MonteCarloParams, MonteCarloResults, SimulationPath, YearlyBand};
use super::random::lognormal_annual_return;
use crate::error::SimulationError;
use crate::projection::AccountState;
use crate::tax;

/// Runs stochastic trials for one set of parameters.
///
/// Trials are embarrassingly parallel and run across the rayon pool, each
/// with its own seeded generator, so a fixed seed reproduces results
/// regardless of scheduling. Aggregation happens only after every trial
/// has completed.
pub struct MonteCarloEngine {
    params: MonteCarloParams,
}

impl MonteCarloEngine {
    pub fn new(params: MonteCarloParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MonteCarloParams {
        &self.params
    }

    /// Run all trials to completion with no observer.
    pub fn run(&self) -> Result<MonteCarloResults, SimulationError> {
        self.run_observed(|_| {}, &AtomicBool::new(false))
    }

    /// Run all trials, reporting advisory progress and honoring cancellation.
    ///
    /// `on_progress` is called with a 0..=100 percentage after each completed
    /// 10% block of trials; it must be cheap and non-blocking, and missed
    /// notifications are harmless. Setting `cancel` abandons the run with
    /// [`SimulationError::Cancelled`] and discards all partial work.
    pub fn run_observed<F>(
        &self,
        on_progress: F,
        cancel: &AtomicBool,
    ) -> Result<MonteCarloResults, SimulationError>
    where
        F: Fn(u8) + Sync,
    {
        let params = &self.params;
        if params.years < 1 {
            return Err(SimulationError::InvalidHorizon(params.years));
        }
        if params.num_simulations == 0 {
            return Err(SimulationError::NoTrials);
        }

        let n = params.num_simulations;
        let base_seed = params.seed.unwrap_or_else(|| rand::rng().random());
        info!(
            "Monte Carlo run: {} trials, {} years, mean {:.2}%, vol {:.2}%",
            n,
            params.years,
            params.mean_return * 100.0,
            params.volatility * 100.0
        );

        let completed = AtomicUsize::new(0);
        let block = n.div_ceil(10);

        let paths: Vec<SimulationPath> = (0..n)
            .into_par_iter()
            .map(|trial| {
                if cancel.load(Ordering::Relaxed) {
                    return Err(SimulationError::Cancelled);
                }

                let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(trial as u64));
                let path = self.simulate_path(&mut rng);

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % block == 0 || done == n {
                    on_progress((done * 100 / n) as u8);
                }
                Ok(path)
            })
            .collect::<Result<_, _>>()?;

        let mut after_tax: Vec<f64> = paths.iter().map(|p| p.after_tax_value).collect();
        after_tax.sort_by(f64::total_cmp);
        let mean = after_tax.iter().sum::<f64>() / n as f64;

        Ok(MonteCarloResults {
            percentile5: nearest_rank(&after_tax, 0.05),
            percentile50: nearest_rank(&after_tax, 0.50),
            percentile95: nearest_rank(&after_tax, 0.95),
            mean,
            paths,
        })
    }

    /// One stochastic trial: the deterministic monthly update rule, but with
    /// a fresh lognormal annual return drawn at the first month of every
    /// simulated year and held for that year's remaining months.
    fn simulate_path(&self, rng: &mut SmallRng) -> SimulationPath {
        let params = &self.params;
        let total_months = params.years * 12;

        let mut state = AccountState::new();
        let mut yearly_values = Vec::with_capacity(params.years as usize);
        let mut monthly_rate = 0.0;

        for month in 1..=total_months {
            if month % 12 == 1 {
                let annual_return =
                    lognormal_annual_return(rng, params.mean_return, params.volatility);
                monthly_rate = (1.0 + annual_return).powf(1.0 / 12.0) - 1.0;
            }

            state.apply_month(
                params.monthly_contribution,
                params.loading_fee,
                params.admin_fee,
                monthly_rate,
            );

            if month % 12 == 0 {
                yearly_values.push(state.balance);
            }
        }

        let future_value = state.balance;
        let ir_amount = tax::withholding(
            params.product_type,
            future_value,
            state.total_return(),
            total_months,
        );

        SimulationPath {
            future_value,
            after_tax_value: future_value - ir_amount,
            yearly_values,
        }
    }
}

/// Nearest-rank percentile over an ascending-sorted slice: index truncation
/// at `floor(len * p)`, no interpolation.
fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    let idx = (sorted.len() as f64 * percentile) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Per-year confidence bands across all paths.
///
/// For each simulated year, gathers that year's balance from every path,
/// sorts, and extracts the 5/25/50/75/95 percentiles. Post-processing over
/// a completed run; independent of the final-value percentiles.
pub fn yearly_bands(paths: &[SimulationPath]) -> Vec<YearlyBand> {
    let Some(first) = paths.first() else {
        return Vec::new();
    };

    (0..first.yearly_values.len())
        .map(|year_idx| {
            let mut values: Vec<f64> = paths.iter().map(|p| p.yearly_values[year_idx]).collect();
            values.sort_by(f64::total_cmp);

            YearlyBand {
                year: year_idx as u32 + 1,
                p5: nearest_rank(&values, 0.05),
                p25: nearest_rank(&values, 0.25),
                p50: nearest_rank(&values, 0.50),
                p75: nearest_rank(&values, 0.75),
                p95: nearest_rank(&values, 0.95),
            }
        })
        .collect()
}

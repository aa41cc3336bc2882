//! prevsim CLI
//!
//! Command-line interface for running deterministic projections, Monte
//! Carlo simulations, and fund comparisons

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use prevsim::montecarlo::{yearly_bands, MonteCarloParams};
use prevsim::projection::{project, ProductType, ProjectionInput, ProjectionResult};
use prevsim::scenario::{compare_funds, run_sensitivity, ComparisonBasis};
use prevsim::worker::{SimulationRequest, SimulationResponse, SimulationWorker};
use prevsim::funds;

#[derive(Debug, Parser)]
#[command(name = "prevsim", version, about = "Retirement-savings projection and simulation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProductArg {
    Pgbl,
    Vgbl,
}

impl From<ProductArg> for ProductType {
    fn from(arg: ProductArg) -> Self {
        match arg {
            ProductArg::Pgbl => ProductType::Pgbl,
            ProductArg::Vgbl => ProductType::Vgbl,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one deterministic projection (rates and fees in percent)
    Project {
        #[arg(long)]
        monthly_contribution: f64,
        /// Nominal annual return, percent (8 = 8% a.a.)
        #[arg(long)]
        annual_return: f64,
        #[arg(long)]
        years: u32,
        #[arg(long)]
        age: u32,
        /// Annual administration fee, percent
        #[arg(long, default_value_t = 0.0)]
        admin_fee: f64,
        /// Loading fee per contribution, percent
        #[arg(long, default_value_t = 0.0)]
        loading_fee: f64,
        #[arg(long, value_enum, default_value_t = ProductArg::Vgbl)]
        product: ProductArg,
        /// Annual inflation, percent; enables real-value output
        #[arg(long)]
        inflation: Option<f64>,
        /// Also print pessimistic/optimistic sensitivity scenarios
        #[arg(long)]
        scenarios: bool,
        /// Write the yearly evolution to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run a Monte Carlo simulation (rates and fees as decimals)
    MonteCarlo {
        #[arg(long)]
        monthly_contribution: f64,
        /// Expected annual return, decimal (0.08 = 8% a.a.)
        #[arg(long)]
        mean_return: f64,
        /// Annual volatility, decimal
        #[arg(long)]
        volatility: f64,
        #[arg(long)]
        years: u32,
        #[arg(long)]
        age: u32,
        /// Annual administration fee, decimal
        #[arg(long, default_value_t = 0.0)]
        admin_fee: f64,
        /// Loading fee per contribution, decimal
        #[arg(long, default_value_t = 0.0)]
        loading_fee: f64,
        #[arg(long, value_enum, default_value_t = ProductArg::Vgbl)]
        product: ProductArg,
        #[arg(long, default_value_t = prevsim::montecarlo::DEFAULT_NUM_SIMULATIONS)]
        simulations: usize,
        /// Fixed seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Print aggregate results as JSON (paths omitted)
        #[arg(long)]
        json: bool,
    },

    /// Compare funds and benchmarks under the same contribution plan
    Compare {
        #[arg(long)]
        monthly_contribution: f64,
        #[arg(long)]
        years: u32,
        #[arg(long)]
        age: u32,
        /// Annual inflation, percent
        #[arg(long)]
        inflation: Option<f64>,
        /// Load the fund catalog from a CSV file instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Current Selic rate, percent a.a., for the benchmarks
        #[arg(long, default_value_t = 10.5)]
        selic: f64,
        /// Current IPCA rate, percent a.a., for the benchmarks
        #[arg(long, default_value_t = 4.5)]
        ipca: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Project {
            monthly_contribution,
            annual_return,
            years,
            age,
            admin_fee,
            loading_fee,
            product,
            inflation,
            scenarios,
            csv,
            json,
        } => {
            let input = ProjectionInput {
                monthly_contribution,
                annual_return_pct: annual_return,
                years,
                current_age: age,
                admin_fee_pct: admin_fee,
                loading_fee_pct: loading_fee,
                product_type: product.into(),
                inflation_pct: inflation,
            };
            run_project(&input, scenarios, csv, json)
        }
        Command::MonteCarlo {
            monthly_contribution,
            mean_return,
            volatility,
            years,
            age,
            admin_fee,
            loading_fee,
            product,
            simulations,
            seed,
            json,
        } => {
            let params = MonteCarloParams {
                monthly_contribution,
                mean_return,
                volatility,
                years,
                current_age: age,
                admin_fee,
                loading_fee,
                product_type: product.into(),
                inflation: None,
                num_simulations: simulations,
                seed,
            };
            run_monte_carlo(params, json)
        }
        Command::Compare {
            monthly_contribution,
            years,
            age,
            inflation,
            catalog,
            selic,
            ipca,
        } => run_compare(
            ComparisonBasis {
                monthly_contribution,
                years,
                current_age: age,
                inflation_pct: inflation,
            },
            catalog,
            selic,
            ipca,
        ),
    }
}

fn run_project(
    input: &ProjectionInput,
    scenarios: bool,
    csv: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let result = project(input);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_projection_summary(&result);
    }

    if scenarios {
        let set = run_sensitivity(input);
        println!("\nSensitivity (±2 p.p. on the annual return):");
        println!(
            "  Pessimistic ({:>5.2}% a.a.): R$ {:>14.2}",
            set.pessimistic_return_pct, set.pessimistic.after_tax_value
        );
        println!(
            "  Base        ({:>5.2}% a.a.): R$ {:>14.2}",
            input.annual_return_pct, set.base.after_tax_value
        );
        println!(
            "  Optimistic  ({:>5.2}% a.a.): R$ {:>14.2}",
            set.optimistic_return_pct, set.optimistic.after_tax_value
        );
    }

    if let Some(path) = csv {
        write_yearly_csv(&result, &path)?;
        println!("\nYearly evolution written to: {}", path.display());
    }

    Ok(())
}

fn print_projection_summary(result: &ProjectionResult) {
    println!("Projection Results ({} months):", result.total_months);
    println!("  Retirement age:      {}", result.retirement_age);
    println!("  Total contributions: R$ {:>14.2}", result.total_contributions);
    println!("  Future value:        R$ {:>14.2}", result.future_value);
    println!("  Total return:        R$ {:>14.2}", result.total_return);
    println!("  After-tax value:     R$ {:>14.2}", result.after_tax_value);
    if let (Some(real_fv), Some(real_at)) = (result.real_future_value, result.real_after_tax_value)
    {
        println!("  Real future value:   R$ {:>14.2}", real_fv);
        println!("  Real after-tax:      R$ {:>14.2}", real_at);
    }
}

fn write_yearly_csv(result: &ProjectionResult, path: &std::path::Path) -> anyhow::Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;

    writeln!(file, "Year,TotalContributions,FutureValue,TotalReturn,RealValue")?;
    for row in &result.yearly_evolution {
        writeln!(
            file,
            "{},{:.2},{:.2},{:.2},{:.2}",
            row.year, row.total_contributions, row.future_value, row.total_return, row.real_value,
        )?;
    }
    Ok(())
}

fn run_monte_carlo(params: MonteCarloParams, json: bool) -> anyhow::Result<()> {
    let num_trials = params.num_simulations;
    let years = params.years;

    let worker = SimulationWorker::new();
    if !worker.send(SimulationRequest::MonteCarlo(Box::new(params))) {
        anyhow::bail!("simulation worker is not running");
    }

    println!("Running {num_trials} trials over {years} years...");

    let results = loop {
        match worker.recv_timeout(Duration::from_secs(300)) {
            Some(SimulationResponse::Progress { percent }) => {
                println!("  {percent:>3}%");
            }
            Some(SimulationResponse::Complete(results)) => break *results,
            Some(SimulationResponse::Error(message)) => anyhow::bail!("simulation failed: {message}"),
            Some(SimulationResponse::Cancelled) => anyhow::bail!("simulation cancelled"),
            None => anyhow::bail!("simulation timed out"),
        }
    };

    if json {
        #[derive(serde::Serialize)]
        struct Aggregate<'a> {
            percentile5: f64,
            percentile50: f64,
            percentile95: f64,
            mean: f64,
            bands: &'a [prevsim::montecarlo::YearlyBand],
        }
        let bands = yearly_bands(&results.paths);
        println!(
            "{}",
            serde_json::to_string_pretty(&Aggregate {
                percentile5: results.percentile5,
                percentile50: results.percentile50,
                percentile95: results.percentile95,
                mean: results.mean,
                bands: &bands,
            })?
        );
        return Ok(());
    }

    println!("\nAfter-tax outcome across {num_trials} trials:");
    println!("  P5  (worst case):  R$ {:>14.2}", results.percentile5);
    println!("  P50 (median):      R$ {:>14.2}", results.percentile50);
    println!("  P95 (best case):   R$ {:>14.2}", results.percentile95);
    println!("  Mean:              R$ {:>14.2}", results.mean);

    println!("\nPer-year bands:");
    println!(
        "{:>5} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Year", "P5", "P25", "P50", "P75", "P95"
    );
    for band in yearly_bands(&results.paths) {
        println!(
            "{:>5} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            band.year, band.p5, band.p25, band.p50, band.p75, band.p95
        );
    }

    Ok(())
}

fn run_compare(
    basis: ComparisonBasis,
    catalog_path: Option<PathBuf>,
    selic: f64,
    ipca: f64,
) -> anyhow::Result<()> {
    let mut catalog = match catalog_path {
        Some(path) => funds::load_catalog(&path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => funds::default_catalog(),
    };
    catalog.extend(funds::benchmarks(selic, ipca));

    let comparisons = compare_funds(&basis, &catalog);

    println!(
        "Fund comparison: R$ {:.2}/month over {} years",
        basis.monthly_contribution, basis.years
    );
    println!(
        "{:>3} {:<34} {:>6} {:>9} {:>16} {:>16}",
        "#", "Fund", "Type", "Return%", "FutureValue", "AfterTax"
    );
    for (rank, comparison) in comparisons.iter().enumerate() {
        println!(
            "{:>3} {:<34} {:>6} {:>9.2} {:>16.2} {:>16.2}",
            rank + 1,
            comparison.fund.name,
            match comparison.fund.product_type {
                ProductType::Pgbl => "PGBL",
                ProductType::Vgbl => "VGBL",
            },
            comparison.fund.mean_return_pct,
            comparison.result.future_value,
            comparison.result.after_tax_value,
        );
    }

    if let (Some(best), Some(worst)) = (comparisons.first(), comparisons.last()) {
        println!(
            "\nSpread between best and worst: R$ {:.2}",
            best.result.after_tax_value - worst.result.after_tax_value
        );
    }

    Ok(())
}

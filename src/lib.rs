//! prevsim - Retirement-savings projection and Monte Carlo simulation engine
//!
//! This library provides:
//! - Deterministic month-by-month accumulation projections under
//!   contribution, fee, and PGBL/VGBL tax rules
//! - Monte Carlo simulation over the same monthly update rule with
//!   lognormal annual returns, percentile summaries, and per-year bands
//! - A background worker exposing the asynchronous run protocol
//!   (progress / complete / error / cancelled)
//! - Scenario helpers: return-rate sensitivity and fund-vs-benchmark
//!   comparison

pub mod error;
pub mod funds;
pub mod montecarlo;
pub mod projection;
pub mod rates;
pub mod scenario;
pub mod tax;
pub mod worker;

// Re-export commonly used types
pub use error::SimulationError;
pub use montecarlo::{MonteCarloEngine, MonteCarloParams, MonteCarloResults};
pub use projection::{project, ProductType, ProjectionInput, ProjectionResult};
pub use worker::{SimulationRequest, SimulationResponse, SimulationWorker};

//! Error types for simulation runs and catalog loading

use thiserror::Error;

/// Failure of a Monte Carlo run.
///
/// The projection engine itself never fails; these cover malformed run
/// parameters and caller-requested cancellation. The worker boundary maps
/// them to a single terminal error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Horizon shorter than one year cannot produce a yearly path
    #[error("projection horizon must be at least 1 year, got {0}")]
    InvalidHorizon(u32),

    /// Percentile extraction needs at least one trial
    #[error("at least one simulation trial is required")]
    NoTrials,

    /// The run was abandoned at the caller's request
    #[error("simulation cancelled")]
    Cancelled,
}

/// Failure to load a fund catalog from CSV
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read fund catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed fund catalog row: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown product type {0:?} (expected PGBL or VGBL)")]
    UnknownProductType(String),
}

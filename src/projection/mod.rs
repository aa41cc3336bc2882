//! Deterministic projection engine for monthly accumulation simulations

mod engine;
mod input;
mod results;
mod state;

pub use engine::project;
pub use input::{ProductType, ProjectionInput};
pub use results::{ProjectionResult, YearlyEvolution};
pub use state::AccountState;

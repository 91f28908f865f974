//! Projection engine producing balance and contribution series

mod engine;
mod labels;
mod series;

pub use engine::{
    InputError, ProjectionConfig, ProjectionEngine, ProjectionInput, MAX_PERIODS,
};
pub use labels::period_label;
pub use series::{ProjectionResult, ProjectionRow, ProjectionSummary};

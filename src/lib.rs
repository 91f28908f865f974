//! Investment System - Projection engine for recurring investments with benchmark-indexed rates
//!
//! This library provides:
//! - Rate resolution across manual, SELIC-indexed, and CDI-composite sources
//! - Latest-observation lookup against the Banco Central SGS service
//! - Balance and contribution series projection with calendar period labels
//! - Chart-facing series and axis models for the frontend
//! - Session coordination with last-request-wins resolution ordering
//! - Batch scenario runs from CSV

pub mod chart;
pub mod projection;
pub mod provider;
pub mod rates;
pub mod scenario;
pub mod session;

// Re-export commonly used types
pub use chart::ChartModel;
pub use projection::{InputError, ProjectionEngine, ProjectionInput, ProjectionResult};
pub use provider::{FixedProvider, IndexProvider, IndexSeries, Observation, SgsClient};
pub use rates::{Cadence, RateResolver, RateSource, ResolvedRate};
pub use session::RateSession;

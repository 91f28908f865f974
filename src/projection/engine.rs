//! Core projection engine for balance and contribution trajectories

use chrono::NaiveDate;
use thiserror::Error;

use super::labels::period_label;
use super::series::{ProjectionResult, ProjectionRow};
use crate::rates::ResolvedRate;

/// Longest accepted horizon, in periods
pub const MAX_PERIODS: u32 = 1200;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy)]
pub struct ProjectionConfig {
    /// Date labels are generated from (the caller's "today")
    pub start_date: NaiveDate,
}

impl ProjectionConfig {
    pub fn starting(start_date: NaiveDate) -> Self {
        Self { start_date }
    }
}

/// Input for one projection run
///
/// Building an input requires a `ResolvedRate`; a rate that failed to
/// resolve never reaches the engine as a number.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput {
    /// Initial capital, present from period 0
    pub capital: f64,

    /// Amount added at the end of every later period; negative means a
    /// periodic withdrawal, which the engine does not forbid
    pub contribution: f64,

    /// Periodic rate produced by rate resolution
    pub rate: ResolvedRate,

    /// Number of periods to project
    pub periods: u32,
}

/// Input rejected before the projection runs
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("capital must be a finite number, got {0}")]
    NonFiniteCapital(f64),

    #[error("capital must not be negative, got {0}")]
    NegativeCapital(f64),

    #[error("contribution must be a finite number, got {0}")]
    NonFiniteContribution(f64),

    #[error("rate must be a finite fraction, got {0}")]
    NonFiniteRate(f64),

    #[error("horizon of {0} periods exceeds the maximum of {MAX_PERIODS}")]
    HorizonTooLong(u32),

    #[error("no resolved rate is available")]
    MissingRate,
}

impl ProjectionInput {
    /// Check numeric sanity; runs before any arithmetic
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.capital.is_finite() {
            return Err(InputError::NonFiniteCapital(self.capital));
        }
        if self.capital < 0.0 {
            return Err(InputError::NegativeCapital(self.capital));
        }
        if !self.contribution.is_finite() {
            return Err(InputError::NonFiniteContribution(self.contribution));
        }
        if !self.rate.fraction().is_finite() {
            return Err(InputError::NonFiniteRate(self.rate.fraction()));
        }
        if self.periods > MAX_PERIODS {
            return Err(InputError::HorizonTooLong(self.periods));
        }
        Ok(())
    }
}

/// Main projection engine
///
/// Pure and synchronous: identical input yields identical output, and no
/// state survives between calls.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project the balance and contribution series over the horizon
    ///
    /// End-of-period compounding: growth applies first, then the
    /// contribution lands. The same step formula runs for both cadences;
    /// cadence changes the labels only.
    pub fn project(&self, input: &ProjectionInput) -> Result<ProjectionResult, InputError> {
        input.validate()?;

        let cadence = input.rate.cadence();
        let rate = input.rate.fraction();
        let mut result = ProjectionResult::with_capacity(cadence, input.periods);

        let mut balance = input.capital;
        let mut contributed = input.capital;

        for t in 0..=input.periods {
            if t > 0 {
                balance = balance * (1.0 + rate) + input.contribution;
                contributed += input.contribution;
            }
            result.push(ProjectionRow {
                period: t,
                label: period_label(self.config.start_date, cadence, t),
                balance,
                contributed,
            });
        }

        Ok(result)
    }
}

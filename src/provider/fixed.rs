//! In-memory provider with preset observations
//!
//! Serves fixed index levels without touching the network, for offline runs
//! and tests. A series with no preset observation reports an empty series,
//! the same outcome a live lookup would produce.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{IndexProvider, IndexSeries, Observation, ProviderError};

/// Provider backed by a fixed observation table
#[derive(Debug, Clone, Default)]
pub struct FixedProvider {
    observations: HashMap<IndexSeries, Observation>,
}

impl FixedProvider {
    /// Empty provider; every lookup reports an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset observations resembling published mid-2025 levels
    pub fn default_levels() -> Self {
        let reference_date = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid literal date");
        Self::new()
            .with(
                IndexSeries::Selic,
                Observation {
                    value: 15.0,
                    reference_date,
                },
            )
            .with(
                IndexSeries::Cdi,
                Observation {
                    value: 0.055131,
                    reference_date,
                },
            )
    }

    /// Insert or replace the observation served for a series
    pub fn with(mut self, series: IndexSeries, observation: Observation) -> Self {
        self.observations.insert(series, observation);
        self
    }
}

#[async_trait]
impl IndexProvider for FixedProvider {
    async fn fetch_latest(&self, series: IndexSeries) -> Result<Observation, ProviderError> {
        self.observations
            .get(&series)
            .copied()
            .ok_or(ProviderError::EmptySeries {
                series: series.sgs_code(),
            })
    }
}

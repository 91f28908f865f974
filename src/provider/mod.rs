//! Benchmark index lookup boundary
//!
//! Retrieves the single most recent published observation of an economic
//! index. All transport and parse failures are normalized here; nothing past
//! this boundary ever sees a raw transport fault or a made-up value.

mod fixed;
mod sgs;

pub use fixed::FixedProvider;
pub use sgs::SgsClient;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Published benchmark series consumed by rate resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexSeries {
    /// SELIC target rate, published as an annual percentage
    Selic,
    /// CDI rate, published as a daily percentage
    Cdi,
}

/// Period base of a published value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodBase {
    Annual,
    Daily,
}

impl IndexSeries {
    /// Series code in the Banco Central SGS catalog
    pub fn sgs_code(&self) -> u32 {
        match self {
            IndexSeries::Selic => 1178,
            IndexSeries::Cdi => 12,
        }
    }

    pub fn period_base(&self) -> PeriodBase {
        match self {
            IndexSeries::Selic => PeriodBase::Annual,
            IndexSeries::Cdi => PeriodBase::Daily,
        }
    }
}

/// Most recent published observation of a series
///
/// `value` is the percentage exactly as published (e.g. `13.25` for SELIC,
/// `0.045` for a daily CDI rate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub value: f64,
    pub reference_date: NaiveDate,
}

/// Failures normalized at the provider boundary
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error fetching series {series}: {source}")]
    Network {
        series: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("series {series} returned HTTP status {status}")]
    Status { series: u32, status: u16 },

    #[error("series {series} returned no observations")]
    EmptySeries { series: u32 },

    #[error("series {series} returned a malformed payload: {detail}")]
    Malformed { series: u32, detail: String },
}

/// Source of latest index observations
///
/// One network round trip per call. Implementations must convert every
/// failure mode into a `ProviderError` rather than returning a stale or
/// default value.
#[async_trait]
pub trait IndexProvider: Send + Sync {
    async fn fetch_latest(&self, series: IndexSeries) -> Result<Observation, ProviderError>;
}

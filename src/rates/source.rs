//! Rate-source selection model

use serde::{Deserialize, Serialize};

use crate::provider::IndexSeries;

/// Whether projection periods represent years or months
///
/// Cadence drives period labels only; the compounding arithmetic is
/// identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Annual,
    Monthly,
}

/// Selected source for the projection interest rate
///
/// Exactly one variant is active at a time; each carries only the data it
/// needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateSource {
    /// User-typed periodic rate, already in its period base
    Manual { rate_percent: f64, cadence: Cadence },

    /// Latest published annual rate of the series, used verbatim
    AnnualIndex { series: IndexSeries },

    /// Latest published daily rate, compounded to an effective annual rate
    /// and scaled by the participation percentage
    DailyIndexComposite {
        series: IndexSeries,
        participation_percent: f64,
    },
}

impl RateSource {
    /// Manual selection in the given period base
    pub fn manual(rate_percent: f64, cadence: Cadence) -> Self {
        RateSource::Manual {
            rate_percent,
            cadence,
        }
    }

    /// SELIC selection
    pub fn selic() -> Self {
        RateSource::AnnualIndex {
            series: IndexSeries::Selic,
        }
    }

    /// CDI selection at the given participation percentage
    pub fn cdi(participation_percent: f64) -> Self {
        RateSource::DailyIndexComposite {
            series: IndexSeries::Cdi,
            participation_percent,
        }
    }

    /// Cadence implied by the selection; indexed sources are always annual
    pub fn cadence(&self) -> Cadence {
        match self {
            RateSource::Manual { cadence, .. } => *cadence,
            RateSource::AnnualIndex { .. } | RateSource::DailyIndexComposite { .. } => {
                Cadence::Annual
            }
        }
    }
}

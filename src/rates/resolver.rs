//! Rate resolution across the three source kinds
//!
//! Normalizes a manual percentage, a published annual benchmark, or a
//! published daily benchmark into one periodic decimal rate. Indexed
//! sources suspend on a provider round trip; an observation that cannot be
//! obtained surfaces as `RateUnavailable`, never as a substitute number.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::source::{Cadence, RateSource};
use crate::provider::{IndexProvider, ProviderError};

/// Business periods per year used to compound a daily rate to annual
pub const BUSINESS_DAYS_PER_YEAR: i32 = 252;

/// Participation applied when the configured percentage is not a number
pub const DEFAULT_PARTICIPATION_PERCENT: f64 = 100.0;

/// Periodic interest rate as a decimal fraction, tagged with its cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRate {
    fraction: f64,
    cadence: Cadence,
}

impl ResolvedRate {
    pub fn new(fraction: f64, cadence: Cadence) -> Self {
        Self { fraction, cadence }
    }

    /// Rate applied once per projection period
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Rate as the percentage a rate field displays
    pub fn as_percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Rate resolution failed; the provider cause stays attached for logging
#[derive(Debug, Error)]
#[error("rate unavailable: {source}")]
pub struct RateUnavailable {
    #[from]
    source: ProviderError,
}

/// Turns a rate-source selection into one periodic decimal rate
#[derive(Debug, Clone)]
pub struct RateResolver<P> {
    provider: P,
}

impl<P: IndexProvider> RateResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Resolve the selection to a periodic rate
    ///
    /// Manual sources resolve without touching the provider and cannot fail.
    /// A participation change on a daily-indexed source re-resolves by
    /// fetching a fresh sample; nothing is cached between calls, and
    /// resolution never mutates projection state.
    pub async fn resolve(&self, source: &RateSource) -> Result<ResolvedRate, RateUnavailable> {
        match source {
            RateSource::Manual {
                rate_percent,
                cadence,
            } => Ok(ResolvedRate::new(rate_percent / 100.0, *cadence)),

            RateSource::AnnualIndex { series } => {
                let observation = self.provider.fetch_latest(*series).await?;
                debug!(
                    "series {} published {}% a.a. on {}",
                    series.sgs_code(),
                    observation.value,
                    observation.reference_date
                );
                Ok(ResolvedRate::new(observation.value / 100.0, Cadence::Annual))
            }

            RateSource::DailyIndexComposite {
                series,
                participation_percent,
            } => {
                let observation = self.provider.fetch_latest(*series).await?;
                let annual = composite_annual_rate(observation.value, *participation_percent);
                debug!(
                    "series {} published {}% a.d. on {}; composite annual rate {:.6}",
                    series.sgs_code(),
                    observation.value,
                    observation.reference_date,
                    annual
                );
                Ok(ResolvedRate::new(annual, Cadence::Annual))
            }
        }
    }
}

/// Compound a published daily percentage into an effective annual rate and
/// scale it by the participation percentage
///
/// A daily rate of 0.045% at 100% participation compounds to
/// `(1.00045)^252 - 1`, about 12% a year.
pub fn composite_annual_rate(daily_percent: f64, participation_percent: f64) -> f64 {
    let participation = if participation_percent.is_finite() {
        participation_percent
    } else {
        DEFAULT_PARTICIPATION_PERCENT
    };

    let daily = daily_percent / 100.0;
    let effective_annual = (1.0 + daily).powi(BUSINESS_DAYS_PER_YEAR) - 1.0;

    effective_annual * (participation / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{FixedProvider, IndexSeries, Observation};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn cdi_provider(daily_percent: f64) -> FixedProvider {
        FixedProvider::new().with(
            IndexSeries::Cdi,
            Observation {
                value: daily_percent,
                reference_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            },
        )
    }

    #[tokio::test]
    async fn manual_percent_becomes_fraction() {
        let resolver = RateResolver::new(FixedProvider::new());
        let rate = resolver
            .resolve(&RateSource::manual(12.0, Cadence::Annual))
            .await
            .unwrap();

        assert_relative_eq!(rate.fraction(), 0.12);
        assert_eq!(rate.cadence(), Cadence::Annual);
    }

    #[tokio::test]
    async fn manual_resolution_ignores_provider_state() {
        // Provider has nothing to serve; manual still resolves.
        let resolver = RateResolver::new(FixedProvider::new());
        let rate = resolver
            .resolve(&RateSource::manual(0.8, Cadence::Monthly))
            .await
            .unwrap();

        assert_relative_eq!(rate.fraction(), 0.008);
        assert_eq!(rate.cadence(), Cadence::Monthly);
    }

    #[tokio::test]
    async fn annual_index_uses_observation_verbatim() {
        let provider = FixedProvider::new().with(
            IndexSeries::Selic,
            Observation {
                value: 13.25,
                reference_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            },
        );
        let resolver = RateResolver::new(provider);
        let rate = resolver.resolve(&RateSource::selic()).await.unwrap();

        assert_relative_eq!(rate.fraction(), 0.1325);
        assert_eq!(rate.cadence(), Cadence::Annual);
    }

    #[tokio::test]
    async fn daily_index_compounds_over_business_days() {
        let resolver = RateResolver::new(cdi_provider(0.045));
        let rate = resolver.resolve(&RateSource::cdi(100.0)).await.unwrap();

        // (1.00045)^252 - 1
        assert_relative_eq!(rate.fraction(), 0.1200513, epsilon = 1e-6);
    }

    #[tokio::test]
    async fn participation_scales_composite_rate() {
        let resolver = RateResolver::new(cdi_provider(0.045));
        let full = resolver.resolve(&RateSource::cdi(100.0)).await.unwrap();
        let partial = resolver.resolve(&RateSource::cdi(90.0)).await.unwrap();

        assert_relative_eq!(partial.fraction(), full.fraction() * 0.9, epsilon = 1e-12);
    }

    #[tokio::test]
    async fn non_numeric_participation_defaults_to_full() {
        let resolver = RateResolver::new(cdi_provider(0.045));
        let defaulted = resolver.resolve(&RateSource::cdi(f64::NAN)).await.unwrap();
        let full = resolver.resolve(&RateSource::cdi(100.0)).await.unwrap();

        assert_relative_eq!(defaulted.fraction(), full.fraction());
    }

    #[tokio::test]
    async fn provider_failure_propagates_as_unavailable() {
        let resolver = RateResolver::new(FixedProvider::new());
        let err = resolver.resolve(&RateSource::selic()).await.unwrap_err();

        assert!(err.to_string().contains("no observations"));
    }

    #[test]
    fn composite_rate_examples() {
        assert_relative_eq!(composite_annual_rate(0.045, 100.0), 0.1200513, epsilon = 1e-6);
        assert_relative_eq!(
            composite_annual_rate(0.045, 90.0),
            0.1200513 * 0.9,
            epsilon = 1e-6
        );
        assert_relative_eq!(composite_annual_rate(0.0, 100.0), 0.0);
    }

    #[test]
    fn percent_display_round_trip() {
        let rate = ResolvedRate::new(0.1325, Cadence::Annual);
        assert_relative_eq!(rate.as_percent(), 13.25);
    }
}

//! Interactive session coordination
//!
//! Owns the single current rate-source selection and the single current
//! resolved rate, and serializes concurrent resolutions with a
//! last-request-wins discipline: every request takes a fresh token, and a
//! completion whose token is no longer the newest is discarded. The stored
//! rate therefore always reflects the most recently initiated request,
//! regardless of completion order, without relying on transport
//! cancellation.

use chrono::NaiveDate;
use log::{debug, warn};
use tokio::sync::RwLock;

use crate::projection::{
    InputError, ProjectionConfig, ProjectionEngine, ProjectionInput, ProjectionResult,
};
use crate::provider::IndexProvider;
use crate::rates::{Cadence, RateResolver, RateSource, ResolvedRate};

/// Coordinates rate selection, resolution, and projection for one user
pub struct RateSession<P> {
    resolver: RateResolver<P>,
    engine: ProjectionEngine,
    state: RwLock<RateSlot>,
}

#[derive(Debug, Clone, Copy)]
struct RateSlot {
    source: RateSource,
    resolved: Option<ResolvedRate>,
    /// Token of the most recently initiated resolution request
    issued: u64,
}

impl<P: IndexProvider> RateSession<P> {
    /// Session starting on an unresolved manual selection
    pub fn new(provider: P, start_date: NaiveDate) -> Self {
        Self {
            resolver: RateResolver::new(provider),
            engine: ProjectionEngine::new(ProjectionConfig::starting(start_date)),
            state: RwLock::new(RateSlot {
                source: RateSource::manual(0.0, Cadence::Annual),
                resolved: None,
                issued: 0,
            }),
        }
    }

    /// Change the rate-source selection and resolve it
    ///
    /// The previous resolved value is cleared before the resolution starts,
    /// so a stale rate from another variant is never visible while the new
    /// one is in flight. Returns the applied rate, or `None` when the
    /// outcome was superseded or the source was unavailable.
    pub async fn select_source(&self, source: RateSource) -> Option<ResolvedRate> {
        let token = {
            let mut slot = self.state.write().await;
            slot.issued += 1;
            slot.source = source;
            slot.resolved = None;
            slot.issued
        };
        self.resolve_with_token(token, source).await
    }

    /// Update the participation percentage of an active daily-indexed
    /// selection, triggering a fresh resolution
    ///
    /// Returns `None` without issuing a request when another variant is
    /// active.
    pub async fn set_participation(&self, participation_percent: f64) -> Option<ResolvedRate> {
        let (token, source) = {
            let mut slot = self.state.write().await;
            let source = match slot.source {
                RateSource::DailyIndexComposite { series, .. } => {
                    RateSource::DailyIndexComposite {
                        series,
                        participation_percent,
                    }
                }
                _ => return None,
            };
            slot.issued += 1;
            slot.source = source;
            slot.resolved = None;
            (slot.issued, source)
        };
        self.resolve_with_token(token, source).await
    }

    async fn resolve_with_token(&self, token: u64, source: RateSource) -> Option<ResolvedRate> {
        let outcome = self.resolver.resolve(&source).await;

        let mut slot = self.state.write().await;
        if token != slot.issued {
            debug!(
                "discarding superseded resolution request {token} (newest is {})",
                slot.issued
            );
            return None;
        }

        match outcome {
            Ok(rate) => {
                slot.resolved = Some(rate);
                Some(rate)
            }
            Err(err) => {
                // The rate field stays empty; the user may retry by
                // re-selecting the source.
                warn!("rate resolution failed: {err}");
                slot.resolved = None;
                None
            }
        }
    }

    /// Currently selected rate source
    pub async fn current_source(&self) -> RateSource {
        self.state.read().await.source
    }

    /// Currently resolved rate, if any
    pub async fn current_rate(&self) -> Option<ResolvedRate> {
        self.state.read().await.resolved
    }

    /// Run a projection with the currently resolved rate
    ///
    /// Fails with `MissingRate` when no resolution is in effect; an
    /// unavailable rate is never treated as zero.
    pub async fn project(
        &self,
        capital: f64,
        contribution: f64,
        periods: u32,
    ) -> Result<ProjectionResult, InputError> {
        let rate = self
            .state
            .read()
            .await
            .resolved
            .ok_or(InputError::MissingRate)?;

        self.engine.project(&ProjectionInput {
            capital,
            contribution,
            rate,
            periods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{FixedProvider, IndexSeries, Observation, ProviderError};
    use approx::assert_relative_eq;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use tokio::sync::{oneshot, Mutex};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 6).unwrap()
    }

    fn observation(value: f64) -> Observation {
        Observation {
            value,
            reference_date: start(),
        }
    }

    #[tokio::test]
    async fn manual_selection_resolves_synchronously() {
        let session = RateSession::new(FixedProvider::new(), start());
        let rate = session
            .select_source(RateSource::manual(12.0, Cadence::Annual))
            .await
            .unwrap();

        assert_relative_eq!(rate.fraction(), 0.12);
        assert_eq!(session.current_rate().await, Some(rate));
    }

    #[tokio::test]
    async fn unavailable_source_leaves_rate_empty_and_blocks_projection() {
        let session = RateSession::new(FixedProvider::new(), start());

        // A good manual rate first, then a failing indexed selection: the
        // stale manual value must not survive the switch.
        session
            .select_source(RateSource::manual(12.0, Cadence::Annual))
            .await
            .unwrap();
        let outcome = session.select_source(RateSource::selic()).await;

        assert_eq!(outcome, None);
        assert_eq!(session.current_rate().await, None);
        assert_eq!(
            session.project(1000.0, 100.0, 5).await.unwrap_err(),
            InputError::MissingRate
        );
    }

    #[tokio::test]
    async fn projection_uses_current_rate() {
        let session = RateSession::new(FixedProvider::new(), start());
        session
            .select_source(RateSource::manual(10.0, Cadence::Annual))
            .await
            .unwrap();

        let result = session.project(1000.0, 100.0, 2).await.unwrap();

        assert_relative_eq!(result.summary().final_balance, 1420.0, epsilon = 1e-9);
    }

    #[tokio::test]
    async fn participation_change_re_resolves_active_cdi() {
        let provider = FixedProvider::new().with(IndexSeries::Cdi, observation(0.045));
        let session = RateSession::new(provider, start());

        let full = session.select_source(RateSource::cdi(100.0)).await.unwrap();
        let partial = session.set_participation(90.0).await.unwrap();

        assert_relative_eq!(partial.fraction(), full.fraction() * 0.9, epsilon = 1e-12);
        assert_eq!(session.current_rate().await, Some(partial));
    }

    #[tokio::test]
    async fn participation_change_is_inert_for_other_sources() {
        let session = RateSession::new(FixedProvider::new(), start());
        session
            .select_source(RateSource::manual(12.0, Cadence::Annual))
            .await
            .unwrap();

        assert_eq!(session.set_participation(90.0).await, None);
        // The manual rate is untouched.
        assert_relative_eq!(session.current_rate().await.unwrap().fraction(), 0.12);
    }

    /// Provider whose fetches block until the test releases them, so
    /// completion order can be forced.
    struct GatedProvider {
        gates: Mutex<VecDeque<oneshot::Receiver<Result<Observation, ProviderError>>>>,
    }

    #[async_trait]
    impl IndexProvider for GatedProvider {
        async fn fetch_latest(&self, _series: IndexSeries) -> Result<Observation, ProviderError> {
            let gate = self
                .gates
                .lock()
                .await
                .pop_front()
                .expect("a gate per fetch");
            gate.await.expect("gate sender kept alive")
        }
    }

    #[tokio::test]
    async fn stale_completion_does_not_overwrite_newer_result() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let provider = GatedProvider {
            gates: Mutex::new(VecDeque::from([first_rx, second_rx])),
        };
        let session = Arc::new(RateSession::new(provider, start()));

        // Request A: SELIC. Let it park on its gate.
        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.select_source(RateSource::selic()).await })
        };
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        // Request B: CDI, initiated after A.
        let second = {
            let session = session.clone();
            tokio::spawn(async move { session.select_source(RateSource::cdi(100.0)).await })
        };
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        // B completes first and is applied.
        second_tx.send(Ok(observation(0.045))).unwrap();
        let applied = second.await.unwrap().unwrap();
        assert_eq!(session.current_rate().await, Some(applied));

        // A completes later; its result must be discarded.
        first_tx.send(Ok(observation(13.25))).unwrap();
        assert_eq!(first.await.unwrap(), None);
        assert_eq!(session.current_rate().await, Some(applied));
    }

    #[tokio::test]
    async fn stale_failure_does_not_clear_newer_result() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let provider = GatedProvider {
            gates: Mutex::new(VecDeque::from([first_rx, second_rx])),
        };
        let session = Arc::new(RateSession::new(provider, start()));

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.select_source(RateSource::selic()).await })
        };
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        let second = {
            let session = session.clone();
            tokio::spawn(async move { session.select_source(RateSource::cdi(100.0)).await })
        };
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        second_tx.send(Ok(observation(0.045))).unwrap();
        let applied = second.await.unwrap().unwrap();

        // The superseded request fails; the applied rate must survive.
        first_tx
            .send(Err(ProviderError::EmptySeries { series: 1178 }))
            .unwrap();
        assert_eq!(first.await.unwrap(), None);
        assert_eq!(session.current_rate().await, Some(applied));
    }
}

//! Banco Central SGS time-series client
//!
//! Requests the single most recent observation of a series via the
//! `dados/ultimos/1` endpoint. The service returns a one-element JSON array
//! of `{"data": "dd/mm/yyyy", "valor": "13.25"}` records; `valor` usually
//! arrives as a string but is accepted as a bare number too.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;

use super::{IndexProvider, IndexSeries, Observation, ProviderError};

const BASE_URL: &str = "https://api.bcb.gov.br/dados/serie";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the SGS latest-observation endpoint
#[derive(Debug, Clone)]
pub struct SgsClient {
    http: reqwest::Client,
    base_url: String,
}

/// Wire format of one SGS observation
#[derive(Debug, Deserialize)]
struct SgsRecord {
    data: String,
    valor: SgsValue,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SgsValue {
    Text(String),
    Number(f64),
}

impl SgsClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Client pointed at an alternate endpoint (tests, mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn latest_url(&self, series: IndexSeries) -> String {
        format!(
            "{}/bcdata.sgs.{}/dados/ultimos/1?formato=json",
            self.base_url,
            series.sgs_code()
        )
    }
}

impl Default for SgsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexProvider for SgsClient {
    async fn fetch_latest(&self, series: IndexSeries) -> Result<Observation, ProviderError> {
        let code = series.sgs_code();
        let url = self.latest_url(series);
        debug!("fetching latest observation of series {code} from {url}");

        let response = self
            .http
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|source| ProviderError::Network { series: code, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                series: code,
                status: status.as_u16(),
            });
        }

        let records: Vec<SgsRecord> = response.json().await.map_err(|e| ProviderError::Malformed {
            series: code,
            detail: e.to_string(),
        })?;

        let record = records
            .first()
            .ok_or(ProviderError::EmptySeries { series: code })?;

        parse_record(code, record)
    }
}

fn parse_record(series: u32, record: &SgsRecord) -> Result<Observation, ProviderError> {
    let value = match &record.valor {
        SgsValue::Number(n) => *n,
        SgsValue::Text(s) => s.trim().parse().map_err(|_| ProviderError::Malformed {
            series,
            detail: format!("non-numeric value {:?}", s),
        })?,
    };

    let reference_date =
        NaiveDate::parse_from_str(record.data.trim(), "%d/%m/%Y").map_err(|_| {
            ProviderError::Malformed {
                series,
                detail: format!("unparseable reference date {:?}", record.data),
            }
        })?;

    Ok(Observation {
        value,
        reference_date,
    })
}

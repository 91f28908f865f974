//! HTTP JSON endpoint for running projections
//!
//! Accepts the form fields as JSON, resolves the selected rate source
//! against the live index service, and returns the projected series,
//! summary, and chart model. Supports Lambda Function URLs for direct HTTP
//! access from the frontend form.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

use investment_system::chart::ChartModel;
use investment_system::projection::{
    ProjectionConfig, ProjectionEngine, ProjectionInput, ProjectionSummary,
};
use investment_system::provider::SgsClient;
use investment_system::rates::{Cadence, RateResolver, RateSource};

/// Input configuration for one projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Initial capital
    #[serde(default)]
    pub capital: f64,

    /// Contribution added at the end of each period
    #[serde(default)]
    pub contribution: f64,

    /// Rate source kind: "annual", "monthly", "selic", or "cdi"
    #[serde(default = "default_source")]
    pub source: String,

    /// Manual rate in percent; required for the annual and monthly kinds
    #[serde(default)]
    pub rate_percent: Option<f64>,

    /// CDI participation percentage (default: 100)
    #[serde(default = "default_participation")]
    pub participation_percent: f64,

    /// Number of periods to project (default: 10)
    #[serde(default = "default_periods")]
    pub periods: u32,
}

fn default_source() -> String {
    "annual".to_string()
}
fn default_participation() -> f64 {
    100.0
}
fn default_periods() -> u32 {
    10
}

#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    /// Resolved rate as the percentage the rate field displays
    pub rate_percent: f64,
    pub cadence: Cadence,
    pub summary: ProjectionSummary,
    pub labels: Vec<String>,
    pub balances: Vec<f64>,
    pub contributed: Vec<f64>,
    pub chart: ChartModel,
    pub execution_time_ms: u64,
}

fn parse_source(request: &ProjectionRequest) -> Result<RateSource, String> {
    match request.source.as_str() {
        "annual" | "monthly" => {
            let cadence = if request.source == "annual" {
                Cadence::Annual
            } else {
                Cadence::Monthly
            };
            match request.rate_percent {
                Some(percent) if percent.is_finite() => {
                    Ok(RateSource::manual(percent, cadence))
                }
                // An empty rate field is invalid input, never a 0% rate.
                _ => Err("rate_percent is required for manual rate sources".to_string()),
            }
        }
        "selic" => Ok(RateSource::selic()),
        "cdi" => Ok(RateSource::cdi(request.participation_percent)),
        other => Err(format!("unknown rate source {other:?}")),
    }
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response(body: &ProjectionResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body = event.body();
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let source = match parse_source(&request) {
        Ok(source) => source,
        Err(message) => {
            return Ok(error_response(400, &message));
        }
    };

    let resolver = RateResolver::new(SgsClient::new());
    let rate = match resolver.resolve(&source).await {
        Ok(rate) => rate,
        Err(e) => {
            // The index service could not be consulted; the client clears
            // its rate field and may retry.
            return Ok(error_response(503, &format!("Rate unavailable: {}", e)));
        }
    };

    let engine = ProjectionEngine::new(ProjectionConfig::starting(
        chrono::Local::now().date_naive(),
    ));
    let result = match engine.project(&ProjectionInput {
        capital: request.capital,
        contribution: request.contribution,
        rate,
        periods: request.periods,
    }) {
        Ok(result) => result,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid input: {}", e)));
        }
    };

    let response = ProjectionResponse {
        rate_percent: rate.as_percent(),
        cadence: rate.cadence(),
        summary: result.summary(),
        labels: result.labels(),
        balances: result.balances(),
        contributed: result.contributed(),
        chart: ChartModel::from_result(&result),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

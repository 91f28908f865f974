//! Chart-facing data model
//!
//! The core produces these structures; the frontend just draws them as two
//! connected line traces over a shared label axis.

use serde::{Deserialize, Serialize};

use crate::projection::ProjectionResult;

/// Number of equal intervals on the value axis
pub const AXIS_INTERVALS: u32 = 10;

/// Trace name for the compounded balance series
pub const INVESTED_SERIES: &str = "Invested";

/// Trace name for the uncontributed-capital baseline
pub const NOT_INVESTED_SERIES: &str = "Not invested";

/// One named line trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<f64>,
}

/// One tick on the shared value axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub text: String,
}

/// Everything the frontend needs to draw the projection chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    /// Period labels shared by both traces
    pub labels: Vec<String>,

    /// Balance trace first, contribution baseline second
    pub series: Vec<ChartSeries>,

    /// Value-axis ticks from zero to the maximum across both traces
    pub ticks: Vec<AxisTick>,
}

impl ChartModel {
    /// Build the chart model for a projection result
    ///
    /// The value axis runs from zero to the maximum across both series,
    /// split into `AXIS_INTERVALS` equal steps, each tick labeled with a
    /// two-decimal number.
    pub fn from_result(result: &ProjectionResult) -> Self {
        let balances = result.balances();
        let contributed = result.contributed();

        let max_value = balances
            .iter()
            .chain(contributed.iter())
            .fold(0.0f64, |acc, &v| acc.max(v));

        let step = max_value / AXIS_INTERVALS as f64;
        let ticks = (0..=AXIS_INTERVALS)
            .map(|i| {
                let value = step * i as f64;
                AxisTick {
                    value,
                    text: format!("{value:.2}"),
                }
            })
            .collect();

        ChartModel {
            labels: result.labels(),
            series: vec![
                ChartSeries {
                    name: INVESTED_SERIES.to_string(),
                    points: balances,
                },
                ChartSeries {
                    name: NOT_INVESTED_SERIES.to_string(),
                    points: contributed,
                },
            ],
            ticks,
        }
    }
}

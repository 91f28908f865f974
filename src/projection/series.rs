//! Projection output structures

use serde::{Deserialize, Serialize};

use crate::rates::Cadence;

/// One point along the projection horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Periods elapsed since the start; 0 is the starting point
    pub period: u32,

    /// Calendar label for the period, per cadence
    pub label: String,

    /// Compounded balance at the end of the period
    pub balance: f64,

    /// Nominal amount put in so far, without growth
    pub contributed: f64,
}

/// Complete projection result
///
/// Holds `periods + 1` rows; row 0 carries the initial capital on both
/// series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub cadence: Cadence,
    pub rows: Vec<ProjectionRow>,
}

impl ProjectionResult {
    pub(crate) fn with_capacity(cadence: Cadence, periods: u32) -> Self {
        Self {
            cadence,
            rows: Vec::with_capacity(periods as usize + 1),
        }
    }

    pub(crate) fn push(&mut self, row: ProjectionRow) {
        self.rows.push(row);
    }

    /// Compounded balance series, indexed by period
    pub fn balances(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.balance).collect()
    }

    /// Cumulative contribution series, indexed by period
    pub fn contributed(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.contributed).collect()
    }

    /// Period labels shared by both series
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.label.clone()).collect()
    }

    /// Summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let final_balance = self.rows.last().map(|r| r.balance).unwrap_or(0.0);
        let total_contributed = self.rows.last().map(|r| r.contributed).unwrap_or(0.0);

        ProjectionSummary {
            periods: self.rows.len().saturating_sub(1) as u32,
            final_balance,
            total_contributed,
            interest_earned: final_balance - total_contributed,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub periods: u32,
    pub final_balance: f64,
    pub total_contributed: f64,
    pub interest_earned: f64,
}

//! Scenario runner for batch projections
//!
//! Loads manual-rate scenarios from CSV and projects each one without
//! touching the network, so a whole file of rate/contribution combinations
//! can be compared in one run.

use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::projection::{
    InputError, ProjectionConfig, ProjectionEngine, ProjectionInput, ProjectionResult,
};
use crate::rates::{Cadence, ResolvedRate};

/// One batch scenario row
///
/// CSV header: `name,capital,contribution,rate_percent,cadence,periods`
/// with cadence spelled `annual` or `monthly`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub capital: f64,
    pub contribution: f64,
    pub rate_percent: f64,
    pub cadence: Cadence,
    pub periods: u32,
}

impl Scenario {
    /// Periodic rate equivalent to this row's manual percentage
    pub fn rate(&self) -> ResolvedRate {
        ResolvedRate::new(self.rate_percent / 100.0, self.cadence)
    }
}

/// Read scenarios from CSV with headers
pub fn read_scenarios<R: Read>(reader: R) -> Result<Vec<Scenario>, Box<dyn Error>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for row in csv_reader.deserialize() {
        scenarios.push(row?);
    }

    Ok(scenarios)
}

/// Load scenarios from a CSV file
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>, Box<dyn Error>> {
    let file = File::open(path)?;
    read_scenarios(file)
}

/// Pre-configured runner for projecting many scenarios
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner labeling every projection from the given start date
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            engine: ProjectionEngine::new(ProjectionConfig::starting(start_date)),
        }
    }

    /// Project one scenario
    pub fn run(&self, scenario: &Scenario) -> Result<ProjectionResult, InputError> {
        self.engine.project(&ProjectionInput {
            capital: scenario.capital,
            contribution: scenario.contribution,
            rate: scenario.rate(),
            periods: scenario.periods,
        })
    }

    /// Project all scenarios in order
    pub fn run_all(&self, scenarios: &[Scenario]) -> Vec<Result<ProjectionResult, InputError>> {
        scenarios.iter().map(|s| self.run(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "\
name,capital,contribution,rate_percent,cadence,periods
baseline,1000,100,10,annual,2
aggressive,0,500,1.2,monthly,12
";

    fn runner() -> ScenarioRunner {
        ScenarioRunner::starting(NaiveDate::from_ymd_opt(2025, 8, 6).unwrap())
    }

    #[test]
    fn reads_csv_rows() {
        let scenarios = read_scenarios(SAMPLE.as_bytes()).unwrap();

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].name, "baseline");
        assert_eq!(scenarios[0].cadence, Cadence::Annual);
        assert_eq!(scenarios[1].cadence, Cadence::Monthly);
        assert_relative_eq!(scenarios[1].rate().fraction(), 0.012);
    }

    #[test]
    fn runs_loaded_scenarios() {
        let scenarios = read_scenarios(SAMPLE.as_bytes()).unwrap();
        let results = runner().run_all(&scenarios);

        assert_eq!(results.len(), 2);
        let baseline = results[0].as_ref().unwrap();
        assert_relative_eq!(baseline.summary().final_balance, 1420.0, epsilon = 1e-9);
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let bad = "name,capital,contribution,rate_percent,cadence,periods\nx,oops,100,10,annual,2\n";
        assert!(read_scenarios(bad.as_bytes()).is_err());
    }
}

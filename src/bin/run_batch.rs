//! Run projections for a whole scenario file
//!
//! Outputs one summary row per scenario for comparison across rate and
//! contribution combinations.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use chrono::Local;
use rayon::prelude::*;

use investment_system::scenario::{load_scenarios, ScenarioRunner};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scenarios.csv".to_string());

    let start = Instant::now();
    println!("Loading scenarios from {path}...");

    let scenarios = load_scenarios(Path::new(&path))
        .map_err(|e| anyhow::anyhow!("loading {path}: {e}"))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::starting(Local::now().date_naive());

    println!("Running projections...");
    let proj_start = Instant::now();

    let results: Vec<_> = scenarios.par_iter().map(|s| runner.run(s)).collect();

    println!("Projections complete in {:?}", proj_start.elapsed());

    let output_path = "batch_projection_output.csv";
    let mut file = File::create(output_path)?;

    writeln!(
        file,
        "Scenario,Cadence,Periods,FinalBalance,TotalContributed,InterestEarned"
    )?;

    let mut rejected = 0usize;
    for (scenario, result) in scenarios.iter().zip(&results) {
        match result {
            Ok(result) => {
                let summary = result.summary();
                writeln!(
                    file,
                    "{},{:?},{},{:.2},{:.2},{:.2}",
                    scenario.name,
                    scenario.cadence,
                    summary.periods,
                    summary.final_balance,
                    summary.total_contributed,
                    summary.interest_earned,
                )?;
            }
            Err(err) => {
                rejected += 1;
                eprintln!("Scenario {} rejected: {err}", scenario.name);
            }
        }
    }

    println!("Output written to {output_path}");
    if rejected > 0 {
        println!("{rejected} scenario(s) rejected as invalid input");
    }
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}

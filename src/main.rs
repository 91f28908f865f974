//! Investment System CLI
//!
//! Resolves the selected rate source and prints the projected trajectory.

use std::fs::File;
use std::io::Write;

use chrono::Local;
use clap::{Parser, ValueEnum};

use investment_system::projection::{ProjectionConfig, ProjectionEngine, ProjectionInput};
use investment_system::provider::{FixedProvider, SgsClient};
use investment_system::rates::{Cadence, RateResolver, RateSource, ResolvedRate};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceKind {
    /// Manual rate, one period per year
    Annual,
    /// Manual rate, one period per month
    Monthly,
    /// Latest published SELIC annual rate
    Selic,
    /// Latest published CDI daily rate, compounded and scaled
    Cdi,
}

#[derive(Debug, Parser)]
#[command(
    name = "investment_system",
    about = "Recurring-investment projection with benchmark-indexed rates"
)]
struct Cli {
    /// Initial capital
    #[arg(long, default_value_t = 1000.0)]
    capital: f64,

    /// Contribution added at the end of each period
    #[arg(long, default_value_t = 100.0)]
    contribution: f64,

    /// Rate source
    #[arg(long, value_enum, default_value_t = SourceKind::Annual)]
    source: SourceKind,

    /// Manual rate in percent, for the annual and monthly sources
    #[arg(long, default_value_t = 10.0)]
    rate: f64,

    /// CDI participation percentage
    #[arg(long, default_value_t = 100.0)]
    participation: f64,

    /// Number of periods to project
    #[arg(long, default_value_t = 10)]
    periods: u32,

    /// Use preset index levels instead of calling the BCB service
    #[arg(long)]
    offline: bool,

    /// Write the projected rows to this CSV file
    #[arg(long)]
    output: Option<String>,
}

impl Cli {
    fn rate_source(&self) -> RateSource {
        match self.source {
            SourceKind::Annual => RateSource::manual(self.rate, Cadence::Annual),
            SourceKind::Monthly => RateSource::manual(self.rate, Cadence::Monthly),
            SourceKind::Selic => RateSource::selic(),
            SourceKind::Cdi => RateSource::cdi(self.participation),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let source = cli.rate_source();

    println!("Investment System v0.1.0");
    println!("========================\n");

    let rate: ResolvedRate = if cli.offline {
        RateResolver::new(FixedProvider::default_levels())
            .resolve(&source)
            .await?
    } else {
        RateResolver::new(SgsClient::new()).resolve(&source).await?
    };

    println!(
        "Rate source: {:?} -> {:.4}% per {:?} period\n",
        cli.source,
        rate.as_percent(),
        rate.cadence()
    );

    let engine = ProjectionEngine::new(ProjectionConfig::starting(Local::now().date_naive()));
    let result = engine.project(&ProjectionInput {
        capital: cli.capital,
        contribution: cli.contribution,
        rate,
        periods: cli.periods,
    })?;

    println!(
        "{:>6} {:>10} {:>16} {:>16}",
        "Period", "Label", "Balance", "Contributed"
    );
    println!("{}", "-".repeat(52));
    for row in &result.rows {
        println!(
            "{:>6} {:>10} {:>16.2} {:>16.2}",
            row.period, row.label, row.balance, row.contributed
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Final balance:     {:.2}", summary.final_balance);
    println!("  Total contributed: {:.2}", summary.total_contributed);
    println!("  Interest earned:   {:.2}", summary.interest_earned);

    if let Some(path) = cli.output {
        let mut file = File::create(&path)?;
        writeln!(file, "Period,Label,Balance,Contributed")?;
        for row in &result.rows {
            writeln!(
                file,
                "{},{},{:.8},{:.8}",
                row.period, row.label, row.balance, row.contributed
            )?;
        }
        println!("\nFull results written to: {path}");
    }

    Ok(())
}

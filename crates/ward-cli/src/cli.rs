//! Top-level CLI parser for the `wrd` binary.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "wrd", version, about = "Wardline - civic property risk pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (suppress stage summaries and non-error logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the raw snapshot directory
    #[arg(long, global = true)]
    pub raw_dir: Option<String>,

    /// Override the processed output directory
    #[arg(long, global = true)]
    pub processed_dir: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize the student-housing survey into the clean table
    Normalize,
    /// Build the canonical property registry from every address source
    Registry,
    /// Compute property and landlord risk scores
    Risk(RiskArgs),
    /// Aggregate property risk by council district
    Spatial,
    /// Compute the yearly district student-housing trend
    Trend,
    /// Run every stage in order
    Run(RiskArgs),
    /// Check required columns and null rates on pipeline outputs
    Validate,
}

#[derive(Debug, Args)]
pub struct RiskArgs {
    /// As-of date (YYYY-MM-DD) that event ages decay against. Supplied
    /// explicitly so re-runs are reproducible; never the wall clock.
    #[arg(long, value_parser = parse_as_of)]
    pub as_of: NaiveDate,
}

fn parse_as_of(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid as-of date {raw:?}; expected YYYY-MM-DD"))
}

//! `wrd`: the Wardline pipeline binary.

use anyhow::Context;
use clap::Parser;

mod cli;
mod pipeline;
mod summary;
mod tables;
mod validate;

fn main() {
    if let Err(error) = run() {
        eprintln!("wrd error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config =
        ward_config::WardConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(dir) = &cli.raw_dir {
        config.paths.raw_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.processed_dir {
        config.paths.processed_dir.clone_from(dir);
    }

    let reports = match &cli.command {
        cli::Commands::Normalize => pipeline::run_normalize(&config)?,
        cli::Commands::Registry => pipeline::run_registry(&config)?,
        cli::Commands::Risk(args) => pipeline::run_risk(&config, args.as_of)?,
        cli::Commands::Spatial => pipeline::run_spatial(&config)?,
        cli::Commands::Trend => pipeline::run_trend(&config)?,
        cli::Commands::Run(args) => pipeline::run_all(&config, args.as_of)?,
        cli::Commands::Validate => {
            validate::run(&config)?;
            println!("Data quality checks passed.");
            return Ok(());
        }
    };

    if !cli.quiet {
        println!("{}", summary::render_reports(&reports));
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("WARDLINE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

//! Datacap CLI - Allocation-consumption reports from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Full compliance report written under the uploads directory
//! datacap report --verifier f01234 --clients clients.json --deals deals.csv
//!
//! # Milestone x elapsed-time table
//! datacap histogram --clients clients.json --deals deals.csv
//!
//! # Allocation size changes per client
//! datacap progression --clients clients.json --format csv
//!
//! # Time to each milestone, per allocation
//! datacap outcomes --clients clients.json --deals deals.csv --format json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn init_logging(quiet: bool) {
    let default_filter = if quiet { "warn" } else { "info,datacap=debug" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let config = commands::load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Report(args) => commands::report::execute(args, config, format, cli.quiet)?,
        Commands::Histogram(args) => commands::histogram::execute(args, config, format)?,
        Commands::Progression(args) => commands::progression::execute(args, format)?,
        Commands::Outcomes(args) => commands::outcomes::execute(args, config, format)?,
    }

    Ok(())
}

//! Parksim CLI - Command-line interface
//!
//! Runs a parking lot simulation over a lot design file.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use parksim_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "parksim")]
#[command(about = "Simulates a day of arrivals and departures at a parking lot")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    args: commands::SimulateArgs,

    /// Console log level
    #[arg(long, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    /// Directory for a full trace of the run
    #[arg(long)]
    logs_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())?;

    commands::run_simulation(cli.args)
}

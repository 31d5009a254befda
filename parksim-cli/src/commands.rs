//! CLI command implementations

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use parksim_core::{ParkingLot, SimulationConfig};
use parksim_sim::ParkingSimulation;
use regex::Regex;

/// Arguments of a simulation run
#[derive(Args)]
pub struct SimulateArgs {
    /// Lot design file
    pub layout: PathBuf,

    /// Hourly rate of car arrivals
    pub hourly_rate: String,

    /// Seed for a reproducible run (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of simulated seconds to run
    #[arg(long)]
    pub steps: Option<u64>,

    /// Maximum parking duration in seconds
    #[arg(long)]
    pub max_duration: Option<u64>,

    /// Print the lot design and final occupancy
    #[arg(long)]
    pub show_lot: bool,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parses an hourly rate, `None` when it is not a non-negative integer.
fn parse_hourly_rate(raw: &str) -> Option<u32> {
    let Ok(pattern) = Regex::new(r"^\d+$") else {
        return None;
    };
    if !pattern.is_match(raw) {
        return None;
    }
    raw.parse().ok()
}

/// Loads the lot design, `None` when the file content is invalid.
///
/// Invalid designs are reported on the console; only I/O failures are errors.
fn load_lot(path: &Path) -> anyhow::Result<Option<ParkingLot>> {
    match ParkingLot::from_file(path) {
        Ok(lot) => Ok(Some(lot)),
        Err(e) if e.is_user_error() => {
            println!("Invalid lot design in {}: {e}", path.display());
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| {
            format!("Failed to load lot design from {}", path.display())
        }),
    }
}

/// Merges environment configuration with command-line overrides.
fn build_config(args: &SimulateArgs, hourly_arrival_rate: u32) -> SimulationConfig {
    let mut config = SimulationConfig::from_env();
    config.hourly_arrival_rate = hourly_arrival_rate;

    if let Some(seed) = args.seed {
        config.deterministic_seed = Some(seed);
    }
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(max_duration) = args.max_duration {
        config.max_parking_duration = max_duration;
    }

    if config.deterministic_seed.is_none() {
        config.deterministic_seed = Some(rand::random());
    }
    config
}

/// Run a full simulation and print its results
///
/// # Errors
/// - Lot design file cannot be read or parsed
/// - Simulation configuration is invalid or the run aborts on invariant violations
pub fn run_simulation(args: SimulateArgs) -> anyhow::Result<()> {
    let Some(hourly_rate) = parse_hourly_rate(&args.hourly_rate) else {
        println!("The hourly rate of arrival should be a positive integer!");
        return Ok(());
    };

    let Some(lot) = load_lot(&args.layout)? else {
        return Ok(());
    };
    println!(
        "Total number of parkable spots (capacity): {}",
        lot.total_capacity()
    );

    let config = build_config(&args, hourly_rate);
    tracing::info!(
        "Simulating {} steps at {} cars/hour (seed {:?})",
        config.steps,
        config.hourly_arrival_rate,
        config.deterministic_seed
    );
    let mut sim = ParkingSimulation::new(lot, config)?;

    println!("=== SIMULATION START ===");
    let start = Instant::now();
    let report = sim.run()?;
    let elapsed = start.elapsed();
    println!("=== SIMULATION END ===");
    println!();
    println!("Simulation took {}ms.", elapsed.as_millis());
    println!();

    if args.show_lot {
        println!("{}", sim.lot());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.summary());
        println!();
    }

    println!(
        "Length of car queue at the front at the end of simulation: {}",
        report.incoming_backlog
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn args(rate: &str) -> SimulateArgs {
        SimulateArgs {
            layout: PathBuf::from("parking.inf"),
            hourly_rate: rate.to_string(),
            seed: None,
            steps: None,
            max_duration: None,
            show_lot: false,
            json: false,
        }
    }

    #[test]
    fn test_hourly_rate_must_be_digits() {
        assert_eq!(parse_hourly_rate("11"), Some(11));
        assert_eq!(parse_hourly_rate("0"), Some(0));
        assert_eq!(parse_hourly_rate("-3"), None);
        assert_eq!(parse_hourly_rate("1.5"), None);
        assert_eq!(parse_hourly_rate("eleven"), None);
        assert_eq!(parse_hourly_rate(""), None);
        assert_eq!(parse_hourly_rate("99999999999"), None);
    }

    #[test]
    fn test_cli_flags_override_config() {
        let mut args = args("11");
        args.seed = Some(5);
        args.steps = Some(100);
        args.max_duration = Some(50);

        let config = build_config(&args, 11);
        assert_eq!(config.hourly_arrival_rate, 11);
        assert_eq!(config.deterministic_seed, Some(5));
        assert_eq!(config.steps, 100);
        assert_eq!(config.max_parking_duration, 50);
    }

    #[test]
    fn test_seed_always_assigned() {
        let config = build_config(&args("4"), 4);
        assert!(config.deterministic_seed.is_some());
    }

    #[test]
    fn test_invalid_lot_design_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "R, X, S").unwrap();

        assert!(load_lot(file.path()).unwrap().is_none());

        let mut args = args("10");
        args.layout = file.path().to_path_buf();
        assert!(run_simulation(args).is_ok());
    }

    #[test]
    fn test_missing_lot_design_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_lot(&dir.path().join("missing.inf"));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to load lot design"));
    }

    #[test]
    fn test_valid_lot_design_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "E, S\nR, L").unwrap();

        let lot = load_lot(file.path()).unwrap().unwrap();
        assert_eq!(lot.total_capacity(), 4);
    }

    #[test]
    fn test_invalid_rate_skips_simulation() {
        // The layout path does not exist, so reaching the loader would fail.
        assert!(run_simulation(args("abc")).is_ok());
    }
}

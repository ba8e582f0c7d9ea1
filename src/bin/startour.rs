//! startour CLI: read a target catalog, compute the minimum-slew
//! observation order for the given site and instant, and print the
//! annotated report.

use std::fs::File;
use std::io;

use camino::Utf8PathBuf;
use clap::Parser;
use hifitime::Epoch;

use startour::catalog::{self, UnresolvedPolicy};
use startour::observer::Observer;
use startour::planner::{self, PlannerConfig};
use startour::resolver::SesameResolver;
use startour::startour_errors::StarTourError;
use startour::time::{civil_to_epoch, parse_utc_offset};

/// Plan a minimum-slew observing order for a list of celestial targets.
#[derive(Parser, Debug)]
#[command(name = "startour", version)]
struct Cli {
    /// Catalog file: one target per line, `NAME [RA DEC]` in decimal
    /// degrees or sexagesimal; bare names are resolved via Sesame
    input: Utf8PathBuf,

    /// Observer latitude in degrees, north positive
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lat: f64,

    /// Observer longitude in degrees, east positive
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lon: f64,

    /// Observer height above the ellipsoid in meters
    #[arg(long, default_value_t = 0.0)]
    height: f64,

    /// Observation date (YYYY-MM-DD); defaults to the current instant
    #[arg(long, requires = "time")]
    date: Option<String>,

    /// Observation time (HH:MM:SS); defaults to the current instant
    #[arg(long, requires = "date")]
    time: Option<String>,

    /// UTC offset of the given date/time in hours (e.g. +9, -3.5, +09:30)
    #[arg(long, default_value = "+0", allow_hyphen_values = true)]
    tz: String,

    /// Start the tour from this catalog object
    #[arg(long)]
    first_body: Option<String>,

    /// Altitude threshold in degrees below which a target counts as not
    /// observable
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    min_altitude: f64,

    /// Skip targets whose name resolution fails instead of aborting
    #[arg(long)]
    skip_unresolved: bool,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Also write the report as CSV to this file
    #[arg(long)]
    csv: Option<Utf8PathBuf>,
}

fn observation_epoch(cli: &Cli) -> Result<Epoch, StarTourError> {
    match (&cli.date, &cli.time) {
        (Some(date), Some(time)) => civil_to_epoch(date, time, parse_utc_offset(&cli.tz)?),
        _ => Epoch::now().map_err(|error| StarTourError::InvalidDateTime(error.to_string())),
    }
}

fn run(cli: &Cli) -> Result<(), StarTourError> {
    let observer = Observer::new(cli.lat, cli.lon, cli.height, observation_epoch(cli)?)?;

    let entries = catalog::read_catalog(&cli.input)?;
    let policy = if cli.skip_unresolved {
        UnresolvedPolicy::SkipWithWarning
    } else {
        UnresolvedPolicy::Fail
    };
    let bodies = catalog::resolve_entries(entries, &SesameResolver::new(), policy)?;

    let config = PlannerConfig {
        min_altitude: cli.min_altitude,
        start: cli.first_body.clone(),
    };
    let plan = planner::plan_observation_order(&bodies, &observer, &config)?;

    println!("Location: {observer}");
    println!();
    println!("Optimal order of celestial bodies:");
    match &cli.output {
        Some(path) => planner::write_report(&plan, File::create(path)?)?,
        None => planner::write_report(&plan, io::stdout().lock())?,
    }
    println!();
    println!("Total slew: {:.2} deg over {} targets", plan.total_slew, plan.records.len());

    if let Some(path) = &cli.csv {
        planner::write_csv_report(&plan, File::create(path)?)?;
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

mod app;
mod chart;
mod color;
mod config;
mod data;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use chart::build_chart;
use config::PlotConfig;
use data::loader::{load_table, LoadError};
use data::model::{MeasurementTable, PlotMode};

/// Exit status when the measurement file does not exist.
const MISSING_INPUT_EXIT: i32 = 1;

/// Plot JV and power-voltage curves of a perovskite solar cell measured at
/// several light intensities.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Measurement table, overrides the configured input path
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Only show charts of this kind
    #[arg(short, long, value_enum)]
    mode: Option<PlotMode>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

/// Outcome of opening the measurement file.
#[derive(Debug)]
enum Startup {
    Table(MeasurementTable),
    /// Print `message` to stderr and end the process with `code`.
    Exit { message: String, code: i32 },
}

/// Load the table, turning a missing file into an exit request instead of an
/// error. Other load failures propagate.
fn open_measurements(path: &Path) -> Result<Startup> {
    match load_table(path) {
        Ok(table) => Ok(Startup::Table(table)),
        Err(err @ LoadError::NotFound(_)) => Ok(Startup::Exit {
            message: err.to_string(),
            code: MISSING_INPUT_EXIT,
        }),
        Err(err) => Err(err).context("loading measurements"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Using config {}", path.display());
            PlotConfig::load(path)?
        }
        None => PlotConfig::default(),
    };
    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(mode) = args.mode {
        config.charts.retain(|c| c.mode == mode);
    }
    config.validate().context("invalid configuration")?;

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let table = match open_measurements(&config.input_path)? {
        Startup::Table(table) => table,
        Startup::Exit { message, code } => {
            eprintln!("{message}");
            std::process::exit(code);
        }
    };
    if table.is_empty() {
        log::warn!("{} contains no rows", config.input_path.display());
    }

    let charts = config
        .charts
        .iter()
        .map(|chart| build_chart(&table, &config, chart))
        .collect::<Result<Vec<_>>>()?;
    if charts.is_empty() {
        log::warn!("No charts configured");
    }

    for chart in charts {
        app::show_chart(chart, config.maximize_window)?;
    }
    Ok(())
}

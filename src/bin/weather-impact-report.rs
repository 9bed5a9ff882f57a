use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use weather_impact::report::{self, HourlyMap};
use weather_impact::{ImpactConfig, logging};

#[derive(Parser)]
#[command(
    name = "weather-impact-report",
    author,
    version,
    about = "Render the weather impact table as a static HTML report"
)]
struct Cli {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Impact table (CSV), overrides `output.table_path`
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Hourly data (JSON), overrides `output.hourly_path`
    #[arg(long)]
    hourly: Option<PathBuf>,

    /// HTML file to write, overrides `output.html_path`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ImpactConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    let table_path = cli
        .table
        .unwrap_or_else(|| PathBuf::from(&config.output.table_path));
    let hourly_path = cli
        .hourly
        .unwrap_or_else(|| PathBuf::from(&config.output.hourly_path));
    let output_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.html_path));

    let records = report::read_table(&table_path).unwrap_or_else(|e| {
        warn!("Could not read {}: {}; rendering without records", table_path.display(), e);
        Vec::new()
    });
    info!("Found {} rows of data", records.len());

    let hourly = report::read_hourly(&hourly_path).unwrap_or_else(|e| {
        warn!("No hourly data at {}: {}", hourly_path.display(), e);
        HourlyMap::new()
    });

    let generated_at = Utc::now().with_timezone(&config.weather.tz()?).naive_local();
    let html = report::render_html(&records, &hourly, generated_at)?;
    std::fs::write(&output_path, html)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!("Report written: {}", output_path.display());
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::Parser;
use tracing::{info, warn};

use weather_impact::input::{self, RestaurantTable};
use weather_impact::report::{self, Summary};
use weather_impact::{BatchRunner, ImpactConfig, OpenMeteoClient, dates, logging};

#[derive(Parser)]
#[command(
    name = "weather-impact",
    author,
    version,
    about = "Compare the coming week's weather with last year for each restaurant"
)]
struct Cli {
    /// First forecast date (YYYY-MM-DD); defaults to today in the configured timezone
    #[arg(value_parser = parse_date)]
    start_date: Option<NaiveDate>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Restaurant table (CSV), overrides `batch.input_path`
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the restaurant table's layout and exit
    #[arg(long)]
    inspect: bool,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    dates::parse_start_date(value).map_err(|e| e.user_message())
}

fn print_inspection(path: &Path, table: &RestaurantTable) {
    println!("Restaurant table: {}", path.display());
    println!("Columns: {}", table.layout.headers.join(", "));
    println!("Rows: {}", table.rows.len());
    println!(
        "Coordinate columns: {}",
        if table.layout.has_coordinates() { "found" } else { "missing" }
    );
    for row in table.rows.iter().take(5) {
        println!("  {} ({:?}, {:?})", row.name, row.latitude, row.longitude);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ImpactConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    let input_path = cli
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.batch.input_path));
    let table = input::read_restaurants(&input_path)?;

    if cli.inspect {
        print_inspection(&input_path, &table);
        return Ok(());
    }

    if !table.layout.has_coordinates() {
        warn!(
            "No Latitude/Longitude columns in {}; every row will be skipped",
            input_path.display()
        );
    }

    let tz = config.weather.tz()?;
    let start = cli
        .start_date
        .unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());
    let pairs = dates::align_dates(start);
    info!(
        "Analyzing {} restaurants from {} against the same weekdays in {}",
        table.rows.len(),
        start,
        start.year() - 1
    );

    let client = OpenMeteoClient::new(&config.weather)?;
    let runner = BatchRunner::new(client, config.batch.request_delay());
    let report = runner.run(&table.rows, &pairs).await;

    report::write_table(&config.output.table_path, &report.records, start.year())
        .with_context(|| format!("Failed to write {}", config.output.table_path))?;
    report::write_hourly(&config.output.hourly_path, &report.hourly)
        .with_context(|| format!("Failed to write {}", config.output.hourly_path))?;

    let summary = Summary::from_records(&report.records);
    println!(
        "Processed {}/{} restaurants ({} skipped), {} rows written",
        report.stats.processed,
        report.stats.rows,
        report.stats.skipped(),
        report.records.len()
    );
    println!(
        "Bedre: {}  Dårligere: {}  Lignende: {}  Uden vurdering: {}",
        summary.better, summary.worse, summary.similar, summary.unscored
    );
    println!("Table:  {}", config.output.table_path);
    println!("Hourly: {}", config.output.hourly_path);

    Ok(())
}

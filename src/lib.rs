//! Weather impact analysis for restaurant locations
//!
//! Compares the seven-day forecast for each restaurant with the same
//! weekdays one year earlier, scores the expected effect on customer
//! traffic and writes a table, the raw hourly data and a static HTML report.

pub mod batch;
pub mod config;
pub mod dates;
pub mod error;
pub mod impact;
pub mod input;
pub mod logging;
pub mod models;
pub mod report;
pub mod weather;

// Re-export core types for public API
pub use batch::{BatchRunner, BatchStats, Report};
pub use config::ImpactConfig;
pub use error::WeatherImpactError;
pub use models::{
    DailyWeather, HourlyPair, HourlySeries, ImpactLabel, ImpactRecord, Restaurant, RestaurantRow,
};
pub use weather::{OpenMeteoClient, WeatherPayload, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherImpactError>;

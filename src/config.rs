//! Configuration management for the weather impact pipeline
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherImpactError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Batch run configuration
    #[serde(default)]
    pub batch: BatchConfig,
    /// Output file locations
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    /// Base URL of the historical archive API
    #[serde(default = "default_archive_base_url")]
    pub archive_base_url: String,
    /// IANA timezone used for daily aggregation and "today"
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Batch run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Restaurant table to read
    #[serde(default = "default_input_path")]
    pub input_path: String,
    /// Pause before each restaurant's API calls, in milliseconds
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,
}

/// Output file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Daily impact table (CSV)
    #[serde(default = "default_table_path")]
    pub table_path: String,
    /// Hourly series per restaurant (JSON)
    #[serde(default = "default_hourly_path")]
    pub hourly_path: String,
    /// Static HTML report
    #[serde(default = "default_html_path")]
    pub html_path: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_archive_base_url() -> String {
    "https://archive-api.open-meteo.com/v1".to_string()
}

fn default_timezone() -> String {
    "Europe/Copenhagen".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_input_path() -> String {
    "restaurants.csv".to_string()
}

fn default_request_delay() -> u64 {
    500
}

fn default_table_path() -> String {
    "weather_impact.csv".to_string()
}

fn default_hourly_path() -> String {
    "hourly_weather_data.json".to_string()
}

fn default_html_path() -> String {
    "index.html".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_base_url: default_forecast_base_url(),
            archive_base_url: default_archive_base_url(),
            timezone: default_timezone(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            request_delay_ms: default_request_delay(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table_path: default_table_path(),
            hourly_path: default_hourly_path(),
            html_path: default_html_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl BatchConfig {
    /// Politeness delay as a [`Duration`]
    #[must_use]
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl WeatherConfig {
    /// Parsed timezone. Only fails on configurations that skipped validation.
    pub fn tz(&self) -> crate::Result<chrono_tz::Tz> {
        self.timezone.parse::<chrono_tz::Tz>().map_err(|_| {
            WeatherImpactError::config(format!("Unknown timezone '{}'", self.timezone))
        })
    }
}

impl ImpactConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHER_IMPACT_BATCH__REQUEST_DELAY_MS=0 style overrides
        builder = builder.add_source(
            Environment::with_prefix("WEATHER_IMPACT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ImpactConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-impact").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.forecast_base_url.is_empty() {
            self.weather.forecast_base_url = default_forecast_base_url();
        }
        if self.weather.archive_base_url.is_empty() {
            self.weather.archive_base_url = default_archive_base_url();
        }
        if self.weather.timezone.is_empty() {
            self.weather.timezone = default_timezone();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.batch.input_path.is_empty() {
            self.batch.input_path = default_input_path();
        }
        if self.output.table_path.is_empty() {
            self.output.table_path = default_table_path();
        }
        if self.output.hourly_path.is_empty() {
            self.output.hourly_path = default_hourly_path();
        }
        if self.output.html_path.is_empty() {
            self.output.html_path = default_html_path();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                WeatherImpactError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.batch.request_delay_ms > 60_000 {
            return Err(WeatherImpactError::config(
                "Request delay cannot exceed 60000 ms (1 minute)",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherImpactError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherImpactError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("forecast", &self.weather.forecast_base_url),
            ("archive", &self.weather.archive_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherImpactError::config(format!(
                    "Weather {name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        self.weather.tz()?;

        Ok(())
    }
}

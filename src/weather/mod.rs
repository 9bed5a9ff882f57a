//! Weather API client for `OpenMeteo`
//!
//! Forecast and historical archive requests for a single coordinate pair.
//! Failures are returned as [`WeatherImpactError::Api`]; there is no retry
//! and no rate limiting here, the batch runner throttles between
//! restaurants.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::WeatherConfig;
use crate::{Result, VERSION, WeatherImpactError};

pub mod open_meteo;

pub use open_meteo::{DailySeries, WeatherPayload};

/// Source of forecast and historical weather for a location
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Seven days of daily and hourly forecast
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<WeatherPayload>;

    /// Daily and hourly observations for `start..=end`
    async fn fetch_historical(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherPayload>;
}

/// `OpenMeteo` forecast + archive client
pub struct OpenMeteoClient {
    client: Client,
    forecast_base_url: String,
    archive_base_url: String,
    timezone: String,
}

impl OpenMeteoClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(format!("weather-impact/{VERSION}"))
            .build()
            .map_err(|e| WeatherImpactError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            forecast_base_url: config.forecast_base_url.clone(),
            archive_base_url: config.archive_base_url.clone(),
            timezone: config.timezone.clone(),
        })
    }

    async fn get_payload(&self, url: &str) -> Result<WeatherPayload> {
        debug!("OpenMeteo API request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Network error: {}", e);
            WeatherImpactError::api(format!("Network error: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error: {}", status);
            return Err(WeatherImpactError::api(format!(
                "API request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let payload: WeatherPayload = response.json().await.map_err(|e| {
            warn!("Failed to parse weather response: {}", e);
            WeatherImpactError::api(format!("Invalid weather data received from OpenMeteo: {e}"))
        })?;

        debug!(
            "Received {} daily / {} hourly values in {:.3}s",
            payload.daily.time.len(),
            payload.hourly.time.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(payload)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<WeatherPayload> {
        let url =
            open_meteo::forecast_url(&self.forecast_base_url, latitude, longitude, &self.timezone);
        self.get_payload(&url).await
    }

    #[instrument(skip(self))]
    async fn fetch_historical(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherPayload> {
        let url = open_meteo::archive_url(
            &self.archive_base_url,
            latitude,
            longitude,
            start,
            end,
            &self.timezone,
        );
        self.get_payload(&url).await
    }
}

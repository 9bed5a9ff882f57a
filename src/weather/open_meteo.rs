//! `OpenMeteo` API response structures and URL building

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DailyWeather, HourlySeries};

/// Daily fields requested from both endpoints
pub const DAILY_FIELDS: &str = "temperature_2m_mean,precipitation_sum,snowfall_sum";

/// Hourly fields requested from both endpoints
pub const HOURLY_FIELDS: &str =
    "temperature_2m,precipitation,snowfall,weather_code,cloud_cover,wind_speed_10m";

/// Length of the forecast window in days
pub const FORECAST_WINDOW_DAYS: u8 = 7;

/// Forecast or archive response; both endpoints share this shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub daily: DailySeries,
    #[serde(default)]
    pub hourly: HourlySeries,
}

/// Daily aggregates from `OpenMeteo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    /// ISO dates, `YYYY-MM-DD`
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_mean", default)]
    pub temperature_mean: Vec<Option<f64>>,
    #[serde(rename = "precipitation_sum", default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(rename = "snowfall_sum", default)]
    pub snowfall_sum: Vec<Option<f64>>,
}

impl DailySeries {
    /// Aggregates for `date`; every field is `None` if the date is not covered
    #[must_use]
    pub fn on(&self, date: NaiveDate) -> DailyWeather {
        let key = date.format("%Y-%m-%d").to_string();
        let Some(index) = self.time.iter().position(|t| *t == key) else {
            return DailyWeather::default();
        };

        let at = |values: &[Option<f64>]| values.get(index).copied().flatten();

        DailyWeather {
            temperature: at(&self.temperature_mean),
            precipitation: at(&self.precipitation_sum),
            snowfall: at(&self.snowfall_sum),
        }
    }
}

/// Forecast request URL
#[must_use]
pub fn forecast_url(base_url: &str, lat: f64, lon: f64, timezone: &str) -> String {
    format!(
        "{}/forecast?latitude={}&longitude={}&hourly={}&daily={}&timezone={}&forecast_days={}",
        base_url.trim_end_matches('/'),
        lat,
        lon,
        HOURLY_FIELDS,
        DAILY_FIELDS,
        urlencoding::encode(timezone),
        FORECAST_WINDOW_DAYS
    )
}

/// Archive request URL for an explicit date range
#[must_use]
pub fn archive_url(
    base_url: &str,
    lat: f64,
    lon: f64,
    start: NaiveDate,
    end: NaiveDate,
    timezone: &str,
) -> String {
    format!(
        "{}/archive?latitude={}&longitude={}&start_date={}&end_date={}\
         &hourly={}&daily={}&timezone={}",
        base_url.trim_end_matches('/'),
        lat,
        lon,
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
        HOURLY_FIELDS,
        DAILY_FIELDS,
        urlencoding::encode(timezone)
    )
}

//! Weather data models: daily aggregates and raw hourly series

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Daily aggregates for one location and date. Any field may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    /// Mean temperature in Celsius
    pub temperature: Option<f64>,
    /// Precipitation sum in mm
    pub precipitation: Option<f64>,
    /// Snowfall sum in cm
    pub snowfall: Option<f64>,
}

impl DailyWeather {
    #[must_use]
    pub fn new(temperature: f64, precipitation: f64, snowfall: f64) -> Self {
        Self {
            temperature: Some(temperature),
            precipitation: Some(precipitation),
            snowfall: Some(snowfall),
        }
    }
}

/// Hourly series as returned by Open-Meteo.
///
/// Field names on the wire follow the API so the exported JSON matches the
/// request parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Local timestamps, `YYYY-MM-DDTHH:MM`
    #[serde(default)]
    pub time: Vec<String>,
    /// Temperature in Celsius
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Vec<Option<f64>>,
    /// Precipitation in mm
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    /// Snowfall in cm
    #[serde(default)]
    pub snowfall: Vec<Option<f64>>,
    /// WMO weather code
    #[serde(default)]
    pub weather_code: Vec<Option<u8>>,
    /// Cloud cover percentage
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
    /// Wind speed in km/h
    #[serde(rename = "wind_speed_10m", default)]
    pub wind_speed: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Index of the first hour that falls on `date`
    #[must_use]
    pub fn start_of_day(&self, date: NaiveDate) -> Option<usize> {
        self.time.iter().position(|t| {
            NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M")
                .map(|dt| dt.date() == date)
                .unwrap_or(false)
        })
    }

    #[must_use]
    pub fn temperature_at(&self, index: usize) -> Option<f64> {
        self.temperature.get(index).copied().flatten()
    }

    #[must_use]
    pub fn precipitation_at(&self, index: usize) -> Option<f64> {
        self.precipitation.get(index).copied().flatten()
    }
}

/// Forecast and last-year hourly series for one restaurant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyPair {
    pub forecast: HourlySeries,
    pub historical: HourlySeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> HourlySeries {
        HourlySeries {
            time: vec![
                "2026-10-18T22:00".to_string(),
                "2026-10-18T23:00".to_string(),
                "2026-10-19T00:00".to_string(),
                "2026-10-19T01:00".to_string(),
            ],
            temperature: vec![Some(8.0), Some(7.5), None, Some(6.5)],
            precipitation: vec![Some(0.0), Some(0.4), Some(1.2)],
            ..Default::default()
        }
    }

    #[test]
    fn test_start_of_day() {
        let s = series();
        let day = |d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
        assert_eq!(s.start_of_day(day("2026-10-18")), Some(0));
        assert_eq!(s.start_of_day(day("2026-10-19")), Some(2));
        assert_eq!(s.start_of_day(day("2026-10-20")), None);
    }

    #[test]
    fn test_value_access_handles_gaps() {
        let s = series();
        assert_eq!(s.temperature_at(1), Some(7.5));
        assert_eq!(s.temperature_at(2), None);
        assert_eq!(s.precipitation_at(3), None);
        assert_eq!(s.precipitation_at(99), None);
    }

    #[test]
    fn test_deserialize_api_shape() {
        let json = serde_json::json!({
            "time": ["2026-10-18T00:00"],
            "temperature_2m": [7.1],
            "precipitation": [null],
            "snowfall": [0.0],
            "weather_code": [3],
            "cloud_cover": [100],
            "wind_speed_10m": [14.2]
        });
        let s: HourlySeries = serde_json::from_value(json).unwrap();
        assert_eq!(s.temperature_at(0), Some(7.1));
        assert_eq!(s.precipitation_at(0), None);
        assert_eq!(s.weather_code, vec![Some(3)]);
        assert_eq!(s.cloud_cover, vec![Some(100.0)]);

        let back = serde_json::to_value(&s).unwrap();
        assert!(back.get("wind_speed_10m").is_some());
    }
}

//! Hour-by-hour comparison for one restaurant-day

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{HourlyPair, HourlySeries, ImpactRecord};

pub const DETAIL_HOURS: usize = 24;
/// Precipitation difference (mm) that flags an hour
pub const PRECIPITATION_FLAG: f64 = 2.0;

/// Highlight for an hour with a large precipitation difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HourFlag {
    Wetter,
    Drier,
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl HourFlag {
    /// Classify on the one-decimal figures the report shows
    fn classify(forecast: f64, historical: f64) -> Option<Self> {
        let difference = round_tenth(round_tenth(forecast) - round_tenth(historical));
        if difference > PRECIPITATION_FLAG {
            Some(HourFlag::Wetter)
        } else if difference < -PRECIPITATION_FLAG {
            Some(HourFlag::Drier)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourComparison {
    /// `HH:MM` of the forecast hour
    pub label: String,
    pub forecast_temperature: Option<f64>,
    pub historical_temperature: Option<f64>,
    /// Missing values count as 0.0 mm
    pub forecast_precipitation: f64,
    pub historical_precipitation: f64,
    pub flag: Option<HourFlag>,
}

/// Detail payload embedded in the report for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    pub restaurant: String,
    pub forecast_date: NaiveDate,
    pub historical_date: NaiveDate,
    pub hours: Vec<HourComparison>,
}

fn hour_label(series: &HourlySeries, index: usize, hour: usize) -> String {
    series
        .time
        .get(index)
        .and_then(|t| t.get(11..16))
        .map_or_else(|| format!("{hour:02}:00"), str::to_string)
}

/// Pair up the 24 hours starting at each date's first timestamp.
///
/// `None` when either series has no timestamp on its date.
#[must_use]
pub fn compare_day(
    pair: &HourlyPair,
    forecast_date: NaiveDate,
    historical_date: NaiveDate,
) -> Option<Vec<HourComparison>> {
    let forecast_start = pair.forecast.start_of_day(forecast_date)?;
    let historical_start = pair.historical.start_of_day(historical_date)?;

    let hours = (0..DETAIL_HOURS)
        .map(|hour| {
            let f = forecast_start + hour;
            let h = historical_start + hour;
            let forecast_precipitation = pair.forecast.precipitation_at(f).unwrap_or(0.0);
            let historical_precipitation = pair.historical.precipitation_at(h).unwrap_or(0.0);

            HourComparison {
                label: hour_label(&pair.forecast, f, hour),
                forecast_temperature: pair.forecast.temperature_at(f),
                historical_temperature: pair.historical.temperature_at(h),
                forecast_precipitation,
                historical_precipitation,
                flag: HourFlag::classify(forecast_precipitation, historical_precipitation),
            }
        })
        .collect();

    Some(hours)
}

/// Detail for a record, if the restaurant has hourly data covering both dates
#[must_use]
pub fn day_detail(record: &ImpactRecord, pair: &HourlyPair) -> Option<DayDetail> {
    let hours = compare_day(pair, record.forecast_date, record.historical_date)?;
    Some(DayDetail {
        restaurant: record.restaurant.clone(),
        forecast_date: record.forecast_date,
        historical_date: record.historical_date,
        hours,
    })
}

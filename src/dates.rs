//! Forecast / last-year date alignment
//!
//! Each forecast day is paired with the day one year earlier that falls on
//! the same weekday. The pairing approximates "same weekday last year"; it
//! is not "exactly 364 or 365 days ago".

use chrono::{DateTime, Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{Result, WeatherImpactError};

/// Number of forecast days per run
pub const FORECAST_DAYS: usize = 7;

/// A forecast date and its weekday-matched date one year earlier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePair {
    pub forecast: NaiveDate,
    pub historical: NaiveDate,
}

/// Build the seven aligned pairs starting at `start`.
#[must_use]
pub fn align_dates(start: NaiveDate) -> Vec<DatePair> {
    (0..FORECAST_DAYS as i64)
        .map(|offset| {
            let forecast = start + Duration::days(offset);
            DatePair {
                forecast,
                historical: same_weekday_last_year(forecast),
            }
        })
        .collect()
}

/// One calendar year back, then shifted by the signed weekday difference.
///
/// Feb 29 rolls over to Mar 1 before shifting.
#[must_use]
pub fn same_weekday_last_year(date: NaiveDate) -> NaiveDate {
    let year = date.year() - 1;
    let naive = NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date - Duration::days(365));

    let diff = i64::from(date.weekday().num_days_from_sunday())
        - i64::from(naive.weekday().num_days_from_sunday());

    naive + Duration::days(diff)
}

/// Earliest and latest historical date, i.e. the archive request window.
///
/// The signed weekday shift can move a single day backwards by up to six
/// days, so the first and last pair do not necessarily bound the window.
#[must_use]
pub fn historical_range(pairs: &[DatePair]) -> Option<(NaiveDate, NaiveDate)> {
    let min = pairs.iter().map(|p| p.historical).min()?;
    let max = pairs.iter().map(|p| p.historical).max()?;
    Some((min, max))
}

/// Parse the CLI start date: `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_start_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.date_naive())
        .map_err(|_| {
            WeatherImpactError::validation(format!(
                "Start date must look like YYYY-MM-DD, got: '{input}'"
            ))
        })
}

/// Danish weekday name, as used in the report columns
#[must_use]
pub fn weekday_name_da(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mandag",
        Weekday::Tue => "Tirsdag",
        Weekday::Wed => "Onsdag",
        Weekday::Thu => "Torsdag",
        Weekday::Fri => "Fredag",
        Weekday::Sat => "Lørdag",
        Weekday::Sun => "Søndag",
    }
}

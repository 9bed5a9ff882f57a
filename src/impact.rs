//! Impact scoring
//!
//! Turns a forecast day and its last-year counterpart into an
//! [`ImpactLabel`]. Precipitation and especially snowfall dominate; the
//! temperature term only matters when the freezing point is crossed or the
//! change is large.

use crate::models::{DailyWeather, ImpactLabel};

/// Contribution of a newly (or no longer) freezing day
pub const FREEZING_CROSSING: f64 = 3.0;
/// Temperature change above which the large-swing factor applies
pub const LARGE_TEMPERATURE_SWING: f64 = 10.0;
pub const LARGE_SWING_FACTOR: f64 = 0.3;
pub const SMALL_SWING_FACTOR: f64 = 0.1;
/// Penalty per extra mm of rain
pub const PRECIPITATION_FACTOR: f64 = 1.5;
/// Penalty per extra cm of snow
pub const SNOWFALL_FACTOR: f64 = 5.0;
/// Totals beyond +/- this value leave the `Similar` band
pub const LABEL_THRESHOLD: f64 = 3.0;

/// Temperature term of the total
#[must_use]
pub fn temperature_contribution(forecast: f64, historical: f64) -> f64 {
    if forecast < 0.0 && historical >= 0.0 {
        -FREEZING_CROSSING
    } else if forecast >= 0.0 && historical < 0.0 {
        FREEZING_CROSSING
    } else {
        let diff = forecast - historical;
        if diff.abs() > LARGE_TEMPERATURE_SWING {
            diff * LARGE_SWING_FACTOR
        } else {
            diff * SMALL_SWING_FACTOR
        }
    }
}

/// Numeric impact total; positive means better conditions than last year
#[must_use]
pub fn impact_total(
    forecast_temp: f64,
    historical_temp: f64,
    forecast_precip: f64,
    historical_precip: f64,
    forecast_snow: f64,
    historical_snow: f64,
) -> f64 {
    let temperature = temperature_contribution(forecast_temp, historical_temp);
    let precipitation = -(forecast_precip - historical_precip) * PRECIPITATION_FACTOR;
    let snowfall = -(forecast_snow - historical_snow) * SNOWFALL_FACTOR;

    temperature + precipitation + snowfall
}

/// Map a total onto the three labels
#[must_use]
pub fn label_for(total: f64) -> ImpactLabel {
    if total > LABEL_THRESHOLD {
        ImpactLabel::Better
    } else if total < -LABEL_THRESHOLD {
        ImpactLabel::Worse
    } else {
        ImpactLabel::Similar
    }
}

/// Score a day from six known values
#[must_use]
pub fn score(
    forecast_temp: f64,
    historical_temp: f64,
    forecast_precip: f64,
    historical_precip: f64,
    forecast_snow: f64,
    historical_snow: f64,
) -> ImpactLabel {
    label_for(impact_total(
        forecast_temp,
        historical_temp,
        forecast_precip,
        historical_precip,
        forecast_snow,
        historical_snow,
    ))
}

/// Score a day pair; `None` if any of the six values is unknown.
#[must_use]
pub fn score_days(forecast: &DailyWeather, historical: &DailyWeather) -> Option<ImpactLabel> {
    Some(score(
        forecast.temperature?,
        historical.temperature?,
        forecast.precipitation?,
        historical.precipitation?,
        forecast.snowfall?,
        historical.snowfall?,
    ))
}

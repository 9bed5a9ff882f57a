//! Impact labels and per-day output records

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DailyWeather;
use crate::WeatherImpactError;

/// Expected customer-traffic conditions relative to last year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactLabel {
    Better,
    Worse,
    Similar,
}

impl ImpactLabel {
    /// Danish label used in the exported table and report
    #[must_use]
    pub fn danish(self) -> &'static str {
        match self {
            ImpactLabel::Better => "Bedre",
            ImpactLabel::Worse => "Dårligere",
            ImpactLabel::Similar => "Lignende",
        }
    }

    /// CSS class suffix for the report badge
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ImpactLabel::Better => "better",
            ImpactLabel::Worse => "worse",
            ImpactLabel::Similar => "similar",
        }
    }
}

impl fmt::Display for ImpactLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.danish())
    }
}

impl FromStr for ImpactLabel {
    type Err = WeatherImpactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Bedre" | "Better" => Ok(ImpactLabel::Better),
            "Dårligere" | "Worse" => Ok(ImpactLabel::Worse),
            "Lignende" | "Similar" => Ok(ImpactLabel::Similar),
            other => Err(WeatherImpactError::parse(format!(
                "Unknown impact label '{other}'"
            ))),
        }
    }
}

/// One restaurant-day comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRecord {
    pub restaurant: String,
    pub forecast_date: NaiveDate,
    pub historical_date: NaiveDate,
    /// Danish weekday name of the forecast date
    pub weekday: String,
    pub forecast: DailyWeather,
    pub historical: DailyWeather,
    /// `None` when any scorer input was unknown
    pub impact: Option<ImpactLabel>,
}

impl ImpactRecord {
    /// Forecast minus last year's mean temperature, when both are known
    #[must_use]
    pub fn temperature_delta(&self) -> Option<f64> {
        Some(self.forecast.temperature? - self.historical.temperature?)
    }

    #[must_use]
    pub fn precipitation_delta(&self) -> Option<f64> {
        Some(self.forecast.precipitation? - self.historical.precipitation?)
    }

    #[must_use]
    pub fn snowfall_delta(&self) -> Option<f64> {
        Some(self.forecast.snowfall? - self.historical.snowfall?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ImpactLabel::Better, "Bedre")]
    #[case(ImpactLabel::Worse, "Dårligere")]
    #[case(ImpactLabel::Similar, "Lignende")]
    fn test_danish_labels_parse_back(#[case] label: ImpactLabel, #[case] danish: &str) {
        assert_eq!(label.to_string(), danish);
        assert_eq!(danish.parse::<ImpactLabel>().unwrap(), label);
    }

    #[test]
    fn test_unknown_label() {
        assert!("Maybe".parse::<ImpactLabel>().is_err());
    }

    #[test]
    fn test_deltas_need_both_years() {
        let record = ImpactRecord {
            restaurant: "Odense".to_string(),
            forecast_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            historical_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            weekday: "Mandag".to_string(),
            forecast: DailyWeather::new(9.0, 3.0, 0.0),
            historical: DailyWeather {
                temperature: Some(11.5),
                precipitation: None,
                snowfall: Some(0.0),
            },
            impact: None,
        };
        assert_eq!(record.temperature_delta(), Some(-2.5));
        assert_eq!(record.precipitation_delta(), None);
        assert_eq!(record.snowfall_delta(), Some(0.0));
    }
}

//! Aggregate figures and the Danish interpretation shown atop the report

use serde::Serialize;

use crate::models::{ImpactLabel, ImpactRecord};

/// Average temperature shift (°C) that counts as warmer/colder
pub const TEMPERATURE_NOTICE: f64 = 1.0;
/// Average precipitation shift (mm) that counts as wetter/drier
pub const PRECIPITATION_NOTICE: f64 = 5.0;
/// Average snowfall shift (cm) that counts as more/less snow
pub const SNOWFALL_NOTICE: f64 = 1.0;

/// Counts and averages across all records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub better: usize,
    pub worse: usize,
    pub similar: usize,
    /// Records whose impact could not be scored
    pub unscored: usize,
    /// Distinct restaurant names, first-seen order
    pub restaurants: Vec<String>,
    pub avg_temperature_delta: Option<f64>,
    pub avg_precipitation_delta: Option<f64>,
    pub avg_snowfall_delta: Option<f64>,
}

/// Overall direction of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Better,
    Worse,
    Similar,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

impl Summary {
    /// Compute the summary; each average only covers records with both years known
    #[must_use]
    pub fn from_records(records: &[ImpactRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            match record.impact {
                Some(ImpactLabel::Better) => summary.better += 1,
                Some(ImpactLabel::Worse) => summary.worse += 1,
                Some(ImpactLabel::Similar) => summary.similar += 1,
                None => summary.unscored += 1,
            }
            if !summary.restaurants.contains(&record.restaurant) {
                summary.restaurants.push(record.restaurant.clone());
            }
        }

        summary.avg_temperature_delta =
            mean(records.iter().filter_map(ImpactRecord::temperature_delta));
        summary.avg_precipitation_delta =
            mean(records.iter().filter_map(ImpactRecord::precipitation_delta));
        summary.avg_snowfall_delta = mean(records.iter().filter_map(ImpactRecord::snowfall_delta));
        summary
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        use std::cmp::Ordering;
        match self.worse.cmp(&self.better) {
            Ordering::Greater => Verdict::Worse,
            Ordering::Less => Verdict::Better,
            Ordering::Equal => Verdict::Similar,
        }
    }

    /// Three sentences: temperature, precipitation, snow
    #[must_use]
    pub fn interpretation(&self) -> Vec<&'static str> {
        let temperature = self.avg_temperature_delta.unwrap_or(0.0);
        let precipitation = self.avg_precipitation_delta.unwrap_or(0.0);
        let snowfall = self.avg_snowfall_delta.unwrap_or(0.0);

        let temperature_text = if temperature < -TEMPERATURE_NOTICE {
            "Koldere vejr forventes sammenlignet med samme ugedage sidste år."
        } else if temperature > TEMPERATURE_NOTICE {
            "Varmere vejr forventes sammenlignet med samme ugedage sidste år."
        } else {
            "Lignende temperaturer forventes sammenlignet med samme ugedage sidste år."
        };

        let precipitation_text = if precipitation > PRECIPITATION_NOTICE {
            "Betydeligt mere nedbør forventes."
        } else if precipitation < -PRECIPITATION_NOTICE {
            "Betydeligt mindre nedbør forventes."
        } else {
            "Lignende nedbørsniveauer forventes."
        };

        let snowfall_text = if snowfall > SNOWFALL_NOTICE {
            "Mere sne forventes."
        } else if snowfall < -SNOWFALL_NOTICE {
            "Mindre sne forventes."
        } else {
            "Lignende snemængder forventes."
        };

        vec![temperature_text, precipitation_text, snowfall_text]
    }

    #[must_use]
    pub fn verdict_text(&self) -> &'static str {
        match self.verdict() {
            Verdict::Worse => {
                "Samlet set: Vejrforholdene forventes at være DÅRLIGERE end samme ugedage sidste år. \
                 Nedbør og sne har størst betydning for kundetrafik."
            }
            Verdict::Better => {
                "Samlet set: Vejrforholdene forventes at være BEDRE end samme ugedage sidste år."
            }
            Verdict::Similar => {
                "Samlet set: Vejrforholdene forventes at være LIGNENDE samme ugedage sidste år."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyWeather;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn record(name: &str, forecast: DailyWeather, historical: DailyWeather) -> ImpactRecord {
        ImpactRecord {
            restaurant: name.to_string(),
            forecast_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            historical_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            weekday: "Mandag".to_string(),
            impact: crate::impact::score_days(&forecast, &historical),
            forecast,
            historical,
        }
    }

    #[test]
    fn test_counts_and_averages() {
        let records = vec![
            record("Aarhus C", DailyWeather::new(4.0, 12.0, 0.0), DailyWeather::new(8.0, 0.0, 0.0)),
            record("Aarhus C", DailyWeather::new(6.0, 0.0, 0.0), DailyWeather::new(6.0, 0.0, 0.0)),
            record(
                "Odense",
                DailyWeather::new(7.0, 1.0, 0.0),
                DailyWeather {
                    temperature: None,
                    ..DailyWeather::new(0.0, 1.0, 0.0)
                },
            ),
        ];

        let summary = Summary::from_records(&records);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.worse, 1);
        assert_eq!(summary.similar, 1);
        assert_eq!(summary.unscored, 1);
        assert_eq!(summary.restaurants, vec!["Aarhus C", "Odense"]);
        // Odense has no temperature for last year and is left out of that mean
        assert_eq!(summary.avg_temperature_delta, Some(-2.0));
        assert_eq!(summary.avg_precipitation_delta, Some(4.0));
        assert_eq!(summary.avg_snowfall_delta, Some(0.0));
        assert_eq!(summary.verdict(), Verdict::Worse);
    }

    #[test]
    fn test_empty_input() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg_temperature_delta, None);
        assert_eq!(summary.verdict(), Verdict::Similar);
        assert_eq!(
            summary.interpretation()[0],
            "Lignende temperaturer forventes sammenlignet med samme ugedage sidste år."
        );
    }

    #[rstest]
    #[case(-1.5, 6.0, 0.0, ["Koldere", "Betydeligt mere", "Lignende snemængder"])]
    #[case(1.5, -6.0, 2.0, ["Varmere", "Betydeligt mindre", "Mere sne"])]
    #[case(1.0, 5.0, -1.5, ["Lignende temperaturer", "Lignende nedbør", "Mindre sne"])]
    fn test_interpretation_thresholds(
        #[case] temperature: f64,
        #[case] precipitation: f64,
        #[case] snowfall: f64,
        #[case] expected: [&str; 3],
    ) {
        let summary = Summary {
            avg_temperature_delta: Some(temperature),
            avg_precipitation_delta: Some(precipitation),
            avg_snowfall_delta: Some(snowfall),
            ..Summary::default()
        };
        let lines = summary.interpretation();
        for (line, prefix) in lines.iter().zip(expected) {
            assert!(line.starts_with(prefix), "{line} should start with {prefix}");
        }
    }

    #[test]
    fn test_verdict_text() {
        let summary = Summary {
            better: 3,
            worse: 1,
            ..Summary::default()
        };
        assert!(summary.verdict_text().contains("BEDRE"));
    }
}

//! Batch runner
//!
//! Walks the restaurant list strictly in order, one restaurant at a time:
//! validate, pause, fetch forecast, fetch last year, score seven days.
//! Any failure drops the whole restaurant and the run continues.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::dates::{self, DatePair};
use crate::impact;
use crate::models::{HourlyPair, ImpactRecord, Restaurant, RestaurantRow};
use crate::weather::{WeatherPayload, WeatherSource};

/// Output of one batch run
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// One record per processed restaurant per day, in input order
    pub records: Vec<ImpactRecord>,
    /// Raw hourly series by restaurant name
    pub hourly: BTreeMap<String, HourlyPair>,
    pub stats: BatchStats,
}

/// Per-run counters for the final summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub rows: usize,
    pub processed: usize,
    pub invalid_coordinates: usize,
    pub forecast_failures: usize,
    pub historical_failures: usize,
}

impl BatchStats {
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.invalid_coordinates + self.forecast_failures + self.historical_failures
    }
}

/// Sequential runner over a [`WeatherSource`]
pub struct BatchRunner<S: WeatherSource> {
    source: S,
    request_delay: Duration,
}

impl<S: WeatherSource> BatchRunner<S> {
    #[must_use]
    pub fn new(source: S, request_delay: Duration) -> Self {
        Self {
            source,
            request_delay,
        }
    }

    /// Process every row against the seven aligned date pairs
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub async fn run(&self, rows: &[RestaurantRow], pairs: &[DatePair]) -> Report {
        let mut report = Report::default();
        report.stats.rows = rows.len();

        let Some((historical_start, historical_end)) = dates::historical_range(pairs) else {
            warn!("No date pairs given, nothing to do");
            return report;
        };

        for (i, row) in rows.iter().enumerate() {
            info!("[{}/{}] Processing: {}", i + 1, rows.len(), row.name);

            let restaurant = match row.validate() {
                Ok(restaurant) => restaurant,
                Err(e) => {
                    warn!("Skipping {}: {}", row.name, e);
                    report.stats.invalid_coordinates += 1;
                    continue;
                }
            };
            debug!("Coordinates: {}", restaurant.format_coordinates());

            if !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            let forecast = match self
                .source
                .fetch_forecast(restaurant.latitude, restaurant.longitude)
                .await
            {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Skipping {}: forecast fetch failed: {}", restaurant.name, e);
                    report.stats.forecast_failures += 1;
                    continue;
                }
            };

            let historical = match self
                .source
                .fetch_historical(
                    restaurant.latitude,
                    restaurant.longitude,
                    historical_start,
                    historical_end,
                )
                .await
            {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Skipping {}: historical fetch failed: {}", restaurant.name, e);
                    report.stats.historical_failures += 1;
                    continue;
                }
            };

            report
                .records
                .extend(daily_records(&restaurant, pairs, &forecast, &historical));

            if report
                .hourly
                .insert(
                    restaurant.name.clone(),
                    HourlyPair {
                        forecast: forecast.hourly,
                        historical: historical.hourly,
                    },
                )
                .is_some()
            {
                warn!("Duplicate restaurant name {}; hourly data replaced", restaurant.name);
            }

            report.stats.processed += 1;
            info!("{} days analyzed for {}", pairs.len(), restaurant.name);
        }

        report
    }
}

/// Score each date pair from the two payloads' daily series
#[must_use]
pub fn daily_records(
    restaurant: &Restaurant,
    pairs: &[DatePair],
    forecast: &WeatherPayload,
    historical: &WeatherPayload,
) -> Vec<ImpactRecord> {
    pairs
        .iter()
        .map(|pair| {
            let forecast_day = forecast.daily.on(pair.forecast);
            let historical_day = historical.daily.on(pair.historical);

            ImpactRecord {
                restaurant: restaurant.name.clone(),
                forecast_date: pair.forecast,
                historical_date: pair.historical,
                weekday: dates::weekday_name_da(pair.forecast).to_string(),
                impact: impact::score_days(&forecast_day, &historical_day),
                forecast: forecast_day,
                historical: historical_day,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyWeather, HourlySeries, ImpactLabel};
    use crate::weather::DailySeries;
    use crate::{Result, WeatherImpactError};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// Canned payloads keyed by latitude; a missing entry is a failure
    #[derive(Default)]
    struct FakeSource {
        forecasts: Vec<(f64, WeatherPayload)>,
        historicals: Vec<(f64, WeatherPayload)>,
        calls: Mutex<Vec<String>>,
    }

    fn lookup(entries: &[(f64, WeatherPayload)], lat: f64) -> Result<WeatherPayload> {
        entries
            .iter()
            .find(|(l, _)| *l == lat)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| WeatherImpactError::api("HTTP 500"))
    }

    #[async_trait]
    impl WeatherSource for FakeSource {
        async fn fetch_forecast(&self, latitude: f64, _longitude: f64) -> Result<WeatherPayload> {
            self.calls.lock().unwrap().push(format!("forecast {latitude}"));
            lookup(&self.forecasts, latitude)
        }

        async fn fetch_historical(
            &self,
            latitude: f64,
            _longitude: f64,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<WeatherPayload> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("historical {latitude} {start}..{end}"));
            lookup(&self.historicals, latitude)
        }
    }

    fn payload(dates: &[NaiveDate], day: DailyWeather) -> WeatherPayload {
        WeatherPayload {
            daily: DailySeries {
                time: dates.iter().map(|d| d.to_string()).collect(),
                temperature_mean: vec![day.temperature; dates.len()],
                precipitation_sum: vec![day.precipitation; dates.len()],
                snowfall_sum: vec![day.snowfall; dates.len()],
            },
            hourly: HourlySeries {
                time: vec![format!("{}T00:00", dates[0])],
                temperature: vec![day.temperature],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn pairs() -> Vec<DatePair> {
        dates::align_dates(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    fn forecast_dates() -> Vec<NaiveDate> {
        pairs().iter().map(|p| p.forecast).collect()
    }

    fn historical_dates() -> Vec<NaiveDate> {
        pairs().iter().map(|p| p.historical).collect()
    }

    #[tokio::test]
    async fn test_snow_melt_restaurant_is_better_every_day() {
        let source = FakeSource {
            forecasts: vec![(56.0, payload(&forecast_dates(), DailyWeather::new(2.0, 0.0, 0.0)))],
            historicals: vec![
                (56.0, payload(&historical_dates(), DailyWeather::new(1.5, 0.0, 4.0))),
            ],
            ..Default::default()
        };
        let runner = BatchRunner::new(source, Duration::ZERO);
        let rows = vec![RestaurantRow::new("Silkeborg", Some(56.0), Some(9.5))];

        let report = runner.run(&rows, &pairs()).await;

        assert_eq!(report.records.len(), 7);
        assert!(report.records.iter().all(|r| r.impact == Some(ImpactLabel::Better)));
        assert_eq!(report.records[0].weekday, "Søndag");
        assert_eq!(
            report.records[0].historical_date,
            NaiveDate::from_ymd_opt(2025, 10, 12).unwrap()
        );
        assert!(report.hourly.contains_key("Silkeborg"));
        assert_eq!(report.stats.processed, 1);
    }

    #[tokio::test]
    async fn test_historical_failure_drops_restaurant() {
        let source = FakeSource {
            forecasts: vec![
                (55.0, payload(&forecast_dates(), DailyWeather::new(10.0, 8.0, 0.0))),
                (57.0, payload(&forecast_dates(), DailyWeather::new(10.0, 8.0, 0.0))),
            ],
            historicals: vec![
                (57.0, payload(&historical_dates(), DailyWeather::new(10.0, 0.0, 0.0))),
            ],
            ..Default::default()
        };
        let runner = BatchRunner::new(source, Duration::ZERO);
        let rows = vec![
            RestaurantRow::new("Roskilde", Some(55.0), Some(12.0)),
            RestaurantRow::new("Aalborg", Some(57.0), Some(9.9)),
        ];

        let report = runner.run(&rows, &pairs()).await;

        assert_eq!(report.records.len(), 7);
        assert!(report.records.iter().all(|r| r.restaurant == "Aalborg"));
        assert!(report.records.iter().all(|r| r.impact == Some(ImpactLabel::Worse)));
        assert!(!report.hourly.contains_key("Roskilde"));
        assert_eq!(report.stats.historical_failures, 1);
        assert_eq!(report.stats.skipped(), 1);
    }

    #[tokio::test]
    async fn test_invalid_coordinates_make_no_calls() {
        let source = FakeSource::default();
        let runner = BatchRunner::new(source, Duration::ZERO);
        let rows = vec![RestaurantRow::new("Ukendt", None, Some(9.0))];

        let report = runner.run(&rows, &pairs()).await;

        assert!(report.records.is_empty());
        assert_eq!(report.stats.invalid_coordinates, 1);
        assert!(runner.source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forecast_failure_skips_historical_call() {
        let source = FakeSource {
            historicals: vec![
                (55.0, payload(&historical_dates(), DailyWeather::new(1.0, 0.0, 0.0))),
            ],
            ..Default::default()
        };
        let runner = BatchRunner::new(source, Duration::ZERO);
        let rows = vec![RestaurantRow::new("Køge", Some(55.0), Some(12.2))];

        let report = runner.run(&rows, &pairs()).await;

        assert!(report.records.is_empty());
        assert_eq!(report.stats.forecast_failures, 1);
        assert_eq!(*runner.source.calls.lock().unwrap(), vec!["forecast 55".to_string()]);
    }

    #[tokio::test]
    async fn test_historical_request_spans_whole_window() {
        let source = FakeSource {
            forecasts: vec![(56.0, payload(&forecast_dates(), DailyWeather::new(5.0, 0.0, 0.0)))],
            historicals: vec![
                (56.0, payload(&historical_dates(), DailyWeather::new(5.0, 0.0, 0.0))),
            ],
            ..Default::default()
        };
        let runner = BatchRunner::new(source, Duration::ZERO);
        let rows = vec![RestaurantRow::new("Horsens", Some(56.0), Some(9.8))];

        runner.run(&rows, &pairs()).await;

        let calls = runner.source.calls.lock().unwrap();
        assert_eq!(calls[1], "historical 56 2025-10-12..2025-10-25");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_before_each_valid_restaurant() {
        let source = FakeSource {
            forecasts: vec![
                (55.0, payload(&forecast_dates(), DailyWeather::new(5.0, 0.0, 0.0))),
                (56.0, payload(&forecast_dates(), DailyWeather::new(5.0, 0.0, 0.0))),
            ],
            historicals: vec![
                (55.0, payload(&historical_dates(), DailyWeather::new(5.0, 0.0, 0.0))),
                (56.0, payload(&historical_dates(), DailyWeather::new(5.0, 0.0, 0.0))),
            ],
            ..Default::default()
        };
        let runner = BatchRunner::new(source, Duration::from_millis(500));
        let rows = vec![
            RestaurantRow::new("Næstved", Some(55.0), Some(11.76)),
            RestaurantRow::new("Ukendt", None, None),
            RestaurantRow::new("Viborg", Some(56.0), Some(9.4)),
        ];

        let started = tokio::time::Instant::now();
        let report = runner.run(&rows, &pairs()).await;
        let elapsed = started.elapsed();

        assert_eq!(report.stats.processed, 2);
        // invalid rows are skipped before the pause
        assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1500), "{elapsed:?}");
    }

    #[test]
    fn test_missing_day_yields_unscored_record() {
        let restaurant = Restaurant {
            name: "Fredericia".to_string(),
            latitude: 55.56,
            longitude: 9.75,
        };
        let pairs = pairs();
        // forecast only covers the first three days
        let forecast = payload(&forecast_dates()[..3], DailyWeather::new(4.0, 1.0, 0.0));
        let historical = payload(&historical_dates(), DailyWeather::new(4.0, 1.0, 0.0));

        let records = daily_records(&restaurant, &pairs, &forecast, &historical);

        assert_eq!(records.len(), 7);
        assert_eq!(records[2].impact, Some(ImpactLabel::Similar));
        assert_eq!(records[3].impact, None);
        assert_eq!(records[3].forecast, DailyWeather::default());
    }
}

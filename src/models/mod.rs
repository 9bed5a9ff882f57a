//! Data models for the weather impact pipeline
//!
//! - Restaurant: input rows and validated coordinates
//! - Weather: daily aggregates and raw hourly series
//! - Record: impact labels and the per-day output rows

pub mod record;
pub mod restaurant;
pub mod weather;

pub use record::{ImpactLabel, ImpactRecord};
pub use restaurant::{Restaurant, RestaurantRow};
pub use weather::{DailyWeather, HourlyPair, HourlySeries};

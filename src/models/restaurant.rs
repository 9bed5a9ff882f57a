//! Restaurant model: raw input rows and validated locations

use serde::{Deserialize, Serialize};

use crate::{Result, WeatherImpactError};

/// A row as read from the input table, before coordinate validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRow {
    /// Display name
    pub name: String,
    /// Latitude, if the cell held a number
    pub latitude: Option<f64>,
    /// Longitude, if the cell held a number
    pub longitude: Option<f64>,
}

/// A restaurant with usable coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Display name
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl RestaurantRow {
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Check that both coordinates are present, finite and in range
    pub fn validate(&self) -> Result<Restaurant> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(WeatherImpactError::validation(format!(
                "Missing coordinates for '{}'",
                self.name
            )));
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(WeatherImpactError::validation(format!(
                "Non-numeric coordinates for '{}'",
                self.name
            )));
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherImpactError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherImpactError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Restaurant {
            name: self.name.clone(),
            latitude,
            longitude,
        })
    }
}

impl Restaurant {
    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_row() {
        let row = RestaurantRow::new("Aarhus C", Some(56.1572), Some(10.2107));
        let restaurant = row.validate().unwrap();
        assert_eq!(restaurant.name, "Aarhus C");
        assert_eq!(restaurant.format_coordinates(), "56.1572, 10.2107");
    }

    #[rstest]
    #[case(None, Some(10.0))]
    #[case(Some(56.0), None)]
    #[case(Some(f64::NAN), Some(10.0))]
    #[case(Some(56.0), Some(f64::INFINITY))]
    #[case(Some(91.0), Some(10.0))]
    #[case(Some(56.0), Some(-181.0))]
    fn test_invalid_rows(#[case] latitude: Option<f64>, #[case] longitude: Option<f64>) {
        let row = RestaurantRow::new("Broken", latitude, longitude);
        assert!(matches!(
            row.validate(),
            Err(WeatherImpactError::Validation { .. })
        ));
    }

    #[test]
    fn test_zero_coordinates_are_valid() {
        let row = RestaurantRow::new("Null Island", Some(0.0), Some(0.0));
        assert!(row.validate().is_ok());
    }
}

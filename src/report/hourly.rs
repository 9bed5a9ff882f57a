//! Hourly series export: restaurant name -> `{forecast, historical}`

use std::collections::BTreeMap;
use std::path::Path;

use crate::Result;
use crate::models::HourlyPair;

pub type HourlyMap = BTreeMap<String, HourlyPair>;

/// Pretty-printed JSON, Open-Meteo field names
pub fn write_hourly(path: impl AsRef<Path>, hourly: &HourlyMap) -> Result<()> {
    let json = serde_json::to_string_pretty(hourly)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn read_hourly(path: impl AsRef<Path>) -> Result<HourlyMap> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HourlySeries;

    #[test]
    fn test_write_and_read() {
        let mut hourly = HourlyMap::new();
        hourly.insert(
            "Slagelse".to_string(),
            HourlyPair {
                forecast: HourlySeries {
                    time: vec!["2026-10-19T00:00".to_string()],
                    temperature: vec![Some(6.2)],
                    precipitation: vec![None],
                    ..Default::default()
                },
                historical: HourlySeries::default(),
            },
        );
        let file = tempfile::NamedTempFile::new().unwrap();

        write_hourly(file.path(), &hourly).unwrap();
        let raw = std::fs::read_to_string(file.path()).unwrap();
        assert!(raw.contains("\"temperature_2m\""));

        assert_eq!(read_hourly(file.path()).unwrap(), hourly);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_hourly("/no/such/hourly.json").is_err());
    }
}

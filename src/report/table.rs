//! Daily impact table (CSV, Danish headers)

use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::models::{DailyWeather, ImpactLabel, ImpactRecord};
use crate::{Result, WeatherImpactError};

/// Placeholder for unknown values
pub const NOT_AVAILABLE: &str = "N/A";

const COLUMNS: usize = 12;

/// Header row; `year` is the forecast year, the comparison year is `year - 1`
#[must_use]
pub fn headers(year: i32) -> Vec<String> {
    let last = year - 1;
    vec![
        "Restaurant".to_string(),
        "Dato".to_string(),
        "DateISO".to_string(),
        "Sammenligningsdato".to_string(),
        "Ugedag".to_string(),
        format!("Temp {year} (°C)"),
        format!("Temp {last} (°C)"),
        format!("Nedbør {year} (mm)"),
        format!("Nedbør {last} (mm)"),
        format!("Snefald {year} (cm)"),
        format!("Snefald {last} (cm)"),
        "Impact".to_string(),
    ]
}

/// `dd.mm.yyyy`, the Danish short date
#[must_use]
pub fn danish_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// One decimal, or `N/A`
#[must_use]
pub fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.1}"))
}

fn parse_value(cell: &str) -> Result<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() || cell == NOT_AVAILABLE {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| WeatherImpactError::parse(format!("Not a number: '{cell}'")))
}

fn parse_date(cell: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), "%Y-%m-%d")
        .map_err(|_| WeatherImpactError::parse(format!("Not an ISO date: '{cell}'")))
}

fn to_row(record: &ImpactRecord) -> Vec<String> {
    vec![
        record.restaurant.clone(),
        danish_date(record.forecast_date),
        record.forecast_date.format("%Y-%m-%d").to_string(),
        record.historical_date.format("%Y-%m-%d").to_string(),
        record.weekday.clone(),
        format_value(record.forecast.temperature),
        format_value(record.historical.temperature),
        format_value(record.forecast.precipitation),
        format_value(record.historical.precipitation),
        format_value(record.forecast.snowfall),
        format_value(record.historical.snowfall),
        record
            .impact
            .map_or_else(|| NOT_AVAILABLE.to_string(), |label| label.danish().to_string()),
    ]
}

fn from_row(row: &StringRecord) -> Result<ImpactRecord> {
    if row.len() < COLUMNS {
        return Err(WeatherImpactError::parse(format!(
            "Expected {COLUMNS} columns, found {}",
            row.len()
        )));
    }

    let impact = match row[11].trim() {
        "" | NOT_AVAILABLE => None,
        label => Some(label.parse::<ImpactLabel>()?),
    };

    Ok(ImpactRecord {
        restaurant: row[0].to_string(),
        forecast_date: parse_date(&row[2])?,
        historical_date: parse_date(&row[3])?,
        weekday: row[4].to_string(),
        forecast: DailyWeather {
            temperature: parse_value(&row[5])?,
            precipitation: parse_value(&row[7])?,
            snowfall: parse_value(&row[9])?,
        },
        historical: DailyWeather {
            temperature: parse_value(&row[6])?,
            precipitation: parse_value(&row[8])?,
            snowfall: parse_value(&row[10])?,
        },
        impact,
    })
}

/// Write records to any writer
pub fn write_records<W: Write>(writer: W, records: &[ImpactRecord], year: i32) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(headers(year))?;
    for record in records {
        wtr.write_record(to_row(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table to `path`
pub fn write_table(path: impl AsRef<Path>, records: &[ImpactRecord], year: i32) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_records(file, records, year)
}

/// Read records back from any reader
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ImpactRecord>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    rdr.records()
        .map(|row| from_row(&row?))
        .collect()
}

/// Read the table at `path`
pub fn read_table(path: impl AsRef<Path>) -> Result<Vec<ImpactRecord>> {
    let file = std::fs::File::open(path)?;
    read_records(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(restaurant: &str, day: u32, impact: Option<ImpactLabel>) -> ImpactRecord {
        ImpactRecord {
            restaurant: restaurant.to_string(),
            forecast_date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            historical_date: NaiveDate::from_ymd_opt(2025, 10, day + 1).unwrap(),
            weekday: "Mandag".to_string(),
            forecast: DailyWeather::new(9.04, 0.0, 0.0),
            historical: DailyWeather {
                temperature: Some(11.26),
                precipitation: None,
                snowfall: Some(1.0),
            },
            impact,
        }
    }

    #[test]
    fn test_headers_use_forecast_year() {
        let h = headers(2026);
        assert_eq!(h.len(), COLUMNS);
        assert_eq!(h[5], "Temp 2026 (°C)");
        assert_eq!(h[8], "Nedbør 2025 (mm)");
        assert_eq!(h[10], "Snefald 2025 (cm)");
    }

    #[test]
    fn test_row_formatting() {
        let row = to_row(&record("Næstved", 19, Some(ImpactLabel::Worse)));
        assert_eq!(row[1], "19.10.2026");
        assert_eq!(row[3], "2025-10-20");
        assert_eq!(row[5], "9.0");
        assert_eq!(row[6], "11.3");
        assert_eq!(row[7], "0.0");
        assert_eq!(row[8], "N/A");
        assert_eq!(row[11], "Dårligere");
    }

    #[test]
    fn test_round_trip_through_file() {
        let records = vec![
            record("Næstved", 19, Some(ImpactLabel::Worse)),
            record("Næstved", 20, None),
            record("Hillerød, Slotsgade", 19, Some(ImpactLabel::Better)),
        ];
        let file = tempfile::NamedTempFile::new().unwrap();

        write_table(file.path(), &records, 2026).unwrap();
        let back = read_table(file.path()).unwrap();

        let triples = |rs: &[ImpactRecord]| {
            rs.iter()
                .map(|r| (r.restaurant.clone(), r.forecast_date, r.impact))
                .collect::<Vec<_>>()
        };
        assert_eq!(triples(&back), triples(&records));
        assert_eq!(back[0].historical.precipitation, None);
        assert_eq!(back[0].historical.temperature, Some(11.3));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let csv = "Restaurant,Dato\nOdense,19.10.2026\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, WeatherImpactError::Parse { .. }));
    }
}

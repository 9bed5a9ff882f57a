//! Restaurant table loader
//!
//! Reads a CSV export of the restaurant sheet. Coordinates come from the
//! `Latitude`/`Longitude` columns. The name is picked per row: the cell under
//! the first empty header, else the `Restaurant` cell, else a positional
//! `Restaurant {n}`.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::models::RestaurantRow;
use crate::{Result, WeatherImpactError};

const LATITUDE_HEADERS: [&str; 3] = ["latitude", "lat", "breddegrad"];
const LONGITUDE_HEADERS: [&str; 4] = ["longitude", "lon", "lng", "længdegrad"];

/// Column layout discovered from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Header names, in file order
    pub headers: Vec<String>,
    /// First column with an empty header
    pub empty_header: Option<usize>,
    /// Column headed `Restaurant`
    pub restaurant: Option<usize>,
    pub latitude: Option<usize>,
    pub longitude: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |candidates: &[&str]| {
            headers
                .iter()
                .position(|h| candidates.contains(&h.trim().to_lowercase().as_str()))
        };

        Self {
            headers: headers.iter().map(str::to_string).collect(),
            empty_header: headers.iter().position(|h| h.trim().is_empty()),
            restaurant: headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case("restaurant")),
            latitude: find(&LATITUDE_HEADERS),
            longitude: find(&LONGITUDE_HEADERS),
        }
    }

    /// Whether both coordinate columns were found
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// First non-empty name cell of `record`, else `Restaurant {row_number}`
    fn name_for(&self, record: &StringRecord, row_number: usize) -> String {
        [self.empty_header, self.restaurant]
            .into_iter()
            .flatten()
            .filter_map(|idx| record.get(idx))
            .find(|value| !value.is_empty())
            .map_or_else(|| format!("Restaurant {row_number}"), str::to_string)
    }
}

/// Parsed restaurant table
#[derive(Debug, Clone)]
pub struct RestaurantTable {
    pub layout: ColumnLayout,
    pub rows: Vec<RestaurantRow>,
}

/// Read the restaurant table from a CSV file
pub fn read_restaurants(path: impl AsRef<Path>) -> Result<RestaurantTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        WeatherImpactError::validation(format!(
            "Cannot open restaurant table {}: {e}",
            path.display()
        ))
    })?;
    parse_restaurants(file)
}

/// Parse a restaurant table from any CSV reader
pub fn parse_restaurants<R: Read>(reader: R) -> Result<RestaurantTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let layout = ColumnLayout::from_headers(rdr.headers()?);
    debug!("Restaurant table columns: {:?}", layout.headers);

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        rows.push(RestaurantRow {
            name: layout.name_for(&record, i + 1),
            latitude: layout.latitude.and_then(|idx| parse_coordinate(record.get(idx))),
            longitude: layout.longitude.and_then(|idx| parse_coordinate(record.get(idx))),
        });
    }

    Ok(RestaurantTable { layout, rows })
}

/// Accepts `55.67` and the Danish decimal comma `55,67`
fn parse_coordinate(cell: Option<&str>) -> Option<f64> {
    let cell = cell?.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>()
        .or_else(|_| cell.replace(',', ".").parse::<f64>())
        .ok()
}

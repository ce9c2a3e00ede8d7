//! In-memory postal code table loaded from a GeoNames postal-code dump.
//!
//! Row layout (tab-separated):
//! country, postal code, place name, admin name1, admin code1, admin name2,
//! admin code2, admin name3, admin code3, latitude, longitude, accuracy

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use super::{Coordinate, GeoError, Geocoder};

const POSTAL_CODE_COLUMN: usize = 1;
const LATITUDE_COLUMN: usize = 9;
const LONGITUDE_COLUMN: usize = 10;
const MIN_COLUMNS: usize = LONGITUDE_COLUMN + 1;

#[derive(Debug, Default)]
pub struct ZipTable {
    // A known code with `None` has a row but no usable coordinates.
    entries: HashMap<String, Option<Coordinate>>,
}

impl ZipTable {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeoError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table = Self::parse(&contents)?;
        info!(
            "Loaded {} postal codes from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn parse(contents: &str) -> Result<Self, GeoError> {
        let mut entries = HashMap::new();

        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() < MIN_COLUMNS {
                return Err(GeoError::MalformedRow {
                    line: idx + 1,
                    expected: MIN_COLUMNS,
                    found: columns.len(),
                });
            }

            let code = columns[POSTAL_CODE_COLUMN].trim();
            if code.is_empty() {
                continue;
            }

            let coordinate = parse_coordinate(columns[LATITUDE_COLUMN], columns[LONGITUDE_COLUMN]);
            if coordinate.is_none() {
                debug!("Postal code {code} has no usable coordinates");
            }

            // GeoNames lists a handful of codes twice; keep the first row.
            entries.entry(code.to_string()).or_insert(coordinate);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Geocoder for ZipTable {
    fn lookup(&self, postal_code: &str) -> Option<Coordinate> {
        self.entries.get(postal_code.trim()).copied().flatten()
    }
}

fn parse_coordinate(lat: &str, lon: &str) -> Option<Coordinate> {
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lon.trim().parse::<f64>().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    Some(Coordinate {
        latitude,
        longitude,
    })
}

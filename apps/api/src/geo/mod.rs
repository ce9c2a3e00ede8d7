// Geo-distance calculator: postal code resolution and great-circle distance.
// Lookups go through the `Geocoder` trait so the table can be swapped in tests.

pub mod distance;
pub mod zip_table;

use thiserror::Error;

pub use distance::{attach_distances, distance};
pub use zip_table::ZipTable;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolves a postal code to coordinates. `None` means "no match",
/// which callers treat as a soft failure rather than an error.
pub trait Geocoder: Send + Sync {
    fn lookup(&self, postal_code: &str) -> Option<Coordinate>;
}

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("failed to read postal code table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed postal code row at line {line}: expected at least {expected} columns, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

use tracing::debug;

use super::{Coordinate, Geocoder};

/// Earth's radius in miles
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A record that sits at a postal code and can carry a distance-from-home.
pub trait Locatable {
    fn postal_code(&self) -> &str;
    fn set_distance(&mut self, miles: Option<f64>);
}

/// Calculate the Haversine distance between two points in miles (unrounded)
#[inline]
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Great-circle distance in miles between two postal codes, rounded to 2 decimals.
///
/// Returns `None` when either code does not resolve.
pub fn distance(geocoder: &dyn Geocoder, zip_a: &str, zip_b: &str) -> Option<f64> {
    let from = geocoder.lookup(zip_a)?;
    let to = geocoder.lookup(zip_b)?;
    Some(round_to_hundredths(haversine_miles(from, to)))
}

/// Sets `distance` on every record relative to `user_zip`.
///
/// Order and length are preserved; nothing is filtered or sorted.
pub fn attach_distances<T: Locatable>(geocoder: &dyn Geocoder, user_zip: &str, records: &mut [T]) {
    for record in records.iter_mut() {
        let miles = distance(geocoder, user_zip, record.postal_code());
        if miles.is_none() {
            debug!(
                "No distance between {} and {}",
                user_zip,
                record.postal_code()
            );
        }
        record.set_distance(miles);
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

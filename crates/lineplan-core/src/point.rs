//! Geographic points and distances.

use crate::units::{DistrictName, Meter};
use serde::{Deserialize, Serialize};

/// Mean earth radius in meters (IUGG).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A WGS84 coordinate pair.
///
/// Equality and hashing go through the bit pattern of both coordinates, so
/// points can be deduplicated in sets and used as map keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointIn2D {
    pub lat: f64,
    pub long: f64,
}

impl PartialEq for PointIn2D {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.long.to_bits() == other.long.to_bits()
    }
}

impl Eq for PointIn2D {}

impl std::hash::Hash for PointIn2D {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.long.to_bits().hash(state);
    }
}

/// Great-circle distance between two WGS84 points, via the haversine formula.
pub fn distance_in_m(first: PointIn2D, second: PointIn2D) -> Meter {
    let lat_1 = first.lat.to_radians();
    let lat_2 = second.lat.to_radians();
    let d_lat = (second.lat - first.lat).to_radians();
    let d_long = (second.long - first.long).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat_1.cos() * lat_2.cos() * (d_long / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    Meter::new(EARTH_RADIUS_M * c)
}

/// A demand-district sampling point, associated with its nearest station
/// during demand ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictPoint {
    pub position: PointIn2D,
    pub district_name: DistrictName,
    pub id: String,
}

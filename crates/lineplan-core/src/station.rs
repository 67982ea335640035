//! Stations and their geographic footprint.

use crate::error::ModelError;
use crate::point::{DistrictPoint, PointIn2D};
use crate::units::{DistrictName, LineNr, StationName};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// A named stop location, possibly covering several physical stop points
/// (one per platform or curb side).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub name: StationName,
    pub points: Vec<PointIn2D>,
    pub lines: Vec<LineNr>,
    pub district_points: Vec<DistrictPoint>,
    pub district_names: Vec<DistrictName>,
    #[serde(skip)]
    center: OnceCell<PointIn2D>,
}

impl Station {
    /// A station must have at least one coordinate point, so its center
    /// position is always defined.
    pub fn new(
        name: StationName,
        points: Vec<PointIn2D>,
        lines: Vec<LineNr>,
    ) -> Result<Self, ModelError> {
        if points.is_empty() {
            return Err(ModelError::StationWithoutPoints(name));
        }
        Ok(Self {
            name,
            points,
            lines,
            district_points: Vec::new(),
            district_names: Vec::new(),
            center: OnceCell::new(),
        })
    }

    pub fn with_district_points(mut self, district_points: Vec<DistrictPoint>) -> Self {
        self.district_names = district_points
            .iter()
            .map(|p| p.district_name.clone())
            .collect();
        self.district_points = district_points;
        self
    }

    /// Componentwise mean of all stop points, computed once and cached.
    pub fn center_position(&self) -> PointIn2D {
        *self.center.get_or_init(|| {
            let count = self.points.len() as f64;
            PointIn2D {
                lat: self.points.iter().map(|p| p.lat).sum::<f64>() / count,
                long: self.points.iter().map(|p| p.long).sum::<f64>() / count,
            }
        })
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.points == other.points
            && self.lines == other.lines
            && self.district_points == other.district_points
            && self.district_names == other.district_names
    }
}

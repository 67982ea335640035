//! Directed stop sequences of a bus line.

use crate::error::ModelError;
use crate::recorded::RecordedTrip;
use crate::units::{DirectionName, StationName};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One directed run of a line: the ordered stops and the travel time of each
/// consecutive segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub name: DirectionName,
    pub station_names: Vec<StationName>,
    pub trip_times: Vec<Duration>,
    pub recorded_trips: Vec<RecordedTrip>,
}

impl Direction {
    /// There must be exactly one trip time per consecutive station pair;
    /// alternatively both sequences may be empty.
    pub fn new(
        name: DirectionName,
        station_names: Vec<StationName>,
        trip_times: Vec<Duration>,
    ) -> Result<Self, ModelError> {
        let empty = station_names.is_empty() && trip_times.is_empty();
        if !empty && station_names.len() != trip_times.len() + 1 {
            return Err(ModelError::TripTimesMismatch {
                direction: name,
                station_count: station_names.len(),
                trip_time_count: trip_times.len(),
            });
        }
        Ok(Self {
            name,
            station_names,
            trip_times,
            recorded_trips: Vec::new(),
        })
    }

    pub fn with_recorded_trips(mut self, recorded_trips: Vec<RecordedTrip>) -> Self {
        self.recorded_trips = recorded_trips;
        self
    }

    pub fn station_count(&self) -> usize {
        self.station_names.len()
    }

    /// Consecutive station pairs, in travel order.
    pub fn stations_as_pairs(&self) -> impl Iterator<Item = (&StationName, &StationName)> {
        self.station_names.iter().zip(self.station_names.iter().skip(1))
    }

    /// Each consecutive pair together with the segment travel time.
    pub fn trip_time_by_pair(
        &self,
    ) -> impl Iterator<Item = ((&StationName, &StationName), Duration)> {
        self.stations_as_pairs().zip(self.trip_times.iter().copied())
    }

    /// Total scheduled travel time over all segments.
    pub fn total_trip_time(&self) -> Duration {
        self.trip_times.iter().sum()
    }
}

//! Recorded trips from vehicle measurements.
//!
//! Measurement enrichment happens outside the core; these types only carry
//! the data through the planning pipeline unchanged.

use crate::units::{CirculationId, StationName, TripNr};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One observed stop event of a recorded trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub station: StationName,
    pub arrival_planned: Option<NaiveDateTime>,
    pub arrival_observed: Option<NaiveDateTime>,
    pub departure_planned: Option<NaiveDateTime>,
    pub departure_observed: Option<NaiveDateTime>,
}

/// A single measured vehicle run between two terminal stops.
///
/// Ignored by the optimisation, but preserved on [`crate::Direction`] so that
/// enriched scenarios survive round-tripping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedTrip {
    pub number: TripNr,
    pub circulation_id: CirculationId,
    pub start: StationName,
    pub end: StationName,
    pub stop_count: usize,
    pub record: Vec<TripRecord>,
}

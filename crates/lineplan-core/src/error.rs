//! Error types for the domain model.

use crate::units::{DirectionName, StationName};
use thiserror::Error;

/// Violations of domain-model invariants at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A direction needs one trip time per consecutive station pair.
    #[error(
        "direction {direction} has {station_count} stations but {trip_time_count} trip times"
    )]
    TripTimesMismatch {
        direction: DirectionName,
        station_count: usize,
        trip_time_count: usize,
    },

    /// A station must carry at least one coordinate point.
    #[error("station {0} has no coordinate points")]
    StationWithoutPoints(StationName),

    /// Walk generation divides distances by the walking speed.
    #[error("walking speed between stations must be positive, got {0} m/s")]
    NonPositiveWalkingSpeed(f64),
}

/// A scenario referencing stops that no line serves.
///
/// All three kinds are fatal preconditions: the line planning network can
/// only route passengers over stations that appear in some direction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("stations not served by any line: {}", join_names(.0))]
    StationsNotServed(Vec<StationName>),

    #[error("demand origins or destinations not served by any line: {}", join_names(.0))]
    DemandNotServed(Vec<StationName>),

    #[error("walk endpoints not served by any line: {}", join_names(.0))]
    WalkEndpointsNotServed(Vec<StationName>),
}

fn join_names(names: &[StationName]) -> String {
    names
        .iter()
        .map(StationName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

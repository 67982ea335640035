//! Candidate bus lines.

use crate::direction::Direction;
use crate::units::{Capacity, LineFrequency, LineName, LineNr};
use serde::{Deserialize, Serialize};

/// A candidate bus line with its two directed stop sequences and the menu of
/// service frequencies the planner may choose from.
///
/// Frequency positivity is deliberately not checked here; the line planning
/// network rejects non-positive frequencies when it derives waiting times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusLine {
    pub number: LineNr,
    pub name: LineName,
    pub direction_a: Direction,
    pub direction_b: Direction,
    pub capacity: Capacity,
    pub permitted_frequencies: Vec<LineFrequency>,
}

impl BusLine {
    pub fn new(
        number: LineNr,
        name: LineName,
        direction_a: Direction,
        direction_b: Direction,
        capacity: Capacity,
        permitted_frequencies: Vec<LineFrequency>,
    ) -> Self {
        Self {
            number,
            name,
            direction_a,
            direction_b,
            capacity,
            permitted_frequencies,
        }
    }

    /// Copy-update of the frequency menu, e.g. to pin a selected frequency.
    pub fn with_permitted_frequencies(mut self, permitted_frequencies: Vec<LineFrequency>) -> Self {
        self.permitted_frequencies = permitted_frequencies;
        self
    }

    /// Copy-update of the vehicle capacity.
    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn directions(&self) -> [&Direction; 2] {
        [&self.direction_a, &self.direction_b]
    }
}

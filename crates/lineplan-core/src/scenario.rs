//! Planning scenarios and their consistency preconditions.

use crate::demand::DemandMatrix;
use crate::error::ScenarioError;
use crate::line::BusLine;
use crate::station::Station;
use crate::units::StationName;
use crate::walking::WalkableDistance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the planner needs: demand, candidate lines, walk links and the
/// stations they reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningScenario {
    pub demand_matrix: DemandMatrix,
    pub bus_lines: Vec<BusLine>,
    pub walkable_distances: Vec<WalkableDistance>,
    pub stations: Vec<Station>,
}

impl PlanningScenario {
    pub fn new(
        demand_matrix: DemandMatrix,
        bus_lines: Vec<BusLine>,
        walkable_distances: Vec<WalkableDistance>,
        stations: Vec<Station>,
    ) -> Self {
        Self {
            demand_matrix,
            bus_lines,
            walkable_distances,
            stations,
        }
    }

    /// Copy-update of the candidate lines.
    pub fn with_bus_lines(mut self, bus_lines: Vec<BusLine>) -> Self {
        self.bus_lines = bus_lines;
        self
    }

    /// Copy-update of the demand matrix.
    pub fn with_demand_matrix(mut self, demand_matrix: DemandMatrix) -> Self {
        self.demand_matrix = demand_matrix;
        self
    }

    /// All station names that appear in some direction of some line.
    pub fn served_station_names(&self) -> BTreeSet<StationName> {
        self.bus_lines
            .iter()
            .flat_map(|line| line.directions())
            .flat_map(|direction| direction.station_names.iter().cloned())
            .collect()
    }

    /// Verify that stations, demand and walk links only reference stops that
    /// some line serves. A pure precondition check; nothing is mutated.
    pub fn check_consistency(&self) -> Result<(), ScenarioError> {
        let served = self.served_station_names();
        self.check_stations_are_served(&served)?;
        self.check_demand_is_served(&served)?;
        self.check_walks_are_served(&served)?;
        Ok(())
    }

    fn check_stations_are_served(
        &self,
        served: &BTreeSet<StationName>,
    ) -> Result<(), ScenarioError> {
        let unserved: Vec<StationName> = self
            .stations
            .iter()
            .map(|station| station.name.clone())
            .filter(|name| !served.contains(name))
            .collect();
        if unserved.is_empty() {
            Ok(())
        } else {
            Err(ScenarioError::StationsNotServed(sorted(unserved)))
        }
    }

    fn check_demand_is_served(&self, served: &BTreeSet<StationName>) -> Result<(), ScenarioError> {
        let mut unserved = BTreeSet::new();
        for (origin, row) in &self.demand_matrix.matrix {
            if !served.contains(origin) {
                unserved.insert(origin.clone());
            }
            for destination in row.keys() {
                if !served.contains(destination) {
                    unserved.insert(destination.clone());
                }
            }
        }
        if unserved.is_empty() {
            Ok(())
        } else {
            Err(ScenarioError::DemandNotServed(unserved.into_iter().collect()))
        }
    }

    fn check_walks_are_served(&self, served: &BTreeSet<StationName>) -> Result<(), ScenarioError> {
        let mut unserved = BTreeSet::new();
        for walk in &self.walkable_distances {
            for endpoint in [&walk.starting_at, &walk.ending_at] {
                if !served.contains(&endpoint.name) {
                    unserved.insert(endpoint.name.clone());
                }
            }
        }
        if unserved.is_empty() {
            Ok(())
        } else {
            Err(ScenarioError::WalkEndpointsNotServed(
                unserved.into_iter().collect(),
            ))
        }
    }
}

fn sorted(mut names: Vec<StationName>) -> Vec<StationName> {
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::point::PointIn2D;
    use crate::units::{Capacity, DirectionName, LineFrequency, LineName, LineNr};
    use std::time::Duration;

    fn station(name: &str) -> Station {
        Station::new(
            StationName::from(name),
            vec![PointIn2D { lat: 47.5, long: 8.72 }],
            vec![LineNr::new(1)],
        )
        .unwrap()
    }

    fn direction(name: &str, stops: &[&str]) -> Direction {
        Direction::new(
            DirectionName::from(name),
            stops.iter().copied().map(StationName::from).collect(),
            vec![Duration::from_secs(300); stops.len().saturating_sub(1)],
        )
        .unwrap()
    }

    fn scenario() -> PlanningScenario {
        let line = BusLine::new(
            LineNr::new(1),
            LineName::from("1"),
            direction("a", &["A", "B"]),
            direction("b", &["B", "A"]),
            Capacity::new(100),
            vec![LineFrequency::new(2)],
        );
        PlanningScenario::new(
            DemandMatrix::from_relations([("A", "B", 10.0)]),
            vec![line],
            vec![],
            vec![station("A"), station("B")],
        )
    }

    #[test]
    fn consistent_scenarios_pass() {
        assert!(scenario().check_consistency().is_ok());
    }

    #[test]
    fn unserved_stations_are_reported() {
        let mut inconsistent = scenario();
        inconsistent.stations.push(station("Geisterhalt"));
        let error = inconsistent.check_consistency().unwrap_err();
        match error {
            ScenarioError::StationsNotServed(names) => {
                assert_eq!(names, vec![StationName::from("Geisterhalt")]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unserved_demand_is_reported() {
        let inconsistent = scenario()
            .with_demand_matrix(DemandMatrix::from_relations([("A", "X", 5.0), ("Y", "B", 1.0)]));
        let error = inconsistent.check_consistency().unwrap_err();
        match error {
            ScenarioError::DemandNotServed(names) => {
                assert_eq!(names, vec![StationName::from("X"), StationName::from("Y")]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unserved_walk_endpoints_are_reported() {
        let mut inconsistent = scenario();
        inconsistent.walkable_distances.push(WalkableDistance {
            starting_at: station("A"),
            ending_at: station("Abseits"),
            walking_time: Duration::from_secs(120),
        });
        let error = inconsistent.check_consistency().unwrap_err();
        match error {
            ScenarioError::WalkEndpointsNotServed(names) => {
                assert_eq!(names, vec![StationName::from("Abseits")]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}

//! Synthetic planning scenarios.
//!
//! Small, fully specified scenarios with known optimal structure, used by
//! the optimisation tests and as executable documentation of the domain
//! model. All constructors return consistent scenarios: every station,
//! demand relation and walk endpoint is served by some line.

use anyhow::Result;
use lineplan_core::{
    BusLine, Capacity, Chf, DemandMatrix, Direction, DirectionName, LineFrequency, LineName,
    LineNr, LinePlanningParameters, Meter, MeterPerSecond, PlanningScenario, PointIn2D, Station,
    StationName, WalkableDistance,
};
use std::time::Duration;

/// Baseline parameter set: one hour period, waiting and walking weighted
/// twice as heavily as riding, five minute terminal dwell.
pub fn baseline_parameters() -> LinePlanningParameters {
    LinePlanningParameters {
        egress_time_weight: 0.0,
        waiting_time_weight: 2.0,
        in_vehicle_time_weight: 1.0,
        walking_time_weight: 2.0,
        dwell_time_at_terminal: Duration::from_secs(5 * 60),
        period_duration: Duration::from_secs(3600),
        vehicle_cost_per_period: Chf::new(1000),
        permitted_frequencies: [1, 2, 3, 4, 5, 6, 8, 10]
            .into_iter()
            .map(LineFrequency::new)
            .collect(),
        demand_scaling: 0.1,
        demand_association_radius: Meter::new(500.0),
        walking_speed_between_stations: MeterPerSecond::new(0.6),
        maximal_walking_distance: Meter::new(300.0),
        maximal_number_of_vehicles: None,
    }
}

/// Four stops on one corridor, served by a stopping line and an express.
///
/// Line 1 runs `A-B-C-D` and back with 300 s segments; line 2 connects the
/// termini directly. Both carry 100 passengers per vehicle and may run once
/// or twice per period. Demand flows out of both ends of the corridor; there
/// is no walking.
pub fn corridor_scenario() -> Result<PlanningScenario> {
    let segment = Duration::from_secs(300);
    let stopping = BusLine::new(
        LineNr::new(1),
        LineName::from("1"),
        direction("a", &["A", "B", "C", "D"], segment)?,
        direction("b", &["D", "C", "B", "A"], segment)?,
        Capacity::new(100),
        frequencies(&[1, 2]),
    );
    let express = BusLine::new(
        LineNr::new(2),
        LineName::from("2"),
        direction("a", &["A", "D"], segment)?,
        direction("b", &["D", "A"], segment)?,
        Capacity::new(100),
        frequencies(&[1, 2]),
    );

    let demand = DemandMatrix::from_relations([
        ("A", "B", 100.0),
        ("A", "C", 50.0),
        ("A", "D", 100.0),
        ("D", "A", 100.0),
        ("D", "B", 50.0),
        ("D", "C", 100.0),
    ]);

    Ok(PlanningScenario::new(
        demand,
        vec![stopping, express],
        vec![],
        corridor_stations(&[1, 2])?,
    ))
}

/// Four fully inter-walkable stations served by a single asymmetric line.
///
/// The line stops everywhere outbound (`A-B-C-D`, 300 s segments) but
/// returns nonstop (`D-A`, 300 s). Every station pair is walkable in 300 s,
/// and 100 passengers want to travel each way between the termini. Whether
/// they ride or walk is decided entirely by the weights.
pub fn walking_mesh_scenario() -> Result<PlanningScenario> {
    let segment = Duration::from_secs(300);
    let line = BusLine::new(
        LineNr::new(1),
        LineName::from("1"),
        direction("a", &["A", "B", "C", "D"], segment)?,
        direction("b", &["D", "A"], segment)?,
        Capacity::new(100),
        frequencies(&[1, 2]),
    );

    let stations = corridor_stations(&[1])?;
    let mut walkable_distances = Vec::new();
    for (index, first) in stations.iter().enumerate() {
        for second in &stations[index + 1..] {
            walkable_distances.push(WalkableDistance {
                starting_at: first.clone(),
                ending_at: second.clone(),
                walking_time: Duration::from_secs(300),
            });
        }
    }

    let demand = DemandMatrix::from_relations([("A", "D", 100.0), ("D", "A", 100.0)]);

    Ok(PlanningScenario::new(
        demand,
        vec![line],
        walkable_distances,
        stations,
    ))
}

fn corridor_stations(serving_lines: &[u32]) -> Result<Vec<Station>> {
    let coordinates = [
        ("A", 47.490, 8.720),
        ("B", 47.500, 8.732),
        ("C", 47.510, 8.744),
        ("D", 47.520, 8.756),
    ];
    let lines: Vec<LineNr> = serving_lines.iter().copied().map(LineNr::new).collect();
    coordinates
        .into_iter()
        .map(|(name, lat, long)| {
            Ok(Station::new(
                StationName::from(name),
                vec![PointIn2D { lat, long }],
                lines.clone(),
            )?)
        })
        .collect()
}

fn direction(name: &str, stops: &[&str], segment: Duration) -> Result<Direction> {
    Ok(Direction::new(
        DirectionName::from(name),
        stops.iter().copied().map(StationName::from).collect(),
        vec![segment; stops.len() - 1],
    )?)
}

fn frequencies(values: &[u32]) -> Vec<LineFrequency> {
    values.iter().copied().map(LineFrequency::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corridor_scenario_is_consistent() {
        let scenario = corridor_scenario().unwrap();
        scenario.check_consistency().unwrap();
        assert_eq!(scenario.bus_lines.len(), 2);
        assert_eq!(scenario.demand_matrix.total(), 500.0);
        assert_eq!(scenario.demand_matrix.positive_relation_count(), 6);
        assert!(scenario.walkable_distances.is_empty());
    }

    #[test]
    fn walking_mesh_scenario_is_consistent() {
        let scenario = walking_mesh_scenario().unwrap();
        scenario.check_consistency().unwrap();
        assert_eq!(scenario.bus_lines.len(), 1);
        // Six unordered pairs over four stations.
        assert_eq!(scenario.walkable_distances.len(), 6);
        assert_eq!(scenario.demand_matrix.total(), 200.0);
    }

    #[test]
    fn baseline_parameters_cover_the_default_frequency_menu() {
        let parameters = baseline_parameters();
        assert_eq!(parameters.permitted_frequencies.len(), 8);
        assert_eq!(parameters.period_duration, Duration::from_secs(3600));
        assert!(parameters.maximal_number_of_vehicles.is_none());
    }
}

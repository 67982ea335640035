//! Walk links between nearby stations.
//!
//! Walking complements the bus network: two stations within the configured
//! walking distance are connected by a walk link, so passengers can cover
//! short hops or reach a better-served stop on foot.

use crate::error::ModelError;
use crate::parameters::LinePlanningParameters;
use crate::point::distance_in_m;
use crate::station::Station;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A walkable connection between two stations.
///
/// One value per unordered pair; walking is symmetric and the line planning
/// network derives a directed link for each direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkableDistance {
    pub starting_at: Station,
    pub ending_at: Station,
    pub walking_time: Duration,
}

/// Connect every pair of stations whose center positions are closer than
/// `maximal_walking_distance`, with the walk time derived from
/// `walking_speed_between_stations`.
pub fn find_all_walkable_distances(
    stations: &[Station],
    parameters: &LinePlanningParameters,
) -> Result<Vec<WalkableDistance>, ModelError> {
    let speed = parameters.walking_speed_between_stations;
    if !(speed.value() > 0.0) {
        return Err(ModelError::NonPositiveWalkingSpeed(speed.value()));
    }

    let mut walkable = Vec::new();
    for (index, first) in stations.iter().enumerate() {
        for second in &stations[index + 1..] {
            let distance = distance_in_m(first.center_position(), second.center_position());
            if distance < parameters.maximal_walking_distance {
                walkable.push(WalkableDistance {
                    starting_at: first.clone(),
                    ending_at: second.clone(),
                    walking_time: Duration::from_secs_f64(distance / speed),
                });
            }
        }
    }
    Ok(walkable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointIn2D;
    use crate::units::{Chf, LineFrequency, Meter, MeterPerSecond, StationName};

    fn parameters(max_walk_m: f64, speed: f64) -> LinePlanningParameters {
        LinePlanningParameters {
            egress_time_weight: 0.0,
            waiting_time_weight: 2.0,
            in_vehicle_time_weight: 1.0,
            walking_time_weight: 2.0,
            dwell_time_at_terminal: Duration::from_secs(300),
            period_duration: Duration::from_secs(3600),
            vehicle_cost_per_period: Chf::new(1000),
            permitted_frequencies: vec![LineFrequency::new(1)],
            demand_scaling: 1.0,
            demand_association_radius: Meter::new(500.0),
            walking_speed_between_stations: MeterPerSecond::new(speed),
            maximal_walking_distance: Meter::new(max_walk_m),
            maximal_number_of_vehicles: None,
        }
    }

    fn station(name: &str, lat: f64, long: f64) -> Station {
        Station::new(StationName::from(name), vec![PointIn2D { lat, long }], vec![]).unwrap()
    }

    #[test]
    fn only_pairs_below_the_threshold_are_connected() {
        // Roughly 111 m per 0.001 degrees of latitude.
        let stations = vec![
            station("Near A", 47.500, 8.720),
            station("Near B", 47.501, 8.720),
            station("Far", 47.600, 8.720),
        ];

        let walkable = find_all_walkable_distances(&stations, &parameters(300.0, 1.0)).unwrap();
        assert_eq!(walkable.len(), 1);
        let walk = &walkable[0];
        assert_eq!(walk.starting_at.name.as_str(), "Near A");
        assert_eq!(walk.ending_at.name.as_str(), "Near B");
        // ~111 m at 1 m/s.
        let seconds = walk.walking_time.as_secs_f64();
        assert!((seconds - 111.2).abs() < 1.0, "got {seconds}");
    }

    #[test]
    fn walking_time_scales_inversely_with_speed(){
        let stations = vec![
            station("A", 47.500, 8.720),
            station("B", 47.501, 8.720),
        ];
        let slow = find_all_walkable_distances(&stations, &parameters(300.0, 0.5)).unwrap();
        let fast = find_all_walkable_distances(&stations, &parameters(300.0, 2.0)).unwrap();
        let ratio = slow[0].walking_time.as_secs_f64() / fast[0].walking_time.as_secs_f64();
        assert!((ratio - 4.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_walking_speed_is_rejected() {
        let stations = vec![station("A", 47.5, 8.72)];
        let result = find_all_walkable_distances(&stations, &parameters(300.0, 0.0));
        assert!(matches!(result, Err(ModelError::NonPositiveWalkingSpeed(_))));
    }
}

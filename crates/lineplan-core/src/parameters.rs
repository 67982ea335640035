//! Planner configuration.

use crate::units::{Chf, LineFrequency, Meter, MeterPerSecond};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// All knobs of the line planning problem.
///
/// The four time weights price one second of the respective activity in the
/// objective; they must share one unit (dimensionless or CHF/h) across all
/// fields. `permitted_frequencies` is the default menu applied during
/// ingestion; individual lines may carry their own menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePlanningParameters {
    pub egress_time_weight: f64,
    pub waiting_time_weight: f64,
    pub in_vehicle_time_weight: f64,
    pub walking_time_weight: f64,
    /// Turnaround buffer spent at each terminal of a circulation.
    pub dwell_time_at_terminal: Duration,
    /// Planning horizon, typically one hour.
    pub period_duration: Duration,
    pub vehicle_cost_per_period: Chf,
    pub permitted_frequencies: Vec<LineFrequency>,
    pub demand_scaling: f64,
    pub demand_association_radius: Meter,
    pub walking_speed_between_stations: MeterPerSecond,
    pub maximal_walking_distance: Meter,
    pub maximal_number_of_vehicles: Option<u32>,
}

impl LinePlanningParameters {
    /// All fields as `(name, rendered value)` pairs, sorted by name.
    ///
    /// Feeds the solution summary, which must be deterministic.
    pub fn sorted_fields(&self) -> Vec<(&'static str, String)> {
        let frequencies = self
            .permitted_frequencies
            .iter()
            .map(|f| f.value().to_string())
            .collect::<Vec<_>>()
            .join(",");
        let mut fields = vec![
            ("demand_association_radius", self.demand_association_radius.to_string()),
            ("demand_scaling", self.demand_scaling.to_string()),
            ("dwell_time_at_terminal", format!("{:?}", self.dwell_time_at_terminal)),
            ("egress_time_weight", self.egress_time_weight.to_string()),
            ("in_vehicle_time_weight", self.in_vehicle_time_weight.to_string()),
            (
                "maximal_number_of_vehicles",
                self.maximal_number_of_vehicles
                    .map_or_else(|| "none".to_string(), |cap| cap.to_string()),
            ),
            ("maximal_walking_distance", self.maximal_walking_distance.to_string()),
            ("period_duration", format!("{:?}", self.period_duration)),
            ("permitted_frequencies", frequencies),
            ("vehicle_cost_per_period", self.vehicle_cost_per_period.to_string()),
            ("waiting_time_weight", self.waiting_time_weight.to_string()),
            ("walking_speed_between_stations", self.walking_speed_between_stations.to_string()),
            ("walking_time_weight", self.walking_time_weight.to_string()),
        ];
        fields.sort_by_key(|(name, _)| *name);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_sorted_and_complete() {
        let parameters = LinePlanningParameters {
            egress_time_weight: 0.0,
            waiting_time_weight: 2.0,
            in_vehicle_time_weight: 1.0,
            walking_time_weight: 2.0,
            dwell_time_at_terminal: Duration::from_secs(300),
            period_duration: Duration::from_secs(3600),
            vehicle_cost_per_period: Chf::new(1000),
            permitted_frequencies: vec![LineFrequency::new(1), LineFrequency::new(2)],
            demand_scaling: 0.1,
            demand_association_radius: Meter::new(500.0),
            walking_speed_between_stations: MeterPerSecond::new(0.6),
            maximal_walking_distance: Meter::new(300.0),
            maximal_number_of_vehicles: None,
        };

        let fields = parameters.sorted_fields();
        assert_eq!(fields.len(), 13);
        let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        let rendered: std::collections::HashMap<_, _> = fields.into_iter().collect();
        assert_eq!(rendered["permitted_frequencies"], "1,2");
        assert_eq!(rendered["maximal_number_of_vehicles"], "none");
        assert_eq!(rendered["period_duration"], "3600s");
    }
}

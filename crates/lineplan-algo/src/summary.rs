//! Human-readable solution digest.

use crate::error::PlanningError;
use crate::problem::LppData;
use crate::result::LppResult;
use lineplan_core::BusLine;

/// A deterministic text block describing a solved planning run: parameters,
/// demand volume, the weighted time split, and the chosen line plan.
pub fn create_summary(data: &LppData, result: &LppResult) -> Result<String, PlanningError> {
    let solution = result.solution()?;
    let demand = &data.scenario.demand_matrix;

    let mut summary = String::new();
    summary.push_str(&format!("Line Planning Summary\n{}\n", "=".repeat(40)));

    summary.push_str("Parameters:\n");
    for (name, value) in data.parameters.sorted_fields() {
        summary.push_str(&format!("  {name}: {value}\n"));
    }

    summary.push_str(&format!(
        "Transported passengers: {:.2} on {} relations\n",
        demand.total(),
        demand.positive_relation_count()
    ));

    summary.push_str("Weighted time per activity [h]:\n");
    for (activity, duration) in &solution.weighted_travel_time {
        summary.push_str(&format!(
            "  {}: {}\n",
            activity.label(),
            (duration.as_secs_f64() / 3600.0).floor()
        ));
    }

    summary.push_str("Active lines:\n");
    let mut active: Vec<&BusLine> = solution.active_lines.iter().collect();
    active.sort_by_key(|line| line.number);
    for line in active {
        if let Some(frequency) = line.permitted_frequencies.first() {
            summary.push_str(&format!("  line {} at frequency {}\n", line.number, frequency));
        }
    }

    summary.push_str(&format!("Used vehicles: {}\n", solution.used_vehicles));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Activity, LinePlanningNetwork};
    use crate::result::{LppResult, LppSolution, SolveFailure};
    use lineplan_scenarios::{baseline_parameters, corridor_scenario};
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn sample_data() -> LppData {
        let parameters = baseline_parameters();
        let scenario = corridor_scenario().unwrap();
        let network =
            LinePlanningNetwork::create_from_scenario(&scenario, parameters.period_duration)
                .unwrap();
        LppData {
            parameters,
            scenario,
            network,
        }
    }

    fn sample_solution(data: &LppData) -> LppSolution {
        let mut weighted_travel_time = BTreeMap::new();
        weighted_travel_time.insert(Activity::InVehicle, Duration::from_secs(2 * 3600));
        weighted_travel_time.insert(Activity::AccessLine, Duration::from_secs(3600));
        LppSolution {
            weighted_travel_time,
            used_vehicles: 3,
            active_lines: vec![data.scenario.bus_lines[1]
                .clone()
                .with_permitted_frequencies(vec![lineplan_core::LineFrequency::new(2)])],
            passengers_per_link: BTreeMap::new(),
        }
    }

    #[test]
    fn summary_lists_parameters_demand_and_active_lines() {
        let data = sample_data();
        let result = LppResult::from_success(sample_solution(&data));
        let summary = create_summary(&data, &result).unwrap();

        assert!(summary.contains("waiting_time_weight"));
        assert!(summary.contains("Transported passengers: 500.00 on 6 relations"));
        assert!(summary.contains("IN_VEHICLE: 2"));
        assert!(summary.contains("ACCESS_LINE: 1"));
        assert!(summary.contains("line 2 at frequency 2"));
        assert!(summary.contains("Used vehicles: 3"));
    }

    #[test]
    fn summary_is_deterministic() {
        let data = sample_data();
        let result = LppResult::from_success(sample_solution(&data));
        let first = create_summary(&data, &result).unwrap();
        let second = create_summary(&data, &result).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_results_yield_no_summary() {
        let data = sample_data();
        let result = LppResult::from_error(SolveFailure::Infeasible);
        assert!(matches!(
            create_summary(&data, &result),
            Err(PlanningError::SolutionMissing)
        ));
    }
}

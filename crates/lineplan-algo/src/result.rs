//! Solution and result types of the line planning problem.

use crate::error::PlanningError;
use crate::network::Activity;
use lineplan_core::{BusLine, DirectionName, LineNr, StationName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Passenger volume on one directed link between consecutive stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengersPerLink {
    pub start: StationName,
    pub end: StationName,
    pub pax: f64,
}

/// Everything extracted from an optimal primal solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LppSolution {
    /// Objective contribution per activity, expressed as *weighted seconds*.
    /// A diagnostic aggregate, not a physical duration. Only activities that
    /// occur on some link appear as keys.
    pub weighted_travel_time: BTreeMap<Activity, Duration>,
    /// Vehicles needed to run all active lines at their selected frequency.
    pub used_vehicles: u32,
    /// Lines with a selected configuration; each carries its selected
    /// frequency as the (now singleton) permitted set.
    pub active_lines: Vec<BusLine>,
    /// Per active line and direction, the passenger load of every
    /// consecutive station pair.
    pub passengers_per_link: BTreeMap<LineNr, BTreeMap<DirectionName, Vec<PassengersPerLink>>>,
}

impl LppSolution {
    /// Weighted seconds spent on one activity; zero when absent.
    pub fn weighted_seconds(&self, activity: Activity) -> f64 {
        self.weighted_travel_time
            .get(&activity)
            .map(Duration::as_secs_f64)
            .unwrap_or(0.0)
    }
}

/// Why the solver did not produce a usable solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveFailure {
    /// The MILP has no feasible point.
    Infeasible,
    /// Any other terminal solver status.
    Solver(String),
}

impl std::fmt::Display for SolveFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveFailure::Infeasible => write!(f, "problem is infeasible"),
            SolveFailure::Solver(message) => write!(f, "solver failed: {message}"),
        }
    }
}

/// Outcome of one solve: either a populated solution or a failure flag.
///
/// Solver outcomes are values, not errors, so callers can branch on
/// feasibility without error flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LppResult {
    Solved(LppSolution),
    Failed(SolveFailure),
}

impl LppResult {
    pub fn from_success(solution: LppSolution) -> Self {
        Self::Solved(solution)
    }

    pub fn from_error(failure: SolveFailure) -> Self {
        Self::Failed(failure)
    }

    pub fn success(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    pub fn failed(&self) -> bool {
        !self.success()
    }

    /// The solution of a successful solve.
    ///
    /// Requesting the solution of a failed result is a programming error and
    /// surfaces as [`PlanningError::SolutionMissing`].
    pub fn solution(&self) -> Result<&LppSolution, PlanningError> {
        match self {
            Self::Solved(solution) => Ok(solution),
            Self::Failed(_) => Err(PlanningError::SolutionMissing),
        }
    }

    pub fn failure(&self) -> Option<&SolveFailure> {
        match self {
            Self::Solved(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_solution() -> LppSolution {
        LppSolution {
            weighted_travel_time: BTreeMap::new(),
            used_vehicles: 0,
            active_lines: vec![],
            passengers_per_link: BTreeMap::new(),
        }
    }

    #[test]
    fn successful_results_expose_their_solution() {
        let result = LppResult::from_success(empty_solution());
        assert!(result.success());
        assert!(!result.failed());
        assert!(result.solution().is_ok());
        assert!(result.failure().is_none());
    }

    #[test]
    fn failed_results_refuse_solution_access() {
        let result = LppResult::from_error(SolveFailure::Infeasible);
        assert!(result.failed());
        assert!(matches!(
            result.solution(),
            Err(PlanningError::SolutionMissing)
        ));
        assert_eq!(result.failure(), Some(&SolveFailure::Infeasible));
    }

    #[test]
    fn absent_activities_count_zero_weighted_seconds() {
        let mut solution = empty_solution();
        solution
            .weighted_travel_time
            .insert(Activity::InVehicle, Duration::from_secs_f64(42.5));
        assert_eq!(solution.weighted_seconds(Activity::InVehicle), 42.5);
        assert_eq!(solution.weighted_seconds(Activity::Walking), 0.0);
    }
}

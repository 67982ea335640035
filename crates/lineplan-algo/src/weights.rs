//! Objective coefficients per LPN link.

use crate::error::PlanningError;
use crate::network::{Activity, LinePlanningNetwork, LpnLink};
use lineplan_core::LinePlanningParameters;

/// The objective coefficient of every link, in link index order.
///
/// A link costs its duration in seconds times the weight of its activity.
pub fn activity_weights(
    network: &LinePlanningNetwork,
    parameters: &LinePlanningParameters,
) -> Result<Vec<f64>, PlanningError> {
    network
        .all_links()
        .map(|link| link_weight(link, parameters))
        .collect()
}

fn link_weight(link: &LpnLink, parameters: &LinePlanningParameters) -> Result<f64, PlanningError> {
    let weight = match link.activity {
        Activity::AccessLine => parameters.waiting_time_weight,
        Activity::InVehicle => parameters.in_vehicle_time_weight,
        Activity::Walking => parameters.walking_time_weight,
        Activity::EgressLine => parameters.egress_time_weight,
        Activity::Transfer => return Err(PlanningError::UnweightedActivity(Activity::Transfer)),
    };
    Ok(link.duration.as_secs_f64() * weight)
}

//! Error types for network construction and problem assembly.
//!
//! These are the *fatal* preconditions: a broken scenario, a malformed
//! network, or a programming error. Solver outcomes (infeasible, failed) are
//! not errors; they are reified into [`crate::LppResult`] so callers can
//! branch without error flow.

use crate::network::Activity;
use lineplan_core::{LineNr, ScenarioError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanningError {
    /// The scenario references stops no line serves.
    #[error(transparent)]
    Inconsistent(#[from] ScenarioError),

    /// Waiting time is `period / (2 f)`; a zero frequency is meaningless.
    #[error("line {0} carries a non-positive permitted frequency")]
    InvalidFrequency(LineNr),

    /// An activity without an objective weight reached the weighting stage.
    #[error("activity {0:?} has no weight mapping")]
    UnweightedActivity(Activity),

    /// A node name was looked up that the network does not contain.
    #[error("node {0} is not part of the line planning network")]
    UnknownNode(String),

    /// An expected link between two named nodes is missing.
    #[error("no link from {link_source} to {target} in the line planning network")]
    MissingLink {
        link_source: String,
        target: String,
    },

    /// A link carries inconsistent attributes (builder bug).
    #[error("malformed line planning network: {0}")]
    MalformedNetwork(String),

    /// A solution was requested from a failed result.
    #[error("result carries no solution")]
    SolutionMissing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let error = PlanningError::InvalidFrequency(LineNr::new(9));
        assert!(error.to_string().contains("line 9"));

        let error = PlanningError::MissingLink {
            link_source: "1-a-A".into(),
            target: "1-a-B".into(),
        };
        assert!(error.to_string().contains("1-a-A"));
        assert!(error.to_string().contains("1-a-B"));

        let error = PlanningError::UnweightedActivity(Activity::Transfer);
        assert!(error.to_string().contains("Transfer"));
    }
}

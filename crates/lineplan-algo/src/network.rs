//! # Line Planning Network (LPN)
//!
//! The LPN is a directed multi-activity graph derived from a scenario. Every
//! leg a passenger can take (waiting for a bus, riding it, alighting,
//! walking to a nearby station) is a distinct edge class with its own
//! duration, so the objective can price each activity separately.
//!
//! ## Node taxonomy
//!
//! Up to four node classes exist per station `s`:
//!
//! ```text
//!   access$s ────ACCESS(period/2f)───▶ l-d-s ────EGRESS(60s)───▶ egress$s
//!                                      ▲   │
//!                  ACCESS(period/2f)   │   │  EGRESS(60s)
//!                                      │   ▼
//!   transfer$s' ◀──────WALKING────▶ transfer$s
//! ```
//!
//! - `access$s`: where passengers enter the system (origin side).
//! - `egress$s`: where passengers leave the system (destination side).
//! - `transfer$s`: shared across all lines at `s`; alight here, walk or
//!   board again. Separating access from egress forbids zero-cost
//!   pass-throughs, and a transfer implicitly pays one alighting plus one
//!   boarding wait.
//! - `l-d-s`: on-vehicle node of line `l`, direction `d` at station `s`;
//!   consecutive service nodes are joined by in-vehicle edges carrying the
//!   segment travel times.
//!
//! Boarding edges exist once per permitted frequency `f` of the line, with
//! the uniform-arrival average waiting time `period / (2 f)` as duration and
//! the frequency stored on the edge, which lets the MILP couple boarding
//! volume to the selected frequency.

use crate::error::PlanningError;
use lineplan_core::{
    BusLine, Direction, DirectionName, LineFrequency, LineNr, PlanningScenario, StationName,
    WalkableDistance,
};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Fixed time to leave a vehicle and clear the stop.
pub const ALIGHTING_TIME: Duration = Duration::from_secs(60);

/// The passenger activity an LPN link represents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Activity {
    InVehicle,
    Walking,
    AccessLine,
    EgressLine,
    /// Never emitted by the builder; transfers are realised as an egress
    /// into `transfer$s` followed by a fresh access. Kept so the activity
    /// enumeration is closed and exhaustively matched.
    Transfer,
}

impl Activity {
    /// Stable upper-case label used in summaries and reports.
    pub fn label(self) -> &'static str {
        match self {
            Activity::InVehicle => "IN_VEHICLE",
            Activity::Walking => "WALKING",
            Activity::AccessLine => "ACCESS_LINE",
            Activity::EgressLine => "EGRESS_LINE",
            Activity::Transfer => "TRANSFER",
        }
    }
}

/// Edge payload of the LPN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpnLink {
    pub activity: Activity,
    pub duration: Duration,
    pub line_id: Option<LineNr>,
    pub frequency: Option<LineFrequency>,
}

/// Node payload of the LPN. Names are unique graph-wide; service nodes also
/// carry their line and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpnNode {
    pub name: String,
    pub line_id: Option<LineNr>,
    pub direction: Option<DirectionName>,
}

impl LpnNode {
    fn shared(name: String) -> Self {
        Self {
            name,
            line_id: None,
            direction: None,
        }
    }

    fn service(name: String, line_id: LineNr, direction: DirectionName) -> Self {
        Self {
            name,
            line_id: Some(line_id),
            direction: Some(direction),
        }
    }
}

/// The multi-activity digraph plus a name index for string-addressable
/// constraint assembly.
///
/// Node and link ordering is deterministic for a given scenario: lines in
/// input order, direction a before b, stations in stop order, access links
/// in frequency order, walk links in input order.
#[derive(Debug, Clone, Default)]
pub struct LinePlanningNetwork {
    graph: DiGraph<LpnNode, LpnLink>,
    node_lookup: HashMap<String, NodeIndex>,
}

impl LinePlanningNetwork {
    /// Build the LPN for a scenario over the given planning period.
    ///
    /// Fails with [`PlanningError::InvalidFrequency`] if any line permits a
    /// zero frequency: the boarding wait `period / (2 f)` is undefined.
    pub fn create_from_scenario(
        scenario: &PlanningScenario,
        period_duration: Duration,
    ) -> Result<Self, PlanningError> {
        let mut network = Self::default();
        for line in &scenario.bus_lines {
            if line.permitted_frequencies.iter().any(|f| f.value() == 0) {
                return Err(PlanningError::InvalidFrequency(line.number));
            }
            for direction in line.directions() {
                network.add_service_segments(line, direction, period_duration);
            }
        }
        for walkable in &scenario.walkable_distances {
            network.add_walkable_distance(walkable);
        }
        tracing::debug!(
            nodes = network.node_count(),
            links = network.link_count(),
            "line planning network constructed"
        );
        Ok(network)
    }

    /// Nodes and links of one line direction: boarding, alighting and riding.
    fn add_service_segments(
        &mut self,
        line: &BusLine,
        direction: &Direction,
        period_duration: Duration,
    ) {
        let access: Vec<NodeIndex> = direction
            .station_names
            .iter()
            .map(|s| self.ensure_node(LpnNode::shared(Self::access_node_name(s))))
            .collect();
        let egress: Vec<NodeIndex> = direction
            .station_names
            .iter()
            .map(|s| self.ensure_node(LpnNode::shared(Self::egress_node_name(s))))
            .collect();
        let transfer: Vec<NodeIndex> = direction
            .station_names
            .iter()
            .map(|s| self.ensure_node(LpnNode::shared(Self::transfer_node_name(s))))
            .collect();
        let service: Vec<NodeIndex> = direction
            .station_names
            .iter()
            .map(|s| {
                self.ensure_node(LpnNode::service(
                    Self::service_node_name(s, line, direction),
                    line.number,
                    direction.name.clone(),
                ))
            })
            .collect();

        for &frequency in &line.permitted_frequencies {
            let access_link = LpnLink {
                activity: Activity::AccessLine,
                duration: average_waiting_time(period_duration, frequency),
                line_id: Some(line.number),
                frequency: Some(frequency),
            };
            for (&from, &to) in access.iter().zip(&service) {
                self.graph.add_edge(from, to, access_link.clone());
            }
            for (&from, &to) in transfer.iter().zip(&service) {
                self.graph.add_edge(from, to, access_link.clone());
            }
        }

        let egress_link = LpnLink {
            activity: Activity::EgressLine,
            duration: ALIGHTING_TIME,
            line_id: Some(line.number),
            frequency: None,
        };
        for (&from, &to) in service.iter().zip(&egress) {
            self.graph.add_edge(from, to, egress_link.clone());
        }
        for (&from, &to) in service.iter().zip(&transfer) {
            self.graph.add_edge(from, to, egress_link.clone());
        }

        for ((&from, &to), trip_time) in service
            .iter()
            .zip(service.iter().skip(1))
            .zip(direction.trip_times.iter().copied())
        {
            self.graph.add_edge(
                from,
                to,
                LpnLink {
                    activity: Activity::InVehicle,
                    duration: trip_time,
                    line_id: Some(line.number),
                    frequency: None,
                },
            );
        }
    }

    /// Two directed walk links between the transfer nodes of the endpoints.
    fn add_walkable_distance(&mut self, walkable: &WalkableDistance) {
        let source =
            self.ensure_node(LpnNode::shared(Self::transfer_node_name(&walkable.starting_at.name)));
        let target =
            self.ensure_node(LpnNode::shared(Self::transfer_node_name(&walkable.ending_at.name)));
        let walking_link = LpnLink {
            activity: Activity::Walking,
            duration: walkable.walking_time,
            line_id: None,
            frequency: None,
        };
        self.graph.add_edge(source, target, walking_link.clone());
        self.graph.add_edge(target, source, walking_link);
    }

    fn ensure_node(&mut self, node: LpnNode) -> NodeIndex {
        if let Some(&index) = self.node_lookup.get(&node.name) {
            return index;
        }
        let name = node.name.clone();
        let index = self.graph.add_node(node);
        self.node_lookup.insert(name, index);
        index
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All links in insertion (= index) order.
    pub fn all_links(&self) -> impl Iterator<Item = &LpnLink> {
        self.graph.edge_weights()
    }

    /// All nodes in insertion (= index) order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &LpnNode> {
        self.graph.node_weights()
    }

    pub fn all_node_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|node| node.name.as_str())
    }

    /// Node indices in index order; `index()` values are contiguous.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Resolve a node by its unique name.
    pub fn node_index(&self, name: &str) -> Result<NodeIndex, PlanningError> {
        self.node_lookup
            .get(name)
            .copied()
            .ok_or_else(|| PlanningError::UnknownNode(name.to_string()))
    }

    /// The link between two named nodes.
    pub fn get_link_index(&self, source: &str, target: &str) -> Result<EdgeIndex, PlanningError> {
        let source_index = self.node_index(source)?;
        let target_index = self.node_index(target)?;
        self.graph
            .find_edge(source_index, target_index)
            .ok_or_else(|| PlanningError::MissingLink {
                link_source: source.to_string(),
                target: target.to_string(),
            })
    }

    pub fn link(&self, index: EdgeIndex) -> Option<&LpnLink> {
        self.graph.edge_weight(index)
    }

    /// Indices of links ending at `node`.
    pub fn incoming_links(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph
            .edges_directed(node, petgraph::Incoming)
            .map(|edge| edge.id())
    }

    /// Indices of links starting at `node`.
    pub fn outgoing_links(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph
            .edges_directed(node, petgraph::Outgoing)
            .map(|edge| edge.id())
    }

    pub fn access_node_name(station: &StationName) -> String {
        format!("access${station}")
    }

    pub fn egress_node_name(station: &StationName) -> String {
        format!("egress${station}")
    }

    pub fn transfer_node_name(station: &StationName) -> String {
        format!("transfer${station}")
    }

    pub fn service_node_name(station: &StationName, line: &BusLine, direction: &Direction) -> String {
        format!("{}-{}-{}", line.number, direction.name, station)
    }
}

/// Average wait under uniform passenger arrivals: half a headway.
fn average_waiting_time(period_duration: Duration, frequency: LineFrequency) -> Duration {
    period_duration / (2 * frequency.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineplan_scenarios::{corridor_scenario, walking_mesh_scenario};
    use std::collections::HashSet;

    const PERIOD: Duration = Duration::from_secs(3600);

    #[test]
    fn corridor_network_has_the_expected_shape() {
        let scenario = corridor_scenario().unwrap();
        let network = LinePlanningNetwork::create_from_scenario(&scenario, PERIOD).unwrap();

        // 4 stations x (access, egress, transfer) shared across lines, plus
        // service nodes: 4 per direction of line 1, 2 per direction of line 2.
        assert_eq!(network.node_count(), 12 + 8 + 4);
        // Line 1 per direction: 2 frequencies x 8 boarding + 8 alighting + 3
        // in-vehicle = 27. Line 2 per direction: 2 x 4 + 4 + 1 = 13.
        assert_eq!(network.link_count(), 2 * 27 + 2 * 13);

        let names: HashSet<&str> = network.all_node_names().collect();
        assert_eq!(names.len(), network.node_count(), "node names must be unique");
        assert!(names.contains("access$A"));
        assert!(names.contains("egress$D"));
        assert!(names.contains("transfer$B"));
        assert!(names.contains("1-a-C"));
        assert!(names.contains("2-b-A"));
    }

    #[test]
    fn link_attributes_satisfy_the_activity_invariants() {
        let scenario = corridor_scenario().unwrap();
        let network = LinePlanningNetwork::create_from_scenario(&scenario, PERIOD).unwrap();

        for link in network.all_links() {
            match link.activity {
                Activity::InVehicle => {
                    assert!(link.line_id.is_some());
                    assert!(link.frequency.is_none());
                }
                Activity::AccessLine => {
                    assert!(link.line_id.is_some());
                    assert!(link.frequency.is_some());
                }
                Activity::Walking => {
                    assert!(link.line_id.is_none());
                    assert!(link.frequency.is_none());
                }
                Activity::EgressLine => assert_eq!(link.duration, ALIGHTING_TIME),
                Activity::Transfer => panic!("builder must not emit transfer links"),
            }
        }
    }

    #[test]
    fn boarding_waits_are_half_a_headway() {
        let scenario = corridor_scenario().unwrap();
        let network = LinePlanningNetwork::create_from_scenario(&scenario, PERIOD).unwrap();

        let durations: HashSet<Duration> = network
            .all_links()
            .filter(|link| link.activity == Activity::AccessLine)
            .map(|link| link.duration)
            .collect();
        // Frequencies 1 and 2 on a one hour period.
        assert_eq!(
            durations,
            HashSet::from([Duration::from_secs(1800), Duration::from_secs(900)])
        );
    }

    #[test]
    fn service_links_carry_the_segment_trip_times() {
        let scenario = corridor_scenario().unwrap();
        let network = LinePlanningNetwork::create_from_scenario(&scenario, PERIOD).unwrap();

        let index = network.get_link_index("1-a-A", "1-a-B").unwrap();
        let link = network.link(index).unwrap();
        assert_eq!(link.activity, Activity::InVehicle);
        assert_eq!(link.duration, Duration::from_secs(300));
        assert_eq!(link.line_id, Some(LineNr::new(1)));

        // No direct service link between non-consecutive stops.
        assert!(matches!(
            network.get_link_index("1-a-A", "1-a-C"),
            Err(PlanningError::MissingLink { .. })
        ));
        assert!(matches!(
            network.get_link_index("nowhere", "1-a-A"),
            Err(PlanningError::UnknownNode(_))
        ));
    }

    #[test]
    fn walk_links_are_added_in_both_directions() {
        let scenario = walking_mesh_scenario().unwrap();
        let network = LinePlanningNetwork::create_from_scenario(&scenario, PERIOD).unwrap();

        let forward = network.get_link_index("transfer$A", "transfer$D").unwrap();
        let backward = network.get_link_index("transfer$D", "transfer$A").unwrap();
        for index in [forward, backward] {
            let link = network.link(index).unwrap();
            assert_eq!(link.activity, Activity::Walking);
            assert_eq!(link.duration, Duration::from_secs(300));
            assert_eq!(link.line_id, None);
            assert_eq!(link.frequency, None);
        }

        let walking_links = network
            .all_links()
            .filter(|link| link.activity == Activity::Walking)
            .count();
        // Six unordered pairs over four stations, two directed links each.
        assert_eq!(walking_links, 12);
    }

    #[test]
    fn zero_frequencies_are_rejected() {
        let scenario = corridor_scenario().unwrap();
        let zero_frequency = scenario.clone().with_bus_lines(
            scenario
                .bus_lines
                .iter()
                .cloned()
                .map(|line| line.with_permitted_frequencies(vec![LineFrequency::new(0)]))
                .collect(),
        );

        let result = LinePlanningNetwork::create_from_scenario(&zero_frequency, PERIOD);
        assert!(matches!(result, Err(PlanningError::InvalidFrequency(_))));
    }

    #[test]
    fn incidence_iteration_matches_the_link_table() {
        let scenario = corridor_scenario().unwrap();
        let network = LinePlanningNetwork::create_from_scenario(&scenario, PERIOD).unwrap();

        let mut incoming_total = 0;
        let mut outgoing_total = 0;
        for node in network.node_indices() {
            incoming_total += network.incoming_links(node).count();
            outgoing_total += network.outgoing_links(node).count();
        }
        assert_eq!(incoming_total, network.link_count());
        assert_eq!(outgoing_total, network.link_count());
    }
}

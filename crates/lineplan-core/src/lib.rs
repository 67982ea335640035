//! # lineplan-core: Bus Line Planning Domain Model
//!
//! Immutable value types describing an urban bus line planning scenario:
//! candidate lines with directed stop sequences, stations with their
//! geographic footprint, a walkability layer, an origin-destination demand
//! matrix, and the planner configuration.
//!
//! ## Design Philosophy
//!
//! - **Newtype scalars**: line numbers, frequencies, capacities, distances
//!   and names are distinct types; the compiler catches unit mix-ups.
//! - **Immutable values**: entities never mutate in place; updates go
//!   through `with_…` methods returning fresh copies.
//! - **Deterministic containers**: demand rows live in sorted maps, so every
//!   traversal of a scenario is reproducible.
//!
//! ## Quick Start
//!
//! ```
//! use lineplan_core::*;
//! use std::time::Duration;
//!
//! let outbound = Direction::new(
//!     DirectionName::from("a"),
//!     vec![StationName::from("A"), StationName::from("B")],
//!     vec![Duration::from_secs(300)],
//! )?;
//! let inbound = Direction::new(
//!     DirectionName::from("b"),
//!     vec![StationName::from("B"), StationName::from("A")],
//!     vec![Duration::from_secs(300)],
//! )?;
//! let line = BusLine::new(
//!     LineNr::new(1),
//!     LineName::from("1"),
//!     outbound,
//!     inbound,
//!     Capacity::new(100),
//!     vec![LineFrequency::new(2)],
//! );
//!
//! let scenario = PlanningScenario::new(
//!     DemandMatrix::from_relations([("A", "B", 120.0)]),
//!     vec![line],
//!     vec![],
//!     vec![
//!         Station::new(StationName::from("A"), vec![PointIn2D { lat: 47.50, long: 8.72 }], vec![LineNr::new(1)])?,
//!         Station::new(StationName::from("B"), vec![PointIn2D { lat: 47.51, long: 8.73 }], vec![LineNr::new(1)])?,
//!     ],
//! );
//! scenario.check_consistency()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The optimisation itself lives in `lineplan-algo`, which consumes these
//! types unchanged.

pub mod demand;
pub mod direction;
pub mod error;
pub mod line;
pub mod parameters;
pub mod point;
pub mod recorded;
pub mod scenario;
pub mod station;
pub mod units;
pub mod walking;

pub use demand::DemandMatrix;
pub use direction::Direction;
pub use error::{ModelError, ScenarioError};
pub use line::BusLine;
pub use parameters::LinePlanningParameters;
pub use point::{distance_in_m, DistrictPoint, PointIn2D};
pub use recorded::{RecordedTrip, TripRecord};
pub use scenario::PlanningScenario;
pub use station::Station;
pub use units::{
    Capacity, Chf, CirculationId, DirectionName, DistrictName, LineFrequency, LineName, LineNr,
    Meter, MeterPerSecond, StationName, TripNr,
};
pub use walking::{find_all_walkable_distances, WalkableDistance};

//! # lineplan-algo: Line Planning Optimisation
//!
//! Turns a [`lineplan_core::PlanningScenario`] into a frequency assignment
//! for its candidate bus lines, minimising a weighted sum of passenger
//! generalised travel time and vehicle acquisition cost.
//!
//! ## Pipeline
//!
//! ```text
//! scenario ──check──▶ LPN (multi-activity digraph) ──weights──▶ MILP ──solve──▶ LppResult
//! ```
//!
//! 1. [`LinePlanningNetwork::create_from_scenario`] expands the scenario
//!    into the line planning network: boarding, riding, alighting, transfer
//!    and walking become distinct links with durations.
//! 2. [`activity_weights`] prices every link from the parameter weights.
//! 3. [`solve`] assembles the MILP (binary line configurations coupled to
//!    per-origin passenger flows), hands it to the configured solver
//!    backend, and extracts active lines, link loads and the weighted time
//!    split per activity.
//!
//! ## Example
//!
//! ```ignore
//! use lineplan_algo::{create_summary, solve, LppData};
//!
//! let data = LppData::create(parameters, scenario)?;
//! let result = solve(&data)?;
//! if result.success() {
//!     println!("{}", create_summary(&data, &result)?);
//! }
//! ```
//!
//! ## Solver backends
//!
//! The MILP contains binary variables, so the good_lp backend must support
//! integer programming. `solver-highs` (default) uses HiGHS; `solver-cbc`
//! uses COIN-OR CBC.

pub mod error;
pub mod network;
pub mod problem;
pub mod result;
pub mod summary;
pub mod weights;

pub use error::PlanningError;
pub use network::{Activity, LinePlanningNetwork, LpnLink, LpnNode, ALIGHTING_TIME};
pub use problem::{minimal_circulation_time, required_vehicles, solve, LppData};
pub use result::{LppResult, LppSolution, PassengersPerLink, SolveFailure};
pub use summary::create_summary;
pub use weights::activity_weights;

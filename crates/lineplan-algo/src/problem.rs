//! # Line Planning Problem (LPP)
//!
//! Mixed-integer linear program over the line planning network.
//!
//! ```text
//! minimize    Σ_e w_e · Σ_o x[o,e]  +  Σ_{l,f} y[l,f] · vehicles(l,f) · c_veh
//!
//! subject to:
//!   Σ_f y[l,f] ≤ 1                                    one configuration per line
//!   Σ_{e in v} x[o,e] - Σ_{e out v} x[o,e] = d[o,v]   flow conservation per origin
//!   Σ_o x[o,e] ≤ Σ_f y[l,f] · cap_l · f               in-vehicle link capacity
//!   Σ_o x[o,e] ≤ y[l,f] · cap_l · f                   boarding link capacity
//!   Σ_{l,f} y[l,f] · vehicles(l,f) ≤ V_max            optional fleet cap
//!   y binary, x ≥ 0
//! ```
//!
//! `vehicles(l,f) = ceil(circulation_time(l) / period · f)`; a vehicle is
//! indivisible. The boarding capacity constraint is stricter than needed for
//! correctness but tightens the LP relaxation.
//!
//! Variables live in dense arrays (`y` per line and frequency index, `x` in
//! origin-major order over link indices); constraint assembly walks links
//! linearly, so two runs over the same scenario emit the identical program.

use crate::error::PlanningError;
use crate::network::{Activity, LinePlanningNetwork};
use crate::result::{LppResult, LppSolution, PassengersPerLink, SolveFailure};
use crate::weights::activity_weights;
use good_lp::{
    constraint, default_solver, variable, variables, Expression, ProblemVariables,
    ResolutionError, Solution, SolverModel, Variable,
};
use lineplan_core::{
    BusLine, DirectionName, LineFrequency, LineNr, LinePlanningParameters, PlanningScenario,
    StationName,
};
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Diagnostic dump written next to the process when the MILP is infeasible.
const INFEASIBILITY_REPORT_FILE: &str = "line_planning_problem.infeasible.txt";

/// The full input of one planning run.
#[derive(Debug, Clone)]
pub struct LppData {
    pub parameters: LinePlanningParameters,
    pub scenario: PlanningScenario,
    pub network: LinePlanningNetwork,
}

impl LppData {
    /// Validate the scenario and derive its line planning network.
    pub fn create(
        parameters: LinePlanningParameters,
        scenario: PlanningScenario,
    ) -> Result<Self, PlanningError> {
        scenario.check_consistency()?;
        let network =
            LinePlanningNetwork::create_from_scenario(&scenario, parameters.period_duration)?;
        Ok(Self {
            parameters,
            scenario,
            network,
        })
    }
}

/// Dense decision variable arrays.
struct LppVariables {
    /// `[line index][frequency index]`, binary.
    line_configuration: Vec<Vec<Variable>>,
    /// Origin-major: `x[origin_index * link_count + link_index]`, ≥ 0.
    passenger_flow: Vec<Variable>,
    origins: Vec<StationName>,
    link_count: usize,
}

impl LppVariables {
    fn flow(&self, origin_index: usize, link_index: usize) -> Variable {
        self.passenger_flow[origin_index * self.link_count + link_index]
    }
}

/// Round-trip time of one circulation: both directions plus the terminal
/// dwell at both ends.
pub fn minimal_circulation_time(line: &BusLine, dwell_time_at_terminal: Duration) -> Duration {
    dwell_time_at_terminal * 2
        + line.direction_a.total_trip_time()
        + line.direction_b.total_trip_time()
}

/// Vehicles needed to run `frequency` dispatches per period on a circulation.
pub fn required_vehicles(
    frequency: LineFrequency,
    circulation_time: Duration,
    period_duration: Duration,
) -> u32 {
    (circulation_time.as_secs_f64() / period_duration.as_secs_f64() * frequency.value() as f64)
        .ceil() as u32
}

/// Demand entries are rounded before they reach a constraint right-hand
/// side; noise below a hundredth of a passenger must not change the program.
fn rounded_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Assemble the MILP, run the solver, and reify the outcome.
///
/// Precondition violations (unknown nodes, malformed links, unweighted
/// activities) propagate as errors. Solver verdicts, whether optimal,
/// infeasible or otherwise failed, are returned inside the [`LppResult`].
pub fn solve(data: &LppData) -> Result<LppResult, PlanningError> {
    let started = Instant::now();
    let weights = activity_weights(&data.network, &data.parameters)?;

    let mut problem_variables = variables!();
    let lpp_variables = add_variables(&mut problem_variables, data);
    tracing::debug!(
        line_configurations = lpp_variables.line_configuration.iter().map(Vec::len).sum::<usize>(),
        passenger_flows = lpp_variables.passenger_flow.len(),
        "decision variables added"
    );

    let objective = build_objective(data, &weights, &lpp_variables);
    let mut model = problem_variables.minimise(objective).using(default_solver);
    model = add_flow_conservation_constraints(model, data, &lpp_variables)?;
    model = add_capacity_constraints(model, data, &lpp_variables)?;
    model = add_single_configuration_constraints(model, &lpp_variables);
    if let Some(maximal_number_of_vehicles) = data.parameters.maximal_number_of_vehicles {
        model = add_fleet_size_constraint(model, data, &lpp_variables, maximal_number_of_vehicles);
    }

    match model.solve() {
        Ok(solution) => {
            tracing::debug!(elapsed = ?started.elapsed(), "line planning problem solved");
            let extracted = extract_solution(data, &weights, &lpp_variables, &solution)?;
            Ok(LppResult::from_success(extracted))
        }
        Err(ResolutionError::Infeasible) => {
            tracing::warn!("line planning problem is infeasible");
            write_infeasibility_report(data);
            Ok(LppResult::from_error(SolveFailure::Infeasible))
        }
        Err(error) => {
            tracing::warn!(%error, "line planning solver failed");
            Ok(LppResult::from_error(SolveFailure::Solver(error.to_string())))
        }
    }
}

fn add_variables(problem_variables: &mut ProblemVariables, data: &LppData) -> LppVariables {
    let line_configuration: Vec<Vec<Variable>> = data
        .scenario
        .bus_lines
        .iter()
        .map(|line| {
            line.permitted_frequencies
                .iter()
                .map(|frequency| {
                    problem_variables.add(
                        variable()
                            .binary()
                            .name(format!("line:{}-{}", line.number, frequency)),
                    )
                })
                .collect()
        })
        .collect();

    let origins: Vec<StationName> = data.scenario.demand_matrix.all_origins().cloned().collect();
    let link_count = data.network.link_count();
    let mut passenger_flow = Vec::with_capacity(origins.len() * link_count);
    for origin in &origins {
        for link_index in 0..link_count {
            passenger_flow.push(
                problem_variables.add(variable().min(0.0).name(format!("{origin}-{link_index}"))),
            );
        }
    }

    LppVariables {
        line_configuration,
        passenger_flow,
        origins,
        link_count,
    }
}

fn build_objective(data: &LppData, weights: &[f64], lpp_variables: &LppVariables) -> Expression {
    let mut objective = Expression::from(0.0);
    for origin_index in 0..lpp_variables.origins.len() {
        for (link_index, weight) in weights.iter().enumerate() {
            objective += *weight * lpp_variables.flow(origin_index, link_index);
        }
    }

    let vehicle_cost = data.parameters.vehicle_cost_per_period.value() as f64;
    for (line, configurations) in data
        .scenario
        .bus_lines
        .iter()
        .zip(&lpp_variables.line_configuration)
    {
        let circulation_time =
            minimal_circulation_time(line, data.parameters.dwell_time_at_terminal);
        for (frequency, configuration) in line.permitted_frequencies.iter().zip(configurations) {
            let vehicles =
                required_vehicles(*frequency, circulation_time, data.parameters.period_duration);
            objective += vehicles as f64 * vehicle_cost * *configuration;
        }
    }
    objective
}

/// Per origin and node: inflow minus outflow equals the net demand at that
/// node. The net demand is the OD row entry at the egress side and the
/// negated row sum at the access side of the origin, zero everywhere else.
fn add_flow_conservation_constraints<M: SolverModel>(
    mut model: M,
    data: &LppData,
    lpp_variables: &LppVariables,
) -> Result<M, PlanningError> {
    let network = &data.network;
    let incidences: Vec<(Vec<usize>, Vec<usize>)> = network
        .node_indices()
        .map(|node| {
            (
                network.incoming_links(node).map(|link| link.index()).collect(),
                network.outgoing_links(node).map(|link| link.index()).collect(),
            )
        })
        .collect();

    let empty_row = BTreeMap::new();
    let mut constraint_count = 0usize;
    for (origin_index, origin) in lpp_variables.origins.iter().enumerate() {
        let mut balance = vec![0.0; incidences.len()];
        let row = data.scenario.demand_matrix.row(origin).unwrap_or(&empty_row);
        let mut injected = 0.0;
        for (destination, demand) in row {
            let rounded = rounded_to_two_decimals(*demand);
            let egress =
                network.node_index(&LinePlanningNetwork::egress_node_name(destination))?;
            balance[egress.index()] += rounded;
            injected += rounded;
        }
        let access = network.node_index(&LinePlanningNetwork::access_node_name(origin))?;
        balance[access.index()] -= injected;

        for (node_position, (incoming, outgoing)) in incidences.iter().enumerate() {
            let mut net_flow = Expression::from(0.0);
            for &link_index in incoming {
                net_flow += lpp_variables.flow(origin_index, link_index);
            }
            for &link_index in outgoing {
                net_flow -= Expression::from(lpp_variables.flow(origin_index, link_index));
            }
            model = model.with(constraint!(net_flow == balance[node_position]));
            constraint_count += 1;
        }
    }
    tracing::debug!(constraint_count, "flow conservation constraints added");
    Ok(model)
}

/// Couple link loads to the selected line configurations.
fn add_capacity_constraints<M: SolverModel>(
    mut model: M,
    data: &LppData,
    lpp_variables: &LppVariables,
) -> Result<M, PlanningError> {
    let line_index_by_number: HashMap<LineNr, usize> = data
        .scenario
        .bus_lines
        .iter()
        .enumerate()
        .map(|(index, line)| (line.number, index))
        .collect();

    let mut constraint_count = 0usize;
    for (link_index, link) in data.network.all_links().enumerate() {
        let Some(line_number) = link.line_id else {
            continue;
        };
        if !matches!(link.activity, Activity::InVehicle | Activity::AccessLine) {
            continue;
        }
        let line_index = *line_index_by_number.get(&line_number).ok_or_else(|| {
            PlanningError::MalformedNetwork(format!(
                "link {link_index} references unknown line {line_number}"
            ))
        })?;
        let line = &data.scenario.bus_lines[line_index];

        let mut load = Expression::from(0.0);
        for origin_index in 0..lpp_variables.origins.len() {
            load += lpp_variables.flow(origin_index, link_index);
        }

        if link.activity == Activity::InVehicle {
            // Seats delivered by whichever configuration is selected.
            let mut capacity = Expression::from(0.0);
            for (frequency, configuration) in line
                .permitted_frequencies
                .iter()
                .zip(&lpp_variables.line_configuration[line_index])
            {
                capacity +=
                    line.capacity.value() as f64 * frequency.value() as f64 * *configuration;
            }
            model = model.with(constraint!(load <= capacity));
        } else {
            // Boarding is bounded by the seats of the one configuration this
            // link belongs to.
            let frequency = link.frequency.ok_or_else(|| {
                PlanningError::MalformedNetwork(format!(
                    "access link {link_index} carries no frequency"
                ))
            })?;
            let frequency_index = line
                .permitted_frequencies
                .iter()
                .position(|permitted| *permitted == frequency)
                .ok_or_else(|| {
                    PlanningError::MalformedNetwork(format!(
                        "access link {link_index} carries frequency {frequency} not permitted on line {line_number}"
                    ))
                })?;
            let configuration = lpp_variables.line_configuration[line_index][frequency_index];
            let seats = line.capacity.value() as f64 * frequency.value() as f64;
            model = model.with(constraint!(load <= seats * configuration));
        }
        constraint_count += 1;
    }
    tracing::debug!(constraint_count, "capacity constraints added");
    Ok(model)
}

/// Each line runs at most one of its permitted frequencies; it may also stay
/// inactive.
fn add_single_configuration_constraints<M: SolverModel>(
    mut model: M,
    lpp_variables: &LppVariables,
) -> M {
    for configurations in &lpp_variables.line_configuration {
        let mut selected = Expression::from(0.0);
        for configuration in configurations {
            selected += *configuration;
        }
        model = model.with(constraint!(selected <= 1.0));
    }
    model
}

fn add_fleet_size_constraint<M: SolverModel>(
    model: M,
    data: &LppData,
    lpp_variables: &LppVariables,
    maximal_number_of_vehicles: u32,
) -> M {
    let mut fleet = Expression::from(0.0);
    for (line, configurations) in data
        .scenario
        .bus_lines
        .iter()
        .zip(&lpp_variables.line_configuration)
    {
        let circulation_time =
            minimal_circulation_time(line, data.parameters.dwell_time_at_terminal);
        for (frequency, configuration) in line.permitted_frequencies.iter().zip(configurations) {
            let vehicles =
                required_vehicles(*frequency, circulation_time, data.parameters.period_duration);
            fleet += vehicles as f64 * *configuration;
        }
    }
    model.with(constraint!(fleet <= maximal_number_of_vehicles as f64))
}

fn extract_solution<S: Solution>(
    data: &LppData,
    weights: &[f64],
    lpp_variables: &LppVariables,
    solution: &S,
) -> Result<LppSolution, PlanningError> {
    let flows_per_link = accumulate_flows_per_link(lpp_variables, solution);
    let selections = selected_configurations(data, lpp_variables, solution);

    let used_vehicles = selections
        .iter()
        .map(|(line_index, frequency)| {
            let line = &data.scenario.bus_lines[*line_index];
            required_vehicles(
                *frequency,
                minimal_circulation_time(line, data.parameters.dwell_time_at_terminal),
                data.parameters.period_duration,
            )
        })
        .sum();

    let active_lines = selections
        .iter()
        .map(|(line_index, frequency)| {
            data.scenario.bus_lines[*line_index]
                .clone()
                .with_permitted_frequencies(vec![*frequency])
        })
        .collect();

    Ok(LppSolution {
        weighted_travel_time: weighted_travel_times(data, weights, &flows_per_link),
        used_vehicles,
        active_lines,
        passengers_per_link: extract_passengers_per_link(data, &selections, &flows_per_link)?,
    })
}

/// Total passenger flow per link, summed over all origins.
fn accumulate_flows_per_link<S: Solution>(
    lpp_variables: &LppVariables,
    solution: &S,
) -> Vec<f64> {
    let mut totals = vec![0.0; lpp_variables.link_count];
    for origin_index in 0..lpp_variables.origins.len() {
        for (link_index, total) in totals.iter_mut().enumerate() {
            *total += solution.value(lpp_variables.flow(origin_index, link_index));
        }
    }
    totals
}

/// The configuration selected for each line, as `(line index, frequency)`,
/// in scenario line order. Lines are identified by their number, never by
/// position in some other collection.
fn selected_configurations<S: Solution>(
    data: &LppData,
    lpp_variables: &LppVariables,
    solution: &S,
) -> Vec<(usize, LineFrequency)> {
    let mut selections = Vec::new();
    for (line_index, (line, configurations)) in data
        .scenario
        .bus_lines
        .iter()
        .zip(&lpp_variables.line_configuration)
        .enumerate()
    {
        for (frequency, configuration) in line.permitted_frequencies.iter().zip(configurations) {
            if solution.value(*configuration) > 0.5 {
                selections.push((line_index, *frequency));
                break;
            }
        }
    }
    selections
}

fn weighted_travel_times(
    data: &LppData,
    weights: &[f64],
    flows_per_link: &[f64],
) -> BTreeMap<Activity, Duration> {
    let mut weighted_seconds: BTreeMap<Activity, f64> = BTreeMap::new();
    for ((link, weight), flow) in data.network.all_links().zip(weights).zip(flows_per_link) {
        *weighted_seconds.entry(link.activity).or_insert(0.0) += weight * flow;
    }
    weighted_seconds
        .into_iter()
        .map(|(activity, seconds)| (activity, Duration::from_secs_f64(seconds.max(0.0))))
        .collect()
}

fn extract_passengers_per_link(
    data: &LppData,
    selections: &[(usize, LineFrequency)],
    flows_per_link: &[f64],
) -> Result<BTreeMap<LineNr, BTreeMap<DirectionName, Vec<PassengersPerLink>>>, PlanningError> {
    let mut per_line = BTreeMap::new();
    for (line_index, _) in selections {
        let line = &data.scenario.bus_lines[*line_index];
        let mut per_direction = BTreeMap::new();
        for direction in line.directions() {
            let mut loads = Vec::new();
            for (first, second) in direction.stations_as_pairs() {
                let source = LinePlanningNetwork::service_node_name(first, line, direction);
                let target = LinePlanningNetwork::service_node_name(second, line, direction);
                let link_index = data.network.get_link_index(&source, &target)?;
                loads.push(PassengersPerLink {
                    start: first.clone(),
                    end: second.clone(),
                    pax: flows_per_link[link_index.index()],
                });
            }
            per_direction.insert(direction.name.clone(), loads);
        }
        per_line.insert(line.number, per_direction);
    }
    Ok(per_line)
}

/// Best-effort diagnostic for infeasible programs; failure to write it only
/// warns.
fn write_infeasibility_report(data: &LppData) {
    let mut report = String::from("infeasible line planning problem\n");
    report.push_str(&format!(
        "nodes: {}\nlinks: {}\norigins: {}\nlines: {}\n",
        data.network.node_count(),
        data.network.link_count(),
        data.scenario.demand_matrix.all_origins().count(),
        data.scenario.bus_lines.len(),
    ));
    report.push_str(&format!(
        "total demand: {:.2}\npositive relations: {}\n",
        data.scenario.demand_matrix.total(),
        data.scenario.demand_matrix.positive_relation_count(),
    ));
    report.push_str("parameters:\n");
    for (name, value) in data.parameters.sorted_fields() {
        report.push_str(&format!("  {name}: {value}\n"));
    }

    match std::fs::write(INFEASIBILITY_REPORT_FILE, report) {
        Ok(()) => tracing::warn!(file = INFEASIBILITY_REPORT_FILE, "infeasibility report written"),
        Err(error) => tracing::warn!(%error, "could not write infeasibility report"),
    }
}

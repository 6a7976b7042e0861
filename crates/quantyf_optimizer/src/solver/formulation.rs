use std::cmp::Ordering;

use jiff::Timestamp;
use rayon::prelude::*;
use tracing::{Level, debug, instrument, warn};

use crate::{
    constraints::{route_validator::RouteValidator, violation::Violation},
    cost::cost_model::total_cost,
    problem::{demand::DemandIdx, transport_problem::TransportProblem},
    routing::{candidate_generator::CandidateGenerator, route::Route},
    solver::termination::Termination,
};

/// Feasible, priced candidates of one demand, cheapest first.
#[derive(Debug, Clone)]
pub struct DemandCandidates {
    pub demand_id: DemandIdx,
    pub candidates: Vec<Route>,
    /// Number of routes the generator produced, feasible or not.
    pub generated: usize,
    /// Violations of every discarded candidate, in generation order.
    pub violations: Vec<Violation>,
    /// Formulation stopped before this demand was looked at.
    pub skipped: bool,
}

impl DemandCandidates {
    fn skipped(demand_id: DemandIdx) -> Self {
        DemandCandidates {
            demand_id,
            candidates: vec![],
            generated: 0,
            violations: vec![],
            skipped: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Everything an [`AssignmentDecider`](crate::solver::decider::AssignmentDecider) needs:
/// candidates per demand in assignment order and the initial hub capacities.
#[derive(Debug, Clone)]
pub struct AssignmentFormulation {
    pub demands: Vec<DemandCandidates>,
    pub hub_capacities: Vec<u32>,
}

impl AssignmentFormulation {
    pub fn len(&self) -> usize {
        self.demands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demands.is_empty()
    }
}

/// Total cost, then fewer hops, then shorter distance, then the hub id sequence.
pub fn compare_candidates(problem: &TransportProblem, a: &Route, b: &Route) -> Ordering {
    let cost = |route: &Route| route.cost().map_or(f64::INFINITY, |cost| cost.total());

    cost(a)
        .total_cmp(&cost(b))
        .then_with(|| a.hops().cmp(&b.hops()))
        .then_with(|| a.total_distance().total_cmp(&b.total_distance()))
        .then_with(|| a.hub_ids(problem).cmp(&b.hub_ids(problem)))
}

fn formulate_demand(
    problem: &TransportProblem,
    generator: &CandidateGenerator,
    validator: &RouteValidator,
    demand_id: DemandIdx,
) -> DemandCandidates {
    let demand = problem.demand(demand_id);

    let mut candidates = vec![];
    let mut violations = vec![];
    let mut generated = 0;

    for mut route in generator.candidates(demand) {
        generated += 1;

        let route_violations = validator.validate(problem, demand, &route);
        if !route_violations.is_empty() {
            violations.extend(route_violations);
            continue;
        }

        match total_cost(&route, demand, problem) {
            Ok(cost) => {
                route.set_cost(cost);
                candidates.push(route);
            }
            Err(error) => warn!(
                demand = demand.external_id(),
                "Cannot price candidate route: {}", error
            ),
        }
    }

    candidates.sort_by(|a, b| compare_candidates(problem, a, b));

    debug!(
        demand = demand.external_id(),
        generated,
        feasible = candidates.len(),
        "Formulated demand"
    );

    DemandCandidates {
        demand_id,
        candidates,
        generated,
        violations,
        skipped: false,
    }
}

/// Generates, validates and prices the candidates of every demand. Demands are processed in
/// parallel on the current rayon pool and collected back in assignment order.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn formulate(
    problem: &TransportProblem,
    generator: &CandidateGenerator,
    validator: &RouteValidator,
    terminations: &[Termination],
    started_at: Timestamp,
) -> AssignmentFormulation {
    let demands = problem
        .assignment_order()
        .into_par_iter()
        .map(|demand_id| {
            if terminations
                .iter()
                .any(|termination| termination.is_reached(started_at))
            {
                return DemandCandidates::skipped(demand_id);
            }

            formulate_demand(problem, generator, validator, demand_id)
        })
        .collect();

    AssignmentFormulation {
        demands,
        hub_capacities: problem
            .hubs()
            .iter()
            .map(|hub| hub.throughput_capacity())
            .collect(),
    }
}

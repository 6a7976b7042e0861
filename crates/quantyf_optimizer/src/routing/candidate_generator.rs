use fixedbitset::FixedBitSet;
use quantyf_matrix::travel_matrices::LegMetrics;
use smallvec::{SmallVec, smallvec};
use tracing::warn;

use crate::{
    cost::vehicle_selection::select_vehicle,
    problem::{demand::Demand, node::NodeIdx, transport_problem::TransportProblem},
    routing::{
        leg::Leg,
        route::{Route, RouteNodes},
    },
};

/// Enumerates candidate routes per demand over a fixed set of eligible hubs.
pub struct CandidateGenerator<'a> {
    problem: &'a TransportProblem,
    eligible_hubs: Vec<NodeIdx>,
    max_hops: usize,
    max_vehicles_per_leg: Option<u32>,
}

impl<'a> CandidateGenerator<'a> {
    /// Every hub of the problem is eligible.
    pub fn new(
        problem: &'a TransportProblem,
        max_hops: usize,
        max_vehicles_per_leg: Option<u32>,
    ) -> Self {
        let eligible_hubs = problem.hubs().iter().map(|hub| hub.node_id()).collect();
        Self::with_eligible_hubs(problem, eligible_hubs, max_hops, max_vehicles_per_leg)
    }

    pub fn with_eligible_hubs(
        problem: &'a TransportProblem,
        eligible_hubs: Vec<NodeIdx>,
        max_hops: usize,
        max_vehicles_per_leg: Option<u32>,
    ) -> Self {
        CandidateGenerator {
            problem,
            eligible_hubs,
            max_hops,
            max_vehicles_per_leg,
        }
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Lazy, finite sequence of cycle-free routes for `demand`: the direct route first,
    /// then hub routes in depth-first order.
    pub fn candidates<'g>(&'g self, demand: &'g Demand) -> RouteCandidates<'g, 'a> {
        RouteCandidates::new(self, demand)
    }

    fn build_leg(&self, from: NodeIdx, to: NodeIdx, metrics: LegMetrics, pallets: u32) -> Option<Leg> {
        match select_vehicle(
            self.problem.vehicles(),
            metrics.distance_km,
            pallets,
            self.max_vehicles_per_leg,
        ) {
            Ok(Some(choice)) => Some(Leg::new(
                from,
                to,
                metrics.distance_km,
                metrics.time_hours,
                choice.vehicle_type,
                choice.vehicle,
            )),
            Ok(None) => None,
            Err(error) => {
                warn!(
                    "Cannot plan leg {} -> {}: {}",
                    self.problem.node_external_id(from),
                    self.problem.node_external_id(to),
                    error
                );
                None
            }
        }
    }

    fn build_route(&self, nodes: RouteNodes, pallets: u32) -> Option<Route> {
        let mut legs = SmallVec::with_capacity(nodes.len() - 1);
        for pair in nodes.windows(2) {
            let metrics = self.problem.leg(pair[0], pair[1])?;
            legs.push(self.build_leg(pair[0], pair[1], metrics, pallets)?);
        }

        Some(Route::new(nodes, legs))
    }
}

enum Stage {
    Start,
    Hubs,
    Done,
}

/// Depth-first walk over hub sequences. `cursors[d]` is the next eligible hub to try at
/// depth `d`, and `cursors.len() == path.len() + 1` while the walk is in progress.
pub struct RouteCandidates<'g, 'a> {
    generator: &'g CandidateGenerator<'a>,
    demand: &'g Demand,
    stage: Stage,
    path: SmallVec<[NodeIdx; 4]>,
    cursors: SmallVec<[usize; 4]>,
    visited: FixedBitSet,
}

impl<'g, 'a> RouteCandidates<'g, 'a> {
    fn new(generator: &'g CandidateGenerator<'a>, demand: &'g Demand) -> Self {
        let mut visited = FixedBitSet::with_capacity(generator.problem.nodes().len());
        visited.insert(demand.origin().get());
        visited.insert(demand.destination().get());

        RouteCandidates {
            generator,
            demand,
            stage: Stage::Start,
            path: SmallVec::new(),
            cursors: SmallVec::new(),
            visited,
        }
    }

    fn tail(&self) -> NodeIdx {
        self.path.last().copied().unwrap_or(self.demand.origin())
    }

    fn direct_route(&self) -> Option<Route> {
        self.generator.build_route(
            smallvec![self.demand.origin(), self.demand.destination()],
            self.demand.pallets(),
        )
    }

    /// Advances the cursor of the deepest level to the next unvisited hub reachable from the tail.
    fn next_hub(&mut self) -> Option<NodeIdx> {
        let tail = self.tail();
        let depth = self.cursors.len() - 1;
        let problem = self.generator.problem;

        while self.cursors[depth] < self.generator.eligible_hubs.len() {
            let hub = self.generator.eligible_hubs[self.cursors[depth]];
            self.cursors[depth] += 1;

            if !self.visited.contains(hub.get()) && problem.leg(tail, hub).is_some() {
                return Some(hub);
            }
        }

        None
    }

    fn close_path(&self) -> Option<Route> {
        let destination = self.demand.destination();
        self.generator.problem.leg(self.tail(), destination)?;

        let mut nodes: RouteNodes = SmallVec::with_capacity(self.path.len() + 2);
        nodes.push(self.demand.origin());
        nodes.extend_from_slice(&self.path);
        nodes.push(destination);

        self.generator.build_route(nodes, self.demand.pallets())
    }

    fn retreat(&mut self) {
        if let Some(hub) = self.path.pop() {
            self.visited.set(hub.get(), false);
        }
    }
}

impl Iterator for RouteCandidates<'_, '_> {
    type Item = Route;

    fn next(&mut self) -> Option<Route> {
        loop {
            match self.stage {
                Stage::Start => {
                    if self.demand.is_degenerate() {
                        self.stage = Stage::Done;
                        return Some(Route::degenerate(self.demand.origin()));
                    }

                    self.stage = Stage::Hubs;
                    if self.generator.max_hops > 0 {
                        self.cursors.push(0);
                    }

                    if let Some(route) = self.direct_route() {
                        return Some(route);
                    }
                }
                Stage::Hubs => {
                    if self.cursors.is_empty() {
                        self.stage = Stage::Done;
                        continue;
                    }

                    match self.next_hub() {
                        Some(hub) => {
                            self.path.push(hub);
                            self.visited.insert(hub.get());

                            let candidate = self.close_path();

                            if self.path.len() < self.generator.max_hops {
                                self.cursors.push(0);
                            } else {
                                self.retreat();
                            }

                            if candidate.is_some() {
                                return candidate;
                            }
                        }
                        None => {
                            self.cursors.pop();
                            if !self.cursors.is_empty() {
                                self.retreat();
                            }
                        }
                    }
                }
                Stage::Done => return None,
            }
        }
    }
}

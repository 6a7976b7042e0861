use fxhash::FxHashSet;
use smallvec::{SmallVec, smallvec};

use crate::{
    cost::cost_breakdown::CostBreakdown,
    problem::{
        node::NodeIdx,
        transport_problem::TransportProblem,
        travel::{Distance, Hours},
    },
    routing::leg::Leg,
};

pub type RouteNodes = SmallVec<[NodeIdx; 4]>;

/// Cycle-free path from a demand's origin to its destination, optionally through hubs.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    nodes: RouteNodes,
    legs: SmallVec<[Leg; 3]>,
    degenerate: bool,
    cost: Option<CostBreakdown>,
}

impl Route {
    /// `legs[i]` must connect `nodes[i]` to `nodes[i + 1]`.
    pub fn new(nodes: RouteNodes, legs: SmallVec<[Leg; 3]>) -> Self {
        debug_assert_eq!(nodes.len(), legs.len() + 1);
        debug_assert!(
            legs.iter()
                .zip(nodes.windows(2))
                .all(|(leg, pair)| leg.from() == pair[0] && leg.to() == pair[1])
        );

        let route = Route {
            nodes,
            legs,
            degenerate: false,
            cost: None,
        };
        debug_assert!(route.is_acyclic());
        route
    }

    /// Zero-leg route for a demand whose origin equals its destination.
    pub fn degenerate(node_id: NodeIdx) -> Self {
        Route {
            nodes: smallvec![node_id],
            legs: SmallVec::new(),
            degenerate: true,
            cost: None,
        }
    }

    pub fn nodes(&self) -> &[NodeIdx] {
        &self.nodes
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn origin(&self) -> NodeIdx {
        self.nodes[0]
    }

    pub fn destination(&self) -> NodeIdx {
        self.nodes[self.nodes.len() - 1]
    }

    /// Nodes strictly between origin and destination.
    pub fn intermediate_nodes(&self) -> &[NodeIdx] {
        if self.nodes.len() <= 2 {
            return &[];
        }

        &self.nodes[1..self.nodes.len() - 1]
    }

    pub fn hops(&self) -> usize {
        self.intermediate_nodes().len()
    }

    pub fn is_direct(&self) -> bool {
        !self.degenerate && self.legs.len() == 1
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn total_distance(&self) -> Distance {
        self.legs.iter().map(Leg::distance_km).sum()
    }

    pub fn travel_time(&self) -> Hours {
        self.legs.iter().map(Leg::time_hours).sum()
    }

    /// Travel time plus the dwell time of every intermediate hub.
    pub fn total_time(&self, problem: &TransportProblem) -> Hours {
        let dwell: Hours = self
            .intermediate_nodes()
            .iter()
            .filter_map(|&node_id| problem.hub_at(node_id))
            .map(|hub| hub.dwell_hours())
            .sum();

        self.travel_time() + dwell
    }

    pub fn is_acyclic(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.nodes.iter().all(|node_id| seen.insert(*node_id))
    }

    pub fn cost(&self) -> Option<&CostBreakdown> {
        self.cost.as_ref()
    }

    pub fn set_cost(&mut self, cost: CostBreakdown) {
        self.cost = Some(cost);
    }

    /// External ids of the intermediate hubs, used as the last tie-break between routes.
    pub fn hub_ids<'a>(&self, problem: &'a TransportProblem) -> SmallVec<[&'a str; 2]> {
        self.intermediate_nodes()
            .iter()
            .map(|&node_id| problem.node_external_id(node_id))
            .collect()
    }
}

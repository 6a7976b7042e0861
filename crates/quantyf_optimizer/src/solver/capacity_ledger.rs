use smallvec::SmallVec;

use crate::problem::{hub::HubIdx, node::NodeIdx, transport_problem::TransportProblem};

/// Remaining throughput of every hub during one optimization run.
///
/// The ledger is owned by a single run and only changes through [`HubCapacityLedger::reserve`],
/// which either takes the pallets from every hub of a route or from none of them.
#[derive(Debug, Clone)]
pub struct HubCapacityLedger {
    capacities: Vec<u32>,
    remaining: Vec<u32>,
}

impl HubCapacityLedger {
    pub fn new(problem: &TransportProblem) -> Self {
        let capacities: Vec<u32> = problem
            .hubs()
            .iter()
            .map(|hub| hub.throughput_capacity())
            .collect();

        HubCapacityLedger {
            remaining: capacities.clone(),
            capacities,
        }
    }

    pub fn capacity(&self, hub_id: HubIdx) -> u32 {
        self.capacities[hub_id.get()]
    }

    pub fn remaining(&self, hub_id: HubIdx) -> u32 {
        self.remaining[hub_id.get()]
    }

    pub fn used(&self, hub_id: HubIdx) -> u32 {
        self.capacity(hub_id) - self.remaining(hub_id)
    }

    /// Hubs among `nodes` that cannot take `pallets` more. Nodes that are not hubs are ignored.
    pub fn exhausted_hubs(
        &self,
        problem: &TransportProblem,
        nodes: &[NodeIdx],
        pallets: u32,
    ) -> SmallVec<[HubIdx; 2]> {
        nodes
            .iter()
            .filter_map(|&node_id| problem.hub_idx_at(node_id))
            .filter(|&hub_id| self.remaining(hub_id) < pallets)
            .collect()
    }

    /// Takes `pallets` from every hub among `nodes`. Returns the exhausted hubs and leaves the
    /// ledger untouched when any of them lacks capacity.
    pub fn reserve(
        &mut self,
        problem: &TransportProblem,
        nodes: &[NodeIdx],
        pallets: u32,
    ) -> Result<(), SmallVec<[HubIdx; 2]>> {
        let exhausted = self.exhausted_hubs(problem, nodes, pallets);
        if !exhausted.is_empty() {
            return Err(exhausted);
        }

        for hub_id in nodes.iter().filter_map(|&node_id| problem.hub_idx_at(node_id)) {
            self.remaining[hub_id.get()] -= pallets;
        }

        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (HubIdx, u32, u32)> + '_ {
        self.capacities
            .iter()
            .zip(self.remaining.iter())
            .enumerate()
            .map(|(index, (&capacity, &remaining))| (HubIdx::new(index), capacity, remaining))
    }
}

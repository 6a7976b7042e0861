use std::cmp::Ordering;

use fxhash::{FxHashMap, FxHashSet};
use quantyf_matrix::travel_matrices::{LegMetrics, TravelMatrices};
use serde::Serialize;
use tracing::warn;

use crate::{
    error::{InvalidInputError, ProblemError},
    problem::{
        demand::{Demand, DemandIdx},
        hub::{Hub, HubIdx},
        node::{Node, NodeIdx},
        vehicle::VehicleCatalog,
    },
};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Node,
    Demand,
    Hub,
    Vehicle,
    Leg,
}

/// An input record that was skipped because it is malformed.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub kind: RecordKind,
    pub id: String,
    pub error: InvalidInputError,
}

impl RejectedRecord {
    pub fn new(kind: RecordKind, id: impl Into<String>, error: InvalidInputError) -> Self {
        RejectedRecord {
            kind,
            id: id.into(),
            error,
        }
    }
}

/// Fully loaded, read-only input of an optimization run.
pub struct TransportProblem {
    nodes: Vec<Node>,
    node_ids: FxHashMap<String, NodeIdx>,
    hubs: Vec<Hub>,
    hub_by_node: Vec<Option<HubIdx>>,
    demands: Vec<Demand>,
    vehicles: VehicleCatalog,
    matrices: TravelMatrices,
    rejected_records: Vec<RejectedRecord>,
}

impl TransportProblem {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, node_id: NodeIdx) -> &Node {
        &self.nodes[node_id]
    }

    pub fn node_external_id(&self, node_id: NodeIdx) -> &str {
        self.nodes[node_id].external_id()
    }

    pub fn node_by_external_id(&self, external_id: &str) -> Option<NodeIdx> {
        self.node_ids.get(external_id).copied()
    }

    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    pub fn hub(&self, hub_id: HubIdx) -> &Hub {
        &self.hubs[hub_id]
    }

    pub fn hub_idx_at(&self, node_id: NodeIdx) -> Option<HubIdx> {
        self.hub_by_node.get(node_id.get()).copied().flatten()
    }

    pub fn hub_at(&self, node_id: NodeIdx) -> Option<&Hub> {
        self.hub_idx_at(node_id).map(|hub_id| &self.hubs[hub_id])
    }

    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    pub fn demand(&self, demand_id: DemandIdx) -> &Demand {
        &self.demands[demand_id]
    }

    pub fn vehicles(&self) -> &VehicleCatalog {
        &self.vehicles
    }

    pub fn matrices(&self) -> &TravelMatrices {
        &self.matrices
    }

    pub fn leg(&self, from: NodeIdx, to: NodeIdx) -> Option<LegMetrics> {
        self.matrices.leg(from.get(), to.get())
    }

    pub fn rejected_records(&self) -> &[RejectedRecord] {
        &self.rejected_records
    }

    /// Demands in assignment order: priority (High first), pallets descending, then id ascending.
    pub fn assignment_order(&self) -> Vec<DemandIdx> {
        let mut order: Vec<DemandIdx> = (0..self.demands.len()).map(DemandIdx::new).collect();
        order.sort_by(|&a, &b| compare_assignment_order(&self.demands[a], &self.demands[b]));
        order
    }
}

fn compare_assignment_order(a: &Demand, b: &Demand) -> Ordering {
    a.priority()
        .rank()
        .cmp(&b.priority().rank())
        .then_with(|| b.pallets().cmp(&a.pallets()))
        .then_with(|| a.external_id().cmp(b.external_id()))
}

#[derive(Default)]
pub struct TransportProblemBuilder {
    nodes: Vec<Node>,
    hubs: Vec<Hub>,
    demands: Vec<Demand>,
    vehicles: Option<VehicleCatalog>,
    matrices: Option<TravelMatrices>,
    rejected_records: Vec<RejectedRecord>,
}

impl TransportProblemBuilder {
    pub fn set_nodes(&mut self, nodes: Vec<Node>) -> &mut TransportProblemBuilder {
        self.nodes = nodes;
        self
    }

    pub fn add_node(&mut self, node: Node) -> &mut TransportProblemBuilder {
        self.nodes.push(node);
        self
    }

    pub fn add_hub(&mut self, hub: Hub) -> &mut TransportProblemBuilder {
        self.hubs.push(hub);
        self
    }

    pub fn add_demand(&mut self, demand: Demand) -> &mut TransportProblemBuilder {
        self.demands.push(demand);
        self
    }

    pub fn set_vehicles(&mut self, vehicles: VehicleCatalog) -> &mut TransportProblemBuilder {
        self.vehicles = Some(vehicles);
        self
    }

    pub fn set_matrices(&mut self, matrices: TravelMatrices) -> &mut TransportProblemBuilder {
        self.matrices = Some(matrices);
        self
    }

    pub fn add_rejected_record(&mut self, record: RejectedRecord) -> &mut TransportProblemBuilder {
        self.rejected_records.push(record);
        self
    }

    pub fn build(self) -> Result<TransportProblem, ProblemError> {
        let vehicles = self.vehicles.unwrap_or_default();
        if vehicles.is_empty() {
            return Err(ProblemError::EmptyVehicleCatalog);
        }

        let num_nodes = self.nodes.len();
        let matrices = self
            .matrices
            .unwrap_or_else(|| TravelMatrices::new(num_nodes));
        if matrices.num_locations() != num_nodes {
            return Err(ProblemError::MatrixSizeMismatch {
                expected: num_nodes,
                actual: matrices.num_locations(),
            });
        }

        let mut rejected_records = self.rejected_records;

        let mut node_ids = FxHashMap::default();
        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(previous) =
                node_ids.insert(node.external_id().to_owned(), NodeIdx::new(index))
            {
                // Lookups keep resolving to the first node with this id.
                node_ids.insert(node.external_id().to_owned(), previous);
                rejected_records.push(RejectedRecord::new(
                    RecordKind::Node,
                    node.external_id(),
                    InvalidInputError::DuplicateId(node.external_id().to_owned()),
                ));
            }
        }

        let mut hubs = Vec::with_capacity(self.hubs.len());
        let mut hub_by_node = vec![None; num_nodes];
        for hub in self.hubs {
            let node_id = hub.node_id();
            let external_id = node_external_id(&self.nodes, node_id);

            let error = if node_id.get() >= num_nodes {
                Some(InvalidInputError::UnknownNode(external_id.clone()))
            } else if hub_by_node[node_id.get()].is_some() {
                Some(InvalidInputError::DuplicateId(external_id.clone()))
            } else {
                None
            };

            match error {
                Some(error) => {
                    warn!("Skipping hub '{}': {}", external_id, error);
                    rejected_records.push(RejectedRecord::new(RecordKind::Hub, external_id, error));
                }
                None => {
                    hub_by_node[node_id.get()] = Some(HubIdx::new(hubs.len()));
                    hubs.push(hub);
                }
            }
        }

        let mut demand_ids = FxHashSet::default();
        let mut demands = Vec::with_capacity(self.demands.len());
        for demand in self.demands {
            let error = if demand.origin().get() >= num_nodes {
                Some(InvalidInputError::UnknownNode(demand.origin().to_string()))
            } else if demand.destination().get() >= num_nodes {
                Some(InvalidInputError::UnknownNode(demand.destination().to_string()))
            } else if !demand_ids.insert(demand.external_id().to_owned()) {
                Some(InvalidInputError::DuplicateId(demand.external_id().to_owned()))
            } else {
                None
            };

            match error {
                Some(error) => {
                    warn!("Skipping demand '{}': {}", demand.external_id(), error);
                    rejected_records.push(RejectedRecord::new(
                        RecordKind::Demand,
                        demand.external_id(),
                        error,
                    ));
                }
                None => demands.push(demand),
            }
        }

        if demands.is_empty() {
            return Err(ProblemError::NoUsableDemands {
                rejected: rejected_records
                    .iter()
                    .filter(|record| record.kind == RecordKind::Demand)
                    .count(),
            });
        }

        Ok(TransportProblem {
            nodes: self.nodes,
            node_ids,
            hubs,
            hub_by_node,
            demands,
            vehicles,
            matrices,
            rejected_records,
        })
    }
}

fn node_external_id(nodes: &[Node], node_id: NodeIdx) -> String {
    nodes
        .get(node_id.get())
        .map(|node| node.external_id().to_owned())
        .unwrap_or_else(|| node_id.to_string())
}

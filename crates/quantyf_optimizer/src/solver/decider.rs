use crate::{
    error::OptimizerError,
    problem::transport_problem::TransportProblem,
    solver::{capacity_ledger::HubCapacityLedger, formulation::AssignmentFormulation},
};

/// Chooses at most one candidate per demand.
///
/// The returned vector has one entry per demand of the formulation, in the same order.
/// `Some(i)` picks `formulation.demands[k].candidates[i]`. Choices are applied through the hub
/// capacity ledger in assignment order, a choice that no longer fits is not served.
pub trait AssignmentDecider: Sync {
    fn decide(
        &self,
        problem: &TransportProblem,
        formulation: &AssignmentFormulation,
    ) -> Result<Vec<Option<usize>>, OptimizerError>;
}

/// Cheapest candidate that still fits the remaining hub capacity, demand after demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAssignment;

impl AssignmentDecider for GreedyAssignment {
    fn decide(
        &self,
        problem: &TransportProblem,
        formulation: &AssignmentFormulation,
    ) -> Result<Vec<Option<usize>>, OptimizerError> {
        let mut ledger = HubCapacityLedger::new(problem);

        Ok(formulation
            .demands
            .iter()
            .map(|demand| {
                let pallets = problem.demand(demand.demand_id).pallets();

                demand.candidates.iter().position(|route| {
                    ledger
                        .reserve(problem, route.intermediate_nodes(), pallets)
                        .is_ok()
                })
            })
            .collect())
    }
}

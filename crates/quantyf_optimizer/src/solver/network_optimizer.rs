use jiff::Timestamp;
use tracing::{debug, info, instrument, warn};

use crate::{
    constraints::route_validator::RouteValidator,
    error::OptimizerError,
    problem::transport_problem::TransportProblem,
    routing::candidate_generator::CandidateGenerator,
    solver::{
        capacity_ledger::HubCapacityLedger,
        decider::{AssignmentDecider, GreedyAssignment},
        formulation::{AssignmentFormulation, DemandCandidates, formulate},
        optimizer_params::OptimizerParams,
        solution::{ServedDemand, Solution, SolutionWarning, UnservedDemand, UnservedReason},
    },
    timer_debug,
};

/// Assigns every demand of a problem to at most one route.
///
/// Runs in two stages: [`NetworkOptimizer::formulate`] builds the priced feasible candidates of
/// every demand, then the decisions of an [`AssignmentDecider`] are applied in assignment
/// order through a run-scoped [`HubCapacityLedger`].
pub struct NetworkOptimizer<'a> {
    problem: &'a TransportProblem,
    params: OptimizerParams,
}

impl<'a> NetworkOptimizer<'a> {
    pub fn new(
        problem: &'a TransportProblem,
        params: OptimizerParams,
    ) -> Result<Self, OptimizerError> {
        params.validate()?;
        Ok(NetworkOptimizer { problem, params })
    }

    pub fn params(&self) -> &OptimizerParams {
        &self.params
    }

    fn should_terminate(&self, started_at: Timestamp) -> bool {
        self.params.terminations.iter().any(|termination| {
            if termination.is_reached(started_at) {
                debug!("Termination condition met: {:?}", termination);
                true
            } else {
                false
            }
        })
    }

    fn create_thread_pool(&self) -> Result<rayon::ThreadPool, OptimizerError> {
        Ok(rayon::ThreadPoolBuilder::new()
            .num_threads(self.params.threads.number_of_threads())
            .build()?)
    }

    pub fn formulate(&self) -> Result<AssignmentFormulation, OptimizerError> {
        self.formulate_from(Timestamp::now())
    }

    fn formulate_from(&self, started_at: Timestamp) -> Result<AssignmentFormulation, OptimizerError> {
        let generator = CandidateGenerator::new(
            self.problem,
            self.params.max_hops,
            self.params.max_vehicles_per_leg,
        );
        let validator = RouteValidator::from_params(&self.params);
        let pool = self.create_thread_pool()?;

        Ok(pool.install(|| {
            formulate(
                self.problem,
                &generator,
                &validator,
                &self.params.terminations,
                started_at,
            )
        }))
    }

    /// Runs the built-in greedy assignment.
    pub fn optimize(&self) -> Result<Solution, OptimizerError> {
        self.optimize_with(&GreedyAssignment)
    }

    #[instrument(skip_all, level = "debug")]
    pub fn optimize_with(&self, decider: &dyn AssignmentDecider) -> Result<Solution, OptimizerError> {
        let started_at = Timestamp::now();

        let formulation = timer_debug!("formulate", self.formulate_from(started_at))?;
        let decisions = timer_debug!("decide", decider.decide(self.problem, &formulation))?;

        let solution = timer_debug!(
            "assign",
            self.assign(formulation, decisions, started_at)
        )?;

        info!(
            served = solution.served().len(),
            unserved = solution.unserved().len(),
            total_cost = solution.total_cost(),
            "Optimized {} demands in {:?}",
            self.problem.demands().len(),
            solution.duration()
        );

        if solution.budget().exceeded {
            warn!(
                "Total cost {:.2} exceeds the budget ceiling by {:.2}",
                solution.total_cost(),
                solution.budget().overage
            );
        }

        Ok(solution)
    }

    fn check_decisions(
        &self,
        formulation: &AssignmentFormulation,
        decisions: &[Option<usize>],
    ) -> Result<(), OptimizerError> {
        if decisions.len() != formulation.len() {
            return Err(OptimizerError::DecisionCountMismatch {
                expected: formulation.len(),
                actual: decisions.len(),
            });
        }

        for (demand, decision) in formulation.demands.iter().zip(decisions) {
            if let Some(candidate) = *decision
                && candidate >= demand.candidates.len()
            {
                return Err(OptimizerError::InvalidDecision {
                    demand_id: self.problem.demand(demand.demand_id).external_id().to_owned(),
                    candidate,
                    available: demand.candidates.len(),
                });
            }
        }

        Ok(())
    }

    fn unserved_reason(&self, demand: &DemandCandidates, ledger: &HubCapacityLedger) -> UnservedReason {
        if demand.candidates.is_empty() {
            return if demand.generated == 0 {
                UnservedReason::NoRouteExists
            } else {
                UnservedReason::AllRoutesExceedConstraints {
                    violations: demand.violations.clone(),
                }
            };
        }

        let pallets = self.problem.demand(demand.demand_id).pallets();
        let mut exhausted_hubs = vec![];
        for route in &demand.candidates {
            let exhausted = ledger.exhausted_hubs(self.problem, route.intermediate_nodes(), pallets);
            if exhausted.is_empty() {
                return UnservedReason::NotSelected;
            }

            exhausted_hubs.extend(exhausted.into_iter().map(|hub_id| {
                self.problem
                    .node_external_id(self.problem.hub(hub_id).node_id())
                    .to_owned()
            }));
        }

        exhausted_hubs.sort();
        exhausted_hubs.dedup();

        UnservedReason::AllRoutesHubCapacityExhausted {
            hubs: exhausted_hubs,
        }
    }

    fn assign(
        &self,
        formulation: AssignmentFormulation,
        decisions: Vec<Option<usize>>,
        started_at: Timestamp,
    ) -> Result<Solution, OptimizerError> {
        self.check_decisions(&formulation, &decisions)?;

        let mut ledger = HubCapacityLedger::new(self.problem);
        let mut served = vec![];
        let mut unserved = vec![];
        let mut warnings = vec![];
        let mut timed_out = false;

        for (mut demand, decision) in formulation.demands.into_iter().zip(decisions) {
            let external_id = self.problem.demand(demand.demand_id).external_id();

            timed_out = timed_out || demand.skipped || self.should_terminate(started_at);
            if timed_out {
                unserved.push(UnservedDemand {
                    demand_id: demand.demand_id,
                    reason: UnservedReason::OptimizerTimeout,
                });
                continue;
            }

            let pallets = self.problem.demand(demand.demand_id).pallets();
            let reserved = decision.filter(|&candidate| {
                ledger
                    .reserve(
                        self.problem,
                        demand.candidates[candidate].intermediate_nodes(),
                        pallets,
                    )
                    .is_ok()
            });

            match reserved {
                Some(candidate) => {
                    let route = demand.candidates.swap_remove(candidate);
                    debug!(
                        demand = external_id,
                        hops = route.hops(),
                        total_cost = route.cost().map(|cost| cost.total()),
                        "Demand served"
                    );

                    if route.is_degenerate() {
                        warn!(demand = external_id, "Origin equals destination, zero-leg route");
                        warnings.push(SolutionWarning::DegenerateRoute {
                            demand_id: external_id.to_owned(),
                        });
                    }

                    served.push(ServedDemand::new(demand.demand_id, route));
                }
                None => {
                    let reason = self.unserved_reason(&demand, &ledger);
                    debug!(demand = external_id, "Demand unserved: {:?}", reason);
                    unserved.push(UnservedDemand {
                        demand_id: demand.demand_id,
                        reason,
                    });
                }
            }
        }

        Ok(Solution::new(
            served,
            unserved,
            warnings,
            self.params.budget_ceiling,
            ledger,
            Timestamp::now().duration_since(started_at),
        ))
    }
}

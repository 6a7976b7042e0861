use jiff::SignedDuration;
use serde::Serialize;

use crate::{
    constraints::violation::Violation,
    cost::cost_breakdown::CostBreakdown,
    problem::{demand::DemandIdx, travel::Cost},
    routing::route::Route,
    solver::capacity_ledger::HubCapacityLedger,
};

/// Why a demand got no route. Per-demand failures are data, never errors.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum UnservedReason {
    /// The generator found no connected route at all.
    NoRouteExists,
    AllRoutesExceedConstraints { violations: Vec<Violation> },
    /// External ids of the hubs that lacked capacity, sorted.
    AllRoutesHubCapacityExhausted { hubs: Vec<String> },
    OptimizerTimeout,
    /// A feasible route still fits, but the decider chose none for this demand.
    NotSelected,
}

static ZERO_COST: CostBreakdown = CostBreakdown::ZERO;

#[derive(Debug, Clone, PartialEq)]
pub struct ServedDemand {
    demand_id: DemandIdx,
    route: Route,
}

impl ServedDemand {
    pub fn new(demand_id: DemandIdx, route: Route) -> Self {
        ServedDemand { demand_id, route }
    }

    pub fn demand_id(&self) -> DemandIdx {
        self.demand_id
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn cost(&self) -> &CostBreakdown {
        self.route.cost().unwrap_or(&ZERO_COST)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnservedDemand {
    pub demand_id: DemandIdx,
    pub reason: UnservedReason,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum SolutionWarning {
    /// Origin equals destination, served by a zero-leg route.
    DegenerateRoute { demand_id: String },
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub ceiling: Option<Cost>,
    pub total_cost: Cost,
    pub exceeded: bool,
    pub overage: Cost,
}

impl BudgetStatus {
    pub fn evaluate(ceiling: Option<Cost>, total_cost: Cost) -> Self {
        let overage = ceiling.map_or(0.0, |ceiling| (total_cost - ceiling).max(0.0));

        BudgetStatus {
            ceiling,
            total_cost,
            exceeded: overage > 0.0,
            overage,
        }
    }
}

/// Result of one optimization run.
#[derive(Debug, Clone)]
pub struct Solution {
    served: Vec<ServedDemand>,
    unserved: Vec<UnservedDemand>,
    warnings: Vec<SolutionWarning>,
    budget: BudgetStatus,
    ledger: HubCapacityLedger,
    duration: SignedDuration,
    timed_out: bool,
}

impl Solution {
    pub fn new(
        served: Vec<ServedDemand>,
        unserved: Vec<UnservedDemand>,
        warnings: Vec<SolutionWarning>,
        budget_ceiling: Option<Cost>,
        ledger: HubCapacityLedger,
        duration: SignedDuration,
    ) -> Self {
        let total_cost = served.iter().map(|served| served.cost().total()).sum();
        let timed_out = unserved
            .iter()
            .any(|unserved| unserved.reason == UnservedReason::OptimizerTimeout);

        Solution {
            served,
            unserved,
            warnings,
            budget: BudgetStatus::evaluate(budget_ceiling, total_cost),
            ledger,
            duration,
            timed_out,
        }
    }

    /// Served demands in assignment order.
    pub fn served(&self) -> &[ServedDemand] {
        &self.served
    }

    pub fn unserved(&self) -> &[UnservedDemand] {
        &self.unserved
    }

    pub fn warnings(&self) -> &[SolutionWarning] {
        &self.warnings
    }

    pub fn budget(&self) -> &BudgetStatus {
        &self.budget
    }

    /// Hub capacities as left by the run.
    pub fn ledger(&self) -> &HubCapacityLedger {
        &self.ledger
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn total_cost(&self) -> Cost {
        self.budget.total_cost
    }

    pub fn served_demand(&self, demand_id: DemandIdx) -> Option<&ServedDemand> {
        self.served
            .iter()
            .find(|served| served.demand_id == demand_id)
    }

    pub fn unserved_reason(&self, demand_id: DemandIdx) -> Option<&UnservedReason> {
        self.unserved
            .iter()
            .find(|unserved| unserved.demand_id == demand_id)
            .map(|unserved| &unserved.reason)
    }
}

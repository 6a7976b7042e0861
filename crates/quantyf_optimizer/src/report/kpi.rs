use std::collections::BTreeMap;

use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    problem::{
        transport_problem::TransportProblem,
        travel::{Cost, Distance},
        vehicle::VehicleType,
    },
    solver::solution::{ServedDemand, Solution},
};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RouteKpi {
    pub demand_id: String,
    pub pallets: u32,
    pub hops: usize,
    pub distance_km: Distance,
    pub total_cost: Cost,
    pub cost_per_pallet: Cost,
    /// None for routes without distance.
    pub cost_per_km: Option<Cost>,
    /// `pallets * legs / sum(vehicle_count * capacity)`, None for zero-leg routes.
    pub utilization: Option<f64>,
}

impl RouteKpi {
    pub fn compute(problem: &TransportProblem, served: &ServedDemand) -> Self {
        let demand = problem.demand(served.demand_id());
        let route = served.route();
        let cost = served.cost();
        let distance_km = route.total_distance();

        let offered_capacity: u64 = route
            .legs()
            .iter()
            .zip(cost.legs())
            .map(|(leg, leg_cost)| {
                leg_cost.vehicle_count as u64 * leg.vehicle().capacity() as u64
            })
            .sum();

        let utilization = (offered_capacity > 0).then(|| {
            demand.pallets() as f64 * route.legs().len() as f64 / offered_capacity as f64
        });

        RouteKpi {
            demand_id: demand.external_id().to_owned(),
            pallets: demand.pallets(),
            hops: route.hops(),
            distance_km,
            total_cost: cost.total(),
            cost_per_pallet: cost.total() / demand.pallets() as f64,
            cost_per_km: (distance_km > 0.0).then(|| cost.total() / distance_km),
            utilization,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HubKpi {
    pub hub_id: String,
    pub capacity: u32,
    pub used: u32,
    pub utilization: f64,
}

#[serde_as]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NetworkKpi {
    /// Distance-based cost of every served leg.
    pub transport_cost: Cost,
    pub fixed_cost: Cost,
    pub handling_cost: Cost,
    pub total_cost: Cost,

    pub served_count: usize,
    pub unserved_count: usize,
    pub unserved: Vec<String>,
    pub served_pallets: u64,
    pub cost_per_pallet: Option<Cost>,
    pub average_utilization: Option<f64>,

    pub routes: Vec<RouteKpi>,
    pub hubs: Vec<HubKpi>,

    #[serde_as(as = "BTreeMap<DisplayFromStr, _>")]
    pub vehicle_dispatches: BTreeMap<VehicleType, u64>,
}

impl NetworkKpi {
    pub fn compute(problem: &TransportProblem, solution: &Solution) -> Self {
        let routes: Vec<RouteKpi> = solution
            .served()
            .iter()
            .map(|served| RouteKpi::compute(problem, served))
            .collect();

        let mut transport_cost = 0.0;
        let mut fixed_cost = 0.0;
        let mut handling_cost = 0.0;
        let mut vehicle_dispatches = BTreeMap::new();
        for served in solution.served() {
            let cost = served.cost();
            transport_cost += cost.variable();
            fixed_cost += cost.fixed();
            handling_cost += cost.handling();

            for leg in cost.legs() {
                *vehicle_dispatches.entry(leg.vehicle_type).or_insert(0) +=
                    leg.vehicle_count as u64;
            }
        }

        let served_pallets: u64 = routes.iter().map(|route| route.pallets as u64).sum();
        let utilizations: Vec<f64> = routes.iter().filter_map(|route| route.utilization).collect();

        let hubs = solution
            .ledger()
            .iter()
            .map(|(hub_id, capacity, remaining)| {
                let used = capacity - remaining;
                HubKpi {
                    hub_id: problem
                        .node_external_id(problem.hub(hub_id).node_id())
                        .to_owned(),
                    capacity,
                    used,
                    utilization: used as f64 / capacity as f64,
                }
            })
            .collect();

        let total_cost = solution.total_cost();

        NetworkKpi {
            transport_cost,
            fixed_cost,
            handling_cost,
            total_cost,
            served_count: solution.served().len(),
            unserved_count: solution.unserved().len(),
            unserved: solution
                .unserved()
                .iter()
                .map(|unserved| problem.demand(unserved.demand_id).external_id().to_owned())
                .collect(),
            served_pallets,
            cost_per_pallet: (served_pallets > 0).then(|| total_cost / served_pallets as f64),
            average_utilization: (!utilizations.is_empty())
                .then(|| utilizations.iter().sum::<f64>() / utilizations.len() as f64),
            routes,
            hubs,
            vehicle_dispatches,
        }
    }
}

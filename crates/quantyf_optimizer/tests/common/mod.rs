#![allow(dead_code)]

use quantyf_optimizer::{
    json::types::JsonTransportProblem,
    problem::transport_problem::TransportProblem,
    solver::{
        network_optimizer::NetworkOptimizer, optimizer_params::OptimizerParams,
        solution::Solution,
    },
};
use serde_json::{Value, json};

pub fn build(value: Value) -> (TransportProblem, OptimizerParams) {
    let json: JsonTransportProblem = serde_json::from_value(value).unwrap();
    let params = json.optimizer_params();
    (json.build_problem().unwrap(), params)
}

pub fn optimize(problem: &TransportProblem, params: OptimizerParams) -> Solution {
    NetworkOptimizer::new(problem, params)
        .unwrap()
        .optimize()
        .unwrap()
}

pub fn route_of(problem: &TransportProblem, solution: &Solution, demand_id: &str) -> Option<Vec<String>> {
    solution
        .served()
        .iter()
        .find(|served| problem.demand(served.demand_id()).external_id() == demand_id)
        .map(|served| {
            served
                .route()
                .nodes()
                .iter()
                .map(|&node_id| problem.node_external_id(node_id).to_owned())
                .collect()
        })
}

pub fn truck() -> Value {
    json!({ "type": "Large", "capacity": 200, "cost_per_km": 25, "fixed_cost": 500 })
}

/// Mumbai -> Delhi, 150 pallets, direct 1400 km in 24 h or via Bangalore 840 + 350 km in 20 h.
pub fn india(params: Value) -> Value {
    json!({
        "nodes": [{ "id": "Mumbai" }, { "id": "Delhi" }, { "id": "Bangalore" }],
        "hubs": [
            { "id": "Bangalore", "throughput_capacity": 1000, "per_pallet_handling": 50, "per_touch_fixed_cost": 200 }
        ],
        "demands": [
            { "id": "MUM-DEL", "origin": "Mumbai", "destination": "Delhi", "pallets": 150 }
        ],
        "vehicles": [truck()],
        "legs": [
            { "from": "Mumbai", "to": "Delhi", "distance_km": 1400, "time_hours": 24 },
            { "from": "Mumbai", "to": "Bangalore", "distance_km": 840, "time_hours": 14 },
            { "from": "Bangalore", "to": "Delhi", "distance_km": 350, "time_hours": 6 }
        ],
        "params": params
    })
}

/// Two demands of 80 pallets A -> B without a direct leg. Hub `H` takes 100 pallets,
/// hub `H2` is a longer detour with room for everything when `with_alternative` is set.
pub fn consolidation(with_alternative: bool) -> Value {
    let mut nodes = vec![json!({ "id": "A" }), json!({ "id": "B" }), json!({ "id": "H" })];
    let mut hubs = vec![
        json!({ "id": "H", "throughput_capacity": 100, "per_pallet_handling": 1, "per_touch_fixed_cost": 10 }),
    ];
    let mut legs = vec![
        json!({ "from": "A", "to": "H", "distance_km": 100, "time_hours": 2 }),
        json!({ "from": "H", "to": "B", "distance_km": 100, "time_hours": 2 }),
    ];

    if with_alternative {
        nodes.push(json!({ "id": "H2" }));
        hubs.push(json!({ "id": "H2", "throughput_capacity": 1000, "per_pallet_handling": 1, "per_touch_fixed_cost": 10 }));
        legs.push(json!({ "from": "A", "to": "H2", "distance_km": 150, "time_hours": 3 }));
        legs.push(json!({ "from": "H2", "to": "B", "distance_km": 150, "time_hours": 3 }));
    }

    json!({
        "nodes": nodes,
        "hubs": hubs,
        "demands": [
            { "id": "FIRST", "origin": "A", "destination": "B", "pallets": 80, "priority": "High" },
            { "id": "SECOND", "origin": "A", "destination": "B", "pallets": 80, "priority": "Medium" }
        ],
        "vehicles": [truck()],
        "legs": legs
    })
}

/// A grid of `size * size` located nodes, every fourth one a hub, with demands between
/// far-apart nodes. Legs come from the haversine provider.
pub fn grid(size: usize, hub_capacity: i64) -> Value {
    let mut nodes = vec![];
    let mut hubs = vec![];
    for row in 0..size {
        for column in 0..size {
            let id = format!("N{row}-{column}");
            nodes.push(json!({
                "id": id,
                "coordinates": [72.0 + column as f64 * 0.8, 12.0 + row as f64 * 0.8]
            }));
            if (row * size + column) % 4 == 1 {
                hubs.push(json!({
                    "id": id,
                    "throughput_capacity": hub_capacity,
                    "per_pallet_handling": 2,
                    "per_touch_fixed_cost": 50,
                    "dwell_hours": 1
                }));
            }
        }
    }

    let mut demands = vec![];
    for index in 0..size * 2 {
        let origin = index % size;
        let destination = (index * 7 + 3) % size;
        let priority = ["High", "Medium", "Low"][index % 3];
        demands.push(json!({
            "id": format!("D{index:02}"),
            "origin": format!("N{origin}-0"),
            "destination": format!("N{destination}-{}", size - 1),
            "pallets": 10 + (index * 37) % 300,
            "priority": priority
        }));
    }

    json!({
        "nodes": nodes,
        "hubs": hubs,
        "demands": demands,
        "vehicles": [
            { "type": "Small", "capacity": 20, "cost_per_km": 8, "fixed_cost": 100 },
            { "type": "Medium", "capacity": 60, "cost_per_km": 14, "fixed_cost": 250 },
            { "type": "Large", "capacity": 200, "cost_per_km": 25, "fixed_cost": 500 }
        ],
        "matrix_provider": { "AsTheCrowFlies": { "speed_kmh": 55, "circuity_factor": 1.3 } },
        "params": { "max_hops": 2 }
    })
}

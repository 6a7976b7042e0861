use quantyf_matrix::travel_matrices::{LegMetrics, TravelMatrices};

use crate::{
    problem::{
        demand::{Demand, DemandBuilder, Priority},
        hub::{Hub, HubBuilder},
        node::Node,
        transport_problem::{TransportProblem, TransportProblemBuilder},
        vehicle::{VehicleCatalog, VehicleSpec, VehicleType},
    },
    routing::candidate_generator::CandidateGenerator,
};

pub const MUMBAI: usize = 0;
pub const DELHI: usize = 1;
pub const BANGALORE: usize = 2;

pub fn create_truck_catalog() -> VehicleCatalog {
    let mut catalog = VehicleCatalog::new();
    catalog.insert(VehicleType::Large, VehicleSpec::new(200, 25.0, 500.0).unwrap());
    catalog
}

pub fn create_demand(id: &str, origin: usize, destination: usize, pallets: u32) -> Demand {
    let mut builder = DemandBuilder::default();
    builder
        .set_external_id(id)
        .set_origin(origin)
        .set_destination(destination)
        .set_pallets(pallets)
        .set_priority(Priority::High);
    builder.build().unwrap()
}

pub fn create_hub(node_id: usize, capacity: u32) -> Hub {
    let mut builder = HubBuilder::default();
    builder
        .set_node_id(node_id)
        .set_throughput_capacity(capacity)
        .set_per_pallet_handling(50.0)
        .set_per_touch_fixed_cost(200.0);
    builder.build().unwrap()
}

fn india_matrices(with_hub_to_delhi: bool) -> TravelMatrices {
    let mut matrices = TravelMatrices::new(3);
    matrices
        .set_symmetric_leg(MUMBAI, DELHI, LegMetrics::new(1400.0, 24.0))
        .unwrap();
    matrices
        .set_symmetric_leg(MUMBAI, BANGALORE, LegMetrics::new(840.0, 14.0))
        .unwrap();
    if with_hub_to_delhi {
        matrices
            .set_symmetric_leg(BANGALORE, DELHI, LegMetrics::new(350.0, 6.0))
            .unwrap();
    }
    matrices
}

fn india_problem(hub_capacity: u32, with_hub_to_delhi: bool) -> TransportProblem {
    let mut builder = TransportProblemBuilder::default();
    builder
        .set_nodes(vec![
            Node::from_lat_lon("Mumbai", 19.076, 72.8777),
            Node::from_lat_lon("Delhi", 28.6139, 77.209),
            Node::from_lat_lon("Bangalore", 12.9716, 77.5946),
        ])
        .add_hub(create_hub(BANGALORE, hub_capacity))
        .add_demand(create_demand("MUM-DEL", MUMBAI, DELHI, 150))
        .set_vehicles(create_truck_catalog())
        .set_matrices(india_matrices(with_hub_to_delhi));
    builder.build().unwrap()
}

/// Mumbai -> Delhi, 150 pallets, direct 1400 km (24 h) or via the Bangalore hub 840 + 350 km (20 h).
pub fn create_india_problem(hub_capacity: u32) -> TransportProblem {
    india_problem(hub_capacity, true)
}

/// Same network without the Bangalore -> Delhi leg.
pub fn create_india_problem_without_hub_leg() -> TransportProblem {
    india_problem(1000, false)
}

/// Origin `O`, destination `D` and `num_hubs` hubs `H0..`, every pair connected by `distance_km`.
pub fn create_complete_problem(num_hubs: usize, distance_km: f64) -> TransportProblem {
    let num_nodes = num_hubs + 2;

    let mut nodes = vec![Node::new("O"), Node::new("D")];
    nodes.extend((0..num_hubs).map(|index| Node::new(format!("H{index}"))));

    let mut matrices = TravelMatrices::new(num_nodes);
    for from in 0..num_nodes {
        for to in 0..num_nodes {
            if from != to {
                matrices
                    .set_leg(from, to, LegMetrics::new(distance_km, distance_km / 50.0))
                    .unwrap();
            }
        }
    }

    let mut builder = TransportProblemBuilder::default();
    builder
        .set_nodes(nodes)
        .add_demand(create_demand("O-D", 0, 1, 10))
        .set_vehicles(create_truck_catalog())
        .set_matrices(matrices);
    for hub in 0..num_hubs {
        builder.add_hub(create_hub(hub + 2, 1000));
    }
    builder.build().unwrap()
}

pub fn create_disconnected_problem() -> TransportProblem {
    let mut builder = TransportProblemBuilder::default();
    builder
        .set_nodes(vec![Node::new("A"), Node::new("B"), Node::new("H")])
        .add_hub(create_hub(2, 100))
        .add_demand(create_demand("A-B", 0, 1, 10))
        .set_vehicles(create_truck_catalog());
    builder.build().unwrap()
}

pub fn create_degenerate_problem() -> TransportProblem {
    let mut builder = TransportProblemBuilder::default();
    builder
        .set_nodes(vec![Node::new("A"), Node::new("H")])
        .add_hub(create_hub(1, 100))
        .add_demand(create_demand("A-A", 0, 0, 10))
        .set_vehicles(create_truck_catalog());
    builder.build().unwrap()
}

/// `A` -> `B` carrying `pallets` in vehicles of `vehicle_capacity`, either over a direct leg or
/// only through the hub `H`.
pub fn create_bulk_problem(pallets: u32, vehicle_capacity: u32, direct: bool) -> TransportProblem {
    let mut matrices = TravelMatrices::new(3);
    if direct {
        matrices.set_leg(0, 1, LegMetrics::new(100.0, 2.0)).unwrap();
    } else {
        matrices.set_leg(0, 2, LegMetrics::new(100.0, 2.0)).unwrap();
        matrices.set_leg(2, 1, LegMetrics::new(100.0, 2.0)).unwrap();
    }

    let mut catalog = VehicleCatalog::new();
    catalog.insert(
        VehicleType::Small,
        VehicleSpec::new(vehicle_capacity, 1.0, 0.0).unwrap(),
    );

    let mut builder = TransportProblemBuilder::default();
    builder
        .set_nodes(vec![Node::new("A"), Node::new("B"), Node::new("H")])
        .add_hub(create_hub(2, u32::MAX))
        .add_demand(create_demand("A-B", 0, 1, pallets))
        .set_vehicles(catalog)
        .set_matrices(matrices);
    builder.build().unwrap()
}

pub fn create_generator(problem: &TransportProblem, max_hops: usize) -> CandidateGenerator<'_> {
    CandidateGenerator::new(problem, max_hops, None)
}

use smallvec::SmallVec;

use crate::{
    cost::cost_breakdown::{CostBreakdown, LegCost},
    error::InvalidInputError,
    problem::{
        demand::Demand,
        hub::Hub,
        transport_problem::TransportProblem,
        travel::{Cost, Distance},
        vehicle::{VehicleSpec, VehicleType},
    },
    routing::route::Route,
};

/// `ceil(pallets / capacity)`.
pub fn vehicle_count(pallets: u32, vehicle: &VehicleSpec) -> Result<u32, InvalidInputError> {
    if pallets == 0 {
        return Err(InvalidInputError::NonPositivePallets(pallets.into()));
    }

    Ok(pallets.div_ceil(vehicle.capacity()))
}

pub fn leg_cost(
    distance_km: Distance,
    pallets: u32,
    vehicle_type: VehicleType,
    vehicle: &VehicleSpec,
) -> Result<LegCost, InvalidInputError> {
    let distance_km = InvalidInputError::check_non_negative("distance_km", distance_km)?;
    let vehicle_count = vehicle_count(pallets, vehicle)?;

    Ok(LegCost {
        vehicle_type,
        vehicle_count,
        fixed: vehicle.fixed_cost() * vehicle_count as f64,
        variable: distance_km * vehicle.cost_per_km() * vehicle_count as f64,
    })
}

pub fn handling_cost(pallets: u32, touches: u32, hub: &Hub) -> Result<Cost, InvalidInputError> {
    if pallets == 0 {
        return Err(InvalidInputError::NonPositivePallets(pallets.into()));
    }

    Ok(touches as f64 * hub.per_touch_fixed_cost() + pallets as f64 * hub.per_pallet_handling())
}

/// Prices `route` for `demand`: every leg plus one touch at each intermediate hub.
/// Origin and destination are never touches.
pub fn total_cost(
    route: &Route,
    demand: &Demand,
    problem: &TransportProblem,
) -> Result<CostBreakdown, InvalidInputError> {
    if route.is_degenerate() {
        return Ok(CostBreakdown::ZERO);
    }

    let legs = route
        .legs()
        .iter()
        .map(|leg| {
            leg_cost(
                leg.distance_km(),
                demand.pallets(),
                leg.vehicle_type(),
                leg.vehicle(),
            )
        })
        .collect::<Result<SmallVec<[LegCost; 3]>, _>>()?;

    let mut handling = 0.0;
    for &node_id in route.intermediate_nodes() {
        if let Some(hub) = problem.hub_at(node_id) {
            handling += handling_cost(demand.pallets(), 1, hub)?;
        }
    }

    Ok(CostBreakdown::new(legs, handling))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{problem::hub::HubBuilder, test_utils};

    fn truck() -> VehicleSpec {
        VehicleSpec::new(200, 25.0, 500.0).unwrap()
    }

    #[test]
    fn test_leg_cost_single_vehicle() {
        let cost = leg_cost(1400.0, 150, VehicleType::Large, &truck()).unwrap();

        assert_eq!(cost.vehicle_count, 1);
        assert_eq!(cost.variable, 35000.0);
        assert_eq!(cost.fixed, 500.0);
        assert_eq!(cost.total(), 35500.0);
    }

    #[test]
    fn test_leg_cost_scales_with_vehicle_count() {
        let cost = leg_cost(100.0, 401, VehicleType::Large, &truck()).unwrap();

        assert_eq!(cost.vehicle_count, 3);
        assert_eq!(cost.variable, 7500.0);
        assert_eq!(cost.fixed, 1500.0);
    }

    #[test]
    fn test_leg_cost_exact_capacity() {
        assert_eq!(vehicle_count(200, &truck()).unwrap(), 1);
        assert_eq!(vehicle_count(201, &truck()).unwrap(), 2);
    }

    #[test]
    fn test_leg_cost_rejects_zero_pallets() {
        assert_eq!(
            leg_cost(10.0, 0, VehicleType::Large, &truck()).unwrap_err(),
            InvalidInputError::NonPositivePallets(0)
        );
    }

    #[test]
    fn test_leg_cost_rejects_negative_distance() {
        assert!(matches!(
            leg_cost(-5.0, 10, VehicleType::Large, &truck()),
            Err(InvalidInputError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_handling_cost() {
        let mut builder = HubBuilder::default();
        builder
            .set_node_id(0)
            .set_throughput_capacity(1000)
            .set_per_pallet_handling(50.0)
            .set_per_touch_fixed_cost(200.0);
        let hub = builder.build().unwrap();

        assert_eq!(handling_cost(150, 1, &hub).unwrap(), 7700.0);
        assert_eq!(handling_cost(150, 2, &hub).unwrap(), 7900.0);
    }

    #[test]
    fn test_total_cost_of_consolidated_route() {
        let problem = test_utils::create_india_problem(1000);
        let demand = &problem.demands()[0];
        let generator = test_utils::create_generator(&problem, 1);

        let via_hub = generator
            .candidates(demand)
            .find(|route| route.hops() == 1)
            .unwrap();
        let breakdown = total_cost(&via_hub, demand, &problem).unwrap();

        // 840 km + 350 km at 25/km, one truck per leg, 150 pallets handled at Bangalore
        assert_eq!(breakdown.variable(), 29750.0);
        assert_eq!(breakdown.fixed(), 1000.0);
        assert_eq!(breakdown.handling(), 7700.0);
        assert_eq!(breakdown.vehicle_count(), 2);
        assert_eq!(breakdown.total(), 38450.0);
    }
}

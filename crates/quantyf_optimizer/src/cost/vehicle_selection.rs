use std::cmp::Ordering;

use crate::{
    cost::{cost_breakdown::LegCost, cost_model::leg_cost},
    error::InvalidInputError,
    problem::{
        travel::Distance,
        vehicle::{VehicleCatalog, VehicleSpec, VehicleType},
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleChoice {
    pub vehicle_type: VehicleType,
    pub vehicle: VehicleSpec,
    pub cost: LegCost,
}

/// Picks the vehicle type for one leg.
///
/// The cheapest type whose vehicle count fits within `max_vehicles` wins. When no type fits,
/// the type needing the fewest vehicles is returned so the route can still be reported as
/// violating the ceiling. Ties are broken on fewer vehicles, then catalog order.
pub fn select_vehicle(
    catalog: &VehicleCatalog,
    distance_km: Distance,
    pallets: u32,
    max_vehicles: Option<u32>,
) -> Result<Option<VehicleChoice>, InvalidInputError> {
    let mut choices = Vec::with_capacity(catalog.len());
    for (vehicle_type, vehicle) in catalog.iter() {
        choices.push(VehicleChoice {
            vehicle_type,
            vehicle: *vehicle,
            cost: leg_cost(distance_km, pallets, vehicle_type, vehicle)?,
        });
    }

    let within_ceiling = |choice: &VehicleChoice| {
        max_vehicles.is_none_or(|max| choice.cost.vehicle_count <= max)
    };

    let cheapest = choices
        .iter()
        .filter(|choice| within_ceiling(choice))
        .min_by(|a, b| compare_by_cost(a, b))
        .copied();

    if cheapest.is_some() {
        return Ok(cheapest);
    }

    Ok(choices
        .iter()
        .min_by(|a, b| {
            a.cost
                .vehicle_count
                .cmp(&b.cost.vehicle_count)
                .then_with(|| compare_by_cost(a, b))
        })
        .copied())
}

fn compare_by_cost(a: &VehicleChoice, b: &VehicleChoice) -> Ordering {
    a.cost
        .total()
        .total_cmp(&b.cost.total())
        .then_with(|| a.cost.vehicle_count.cmp(&b.cost.vehicle_count))
        .then_with(|| a.vehicle_type.cmp(&b.vehicle_type))
}

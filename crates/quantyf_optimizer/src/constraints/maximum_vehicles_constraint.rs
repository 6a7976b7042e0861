use crate::constraints::violation::{Violation, ViolationKind};

use super::route_constraint::{RouteConstraint, RouteContext};

/// Caps the number of vehicles dispatched on any single leg.
#[derive(Clone, Debug)]
pub struct MaximumVehiclesConstraint {
    max_vehicles_per_leg: u32,
}

impl MaximumVehiclesConstraint {
    pub fn new(max_vehicles_per_leg: u32) -> Self {
        MaximumVehiclesConstraint {
            max_vehicles_per_leg,
        }
    }
}

impl RouteConstraint for MaximumVehiclesConstraint {
    fn check(&self, context: &RouteContext, violations: &mut Vec<Violation>) {
        let pallets = context.demand.pallets();

        for leg in context.route.legs() {
            let vehicle_count = pallets.div_ceil(leg.vehicle().capacity());
            if vehicle_count > self.max_vehicles_per_leg {
                violations.push(Violation::new(
                    ViolationKind::VehicleCount,
                    format!(
                        "Leg {} -> {} needs {} {} vehicles, at most {} allowed",
                        context.problem.node_external_id(leg.from()),
                        context.problem.node_external_id(leg.to()),
                        vehicle_count,
                        leg.vehicle_type(),
                        self.max_vehicles_per_leg
                    ),
                    (vehicle_count - self.max_vehicles_per_leg) as f64,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_one_violation_per_leg() {
        // 150 pallets in trucks of 200: one truck per leg
        let problem = test_utils::create_india_problem(1000);
        let demand = &problem.demands()[0];
        let generator = test_utils::create_generator(&problem, 1);
        let via_hub = generator
            .candidates(demand)
            .find(|route| route.hops() == 1)
            .unwrap();
        let context = RouteContext {
            problem: &problem,
            demand,
            route: &via_hub,
        };

        let mut violations = vec![];
        MaximumVehiclesConstraint::new(1).check(&context, &mut violations);
        assert!(violations.is_empty());

        let big_demand = test_utils::create_demand("BIG", 0, 1, 450);
        let context = RouteContext {
            problem: &problem,
            demand: &big_demand,
            route: &via_hub,
        };
        MaximumVehiclesConstraint::new(2).check(&context, &mut violations);

        assert_eq!(violations.len(), 2);
        assert!(
            violations
                .iter()
                .all(|violation| violation.kind == ViolationKind::VehicleCount
                    && violation.excess == 1.0)
        );
    }
}

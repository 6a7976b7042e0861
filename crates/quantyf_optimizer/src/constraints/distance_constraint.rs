use crate::constraints::violation::{Violation, ViolationKind};

use super::route_constraint::{RouteConstraint, RouteContext};

#[derive(Clone, Debug)]
pub struct DistanceConstraint {
    max_distance_km: f64,
}

impl DistanceConstraint {
    pub fn new(max_distance_km: f64) -> Self {
        DistanceConstraint { max_distance_km }
    }
}

impl RouteConstraint for DistanceConstraint {
    fn check(&self, context: &RouteContext, violations: &mut Vec<Violation>) {
        let distance = context.route.total_distance();
        if distance > self.max_distance_km {
            violations.push(Violation::new(
                ViolationKind::Distance,
                format!(
                    "Route covers {distance:.1} km, limit is {:.1} km",
                    self.max_distance_km
                ),
                distance - self.max_distance_km,
            ));
        }
    }
}

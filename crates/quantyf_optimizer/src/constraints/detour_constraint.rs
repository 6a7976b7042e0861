use crate::constraints::violation::{Violation, ViolationKind};

use super::route_constraint::{RouteConstraint, RouteContext};

/// Bounds the extra distance of a hub route relative to the direct leg.
/// Routes of demands without a direct leg are never constrained.
#[derive(Clone, Debug)]
pub struct DetourConstraint {
    max_detour_ratio: f64,
}

impl DetourConstraint {
    pub fn new(max_detour_ratio: f64) -> Self {
        DetourConstraint { max_detour_ratio }
    }
}

impl RouteConstraint for DetourConstraint {
    fn check(&self, context: &RouteContext, violations: &mut Vec<Violation>) {
        let route = context.route;
        if route.hops() == 0 {
            return;
        }

        let Some(direct) = context.problem.leg(route.origin(), route.destination()) else {
            return;
        };

        let limit = direct.distance_km * (1.0 + self.max_detour_ratio);
        let distance = route.total_distance();
        if distance > limit {
            violations.push(Violation::new(
                ViolationKind::Detour,
                format!(
                    "Route covers {distance:.1} km, more than {:.0}% over the direct {:.1} km",
                    self.max_detour_ratio * 100.0,
                    direct.distance_km
                ),
                distance - limit,
            ));
        }
    }
}

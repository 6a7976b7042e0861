use crate::{
    constraints::{
        detour_constraint::DetourConstraint,
        distance_constraint::DistanceConstraint,
        maximum_vehicles_constraint::MaximumVehiclesConstraint,
        route_constraint::{RouteConstraint, RouteConstraintType, RouteContext},
        travel_time_constraint::TravelTimeConstraint,
        violation::Violation,
    },
    problem::{demand::Demand, transport_problem::TransportProblem},
    routing::route::Route,
    solver::optimizer_params::OptimizerParams,
};

/// Checks routes against the configured limits. Never mutates anything.
#[derive(Clone, Debug)]
pub struct RouteValidator {
    constraints: Vec<RouteConstraintType>,
}

impl RouteValidator {
    pub fn new(constraints: Vec<RouteConstraintType>) -> Self {
        RouteValidator { constraints }
    }

    /// Vehicle count, travel time, distance, then detour.
    pub fn from_params(params: &OptimizerParams) -> Self {
        let mut constraints = vec![];

        if let Some(max_vehicles) = params.max_vehicles_per_leg {
            constraints.push(RouteConstraintType::MaximumVehicles(
                MaximumVehiclesConstraint::new(max_vehicles),
            ));
        }

        constraints.push(RouteConstraintType::TravelTime(TravelTimeConstraint::new(
            params.max_travel_time_hours,
        )));

        if let Some(max_distance_km) = params.max_distance_km {
            constraints.push(RouteConstraintType::Distance(DistanceConstraint::new(
                max_distance_km,
            )));
        }

        if let Some(max_detour_ratio) = params.max_detour_ratio {
            constraints.push(RouteConstraintType::Detour(DetourConstraint::new(
                max_detour_ratio,
            )));
        }

        Self::new(constraints)
    }

    pub fn constraints(&self) -> &[RouteConstraintType] {
        &self.constraints
    }

    /// Ordered violations of `route`, empty when it is locally feasible.
    pub fn validate(
        &self,
        problem: &TransportProblem,
        demand: &Demand,
        route: &Route,
    ) -> Vec<Violation> {
        let context = RouteContext {
            problem,
            demand,
            route,
        };

        let mut violations = vec![];
        for constraint in &self.constraints {
            constraint.check(&context, &mut violations);
        }
        violations
    }
}

use crate::{
    constraints::violation::Violation,
    problem::{demand::Demand, transport_problem::TransportProblem},
    routing::route::Route,
};

use super::{
    detour_constraint::DetourConstraint, distance_constraint::DistanceConstraint,
    maximum_vehicles_constraint::MaximumVehiclesConstraint,
    travel_time_constraint::TravelTimeConstraint,
};

/// Route and demand under evaluation.
pub struct RouteContext<'a> {
    pub problem: &'a TransportProblem,
    pub demand: &'a Demand,
    pub route: &'a Route,
}

pub trait RouteConstraint {
    /// Appends the violations of `context.route` to `violations`, in evaluation order.
    fn check(&self, context: &RouteContext, violations: &mut Vec<Violation>);
}

#[derive(Clone, Debug)]
pub enum RouteConstraintType {
    MaximumVehicles(MaximumVehiclesConstraint),
    TravelTime(TravelTimeConstraint),
    Distance(DistanceConstraint),
    Detour(DetourConstraint),
}

impl RouteConstraintType {
    pub fn constraint_name(&self) -> &'static str {
        match self {
            RouteConstraintType::MaximumVehicles(_) => "maximum_vehicles",
            RouteConstraintType::TravelTime(_) => "travel_time",
            RouteConstraintType::Distance(_) => "distance",
            RouteConstraintType::Detour(_) => "detour",
        }
    }
}

impl RouteConstraint for RouteConstraintType {
    fn check(&self, context: &RouteContext, violations: &mut Vec<Violation>) {
        match self {
            RouteConstraintType::MaximumVehicles(c) => c.check(context, violations),
            RouteConstraintType::TravelTime(c) => c.check(context, violations),
            RouteConstraintType::Distance(c) => c.check(context, violations),
            RouteConstraintType::Detour(c) => c.check(context, violations),
        }
    }
}

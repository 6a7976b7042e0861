pub mod detour_constraint;
pub mod distance_constraint;
pub mod maximum_vehicles_constraint;
pub mod route_constraint;
pub mod route_validator;
pub mod travel_time_constraint;
pub mod violation;

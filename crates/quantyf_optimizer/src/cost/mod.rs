pub mod cost_breakdown;
pub mod cost_model;
pub mod vehicle_selection;

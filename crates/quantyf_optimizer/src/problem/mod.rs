pub mod demand;
pub mod hub;
pub mod node;
pub mod transport_problem;
pub mod travel;
pub mod vehicle;

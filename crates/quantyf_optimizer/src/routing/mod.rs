pub mod candidate_generator;
pub mod leg;
pub mod route;

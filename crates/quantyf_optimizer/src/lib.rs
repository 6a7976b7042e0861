pub mod constraints;
pub mod cost;
pub mod error;
pub mod json;
pub mod problem;
pub mod report;
pub mod routing;
pub mod solver;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

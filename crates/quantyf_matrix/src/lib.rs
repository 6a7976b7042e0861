pub mod error;
pub mod travel_matrices;
pub mod travel_matrix_provider;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Leg {from} -> {to} is out of bounds for a matrix of {num_locations} locations")]
    OutOfBounds {
        from: usize,
        to: usize,
        num_locations: usize,
    },

    #[error("Leg {from} -> {to} has a negative or non-finite {field}: {value}")]
    InvalidValue {
        from: usize,
        to: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Speed must be strictly positive, got {0} km/h")]
    InvalidSpeed(f64),

    #[error("Circuity factor must be at least 1.0, got {0}")]
    InvalidCircuityFactor(f64),
}

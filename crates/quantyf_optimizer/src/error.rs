use quantyf_matrix::error::MatrixError;
use serde::Serialize;
use thiserror::Error;

/// A malformed input record. The record is skipped and reported, the run goes on.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum InvalidInputError {
    #[error("Pallet count must be strictly positive, got {0}")]
    NonPositivePallets(i64),

    #[error("Capacity must be strictly positive, got {0}")]
    NonPositiveCapacity(i64),

    #[error("{field} is out of range, got {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("{field} must be a finite non-negative number, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("Unknown node '{0}'")]
    UnknownNode(String),

    #[error("Duplicate id '{0}'")]
    DuplicateId(String),

    #[error("Time window must be strictly positive, got {0} hours")]
    InvalidTimeWindow(f64),

    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

impl InvalidInputError {
    pub fn check_non_negative(field: &'static str, value: f64) -> Result<f64, InvalidInputError> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(InvalidInputError::NegativeValue { field, value })
        }
    }

    /// Converts a signed input count, e.g. pallets or a capacity, to a strictly positive `u32`.
    pub fn check_positive_count(field: &'static str, value: i64) -> Result<u32, InvalidInputError> {
        if value <= 0 {
            return Err(match field {
                "pallets" => InvalidInputError::NonPositivePallets(value),
                _ => InvalidInputError::NonPositiveCapacity(value),
            });
        }

        u32::try_from(value).map_err(|_| InvalidInputError::OutOfRange { field, value })
    }
}

/// Global configuration errors. They abort the run before any assignment.
#[derive(Error, Debug)]
pub enum ProblemError {
    #[error("The vehicle catalog is empty")]
    EmptyVehicleCatalog,

    #[error("No usable demand in the input ({rejected} rejected)")]
    NoUsableDemands { rejected: usize },

    #[error("Travel matrix covers {actual} locations but the network has {expected} nodes")]
    MatrixSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid leg '{from}' -> '{to}': {source}")]
    InvalidLeg {
        from: String,
        to: String,
        #[source]
        source: MatrixError,
    },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Invalid optimizer parameter: {0}")]
    InvalidParams(String),

    #[error("Decider returned {actual} decisions for {expected} demands")]
    DecisionCountMismatch { expected: usize, actual: usize },

    #[error("Decider chose candidate {candidate} for demand '{demand_id}' which only has {available}")]
    InvalidDecision {
        demand_id: String,
        candidate: usize,
        available: usize,
    },

    /// Failure reported by an [`AssignmentDecider`](crate::solver::decider::AssignmentDecider)
    /// plug-in, e.g. an external solver that found no assignment.
    #[error("Decider failed: {0}")]
    Decider(String),

    #[error("Failed to build the thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

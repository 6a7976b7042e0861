use crate::{error::OptimizerError, solver::termination::Termination};

#[derive(Clone, Debug)]
pub struct OptimizerParams {
    /// Maximum number of intermediate hubs on a route.
    pub max_hops: usize,
    pub max_vehicles_per_leg: Option<u32>,
    pub max_travel_time_hours: Option<f64>,
    pub max_distance_km: Option<f64>,
    /// Allowed extra distance over the direct leg, `0.5` accepts routes up to 1.5x the direct distance.
    pub max_detour_ratio: Option<f64>,
    pub budget_ceiling: Option<f64>,
    pub threads: Threads,
    pub terminations: Vec<Termination>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            max_hops: 1,
            max_vehicles_per_leg: None,
            max_travel_time_hours: None,
            max_distance_km: None,
            max_detour_ratio: None,
            budget_ceiling: None,
            threads: Threads::Auto,
            terminations: vec![],
        }
    }
}

fn check_limit(name: &str, value: Option<f64>) -> Result<(), OptimizerError> {
    match value {
        Some(value) if !value.is_finite() || value < 0.0 => Err(OptimizerError::InvalidParams(
            format!("{name} must be a finite non-negative number, got {value}"),
        )),
        _ => Ok(()),
    }
}

impl OptimizerParams {
    pub fn validate(&self) -> Result<(), OptimizerError> {
        if self.max_vehicles_per_leg == Some(0) {
            return Err(OptimizerError::InvalidParams(
                "max_vehicles_per_leg must be at least 1".to_owned(),
            ));
        }

        if self.threads == Threads::Multi(0) {
            return Err(OptimizerError::InvalidParams(
                "threads must be at least 1".to_owned(),
            ));
        }

        check_limit("max_travel_time_hours", self.max_travel_time_hours)?;
        check_limit("max_distance_km", self.max_distance_km)?;
        check_limit("max_detour_ratio", self.max_detour_ratio)?;
        check_limit("budget_ceiling", self.budget_ceiling)?;

        Ok(())
    }
}

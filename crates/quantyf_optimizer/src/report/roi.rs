use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::InvalidInputError, problem::travel::Cost};

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq)]
pub struct RoiInput {
    pub baseline_monthly_cost: Cost,
    pub optimized_monthly_cost: Cost,
    pub implementation_cost: Cost,
    pub horizon_months: u32,
}

/// Savings of the optimized network over a baseline.
///
/// `payback_months` is `+inf` when there are no savings. `roi_percent` is `+inf` when the
/// implementation is free and saves money, `0` when it is free and saves nothing.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RoiReport {
    pub monthly_savings: Cost,
    pub annual_savings: Cost,
    pub payback_months: f64,
    pub roi_percent: f64,
}

impl RoiInput {
    pub fn compute(&self) -> Result<RoiReport, InvalidInputError> {
        let baseline =
            InvalidInputError::check_non_negative("baseline_monthly_cost", self.baseline_monthly_cost)?;
        let optimized = InvalidInputError::check_non_negative(
            "optimized_monthly_cost",
            self.optimized_monthly_cost,
        )?;
        let implementation =
            InvalidInputError::check_non_negative("implementation_cost", self.implementation_cost)?;

        let monthly_savings = baseline - optimized;

        let payback_months = if monthly_savings <= 0.0 {
            f64::INFINITY
        } else {
            implementation / monthly_savings
        };

        let horizon_savings = monthly_savings * self.horizon_months as f64;
        let roi_percent = if implementation > 0.0 {
            (horizon_savings - implementation) / implementation * 100.0
        } else if monthly_savings > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        Ok(RoiReport {
            monthly_savings,
            annual_savings: monthly_savings * MONTHS_PER_YEAR,
            payback_months,
            roi_percent,
        })
    }
}

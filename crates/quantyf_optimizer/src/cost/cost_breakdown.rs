use serde::Serialize;
use smallvec::SmallVec;

use crate::problem::{travel::Cost, vehicle::VehicleType};

/// Cost of moving a pallet volume over one leg.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LegCost {
    pub vehicle_type: VehicleType,
    pub vehicle_count: u32,
    pub fixed: Cost,
    pub variable: Cost,
}

impl LegCost {
    pub fn total(&self) -> Cost {
        self.fixed + self.variable
    }
}

/// Priced route. `total == fixed + variable + handling` holds by construction.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    legs: SmallVec<[LegCost; 3]>,
    fixed: Cost,
    variable: Cost,
    handling: Cost,
    vehicle_count: u64,
    total: Cost,
}

impl CostBreakdown {
    pub const ZERO: CostBreakdown = CostBreakdown {
        legs: SmallVec::new_const(),
        fixed: 0.0,
        variable: 0.0,
        handling: 0.0,
        vehicle_count: 0,
        total: 0.0,
    };

    pub fn new(legs: SmallVec<[LegCost; 3]>, handling: Cost) -> Self {
        let fixed: Cost = legs.iter().map(|leg| leg.fixed).sum();
        let variable: Cost = legs.iter().map(|leg| leg.variable).sum();
        let vehicle_count = legs.iter().map(|leg| leg.vehicle_count as u64).sum();

        CostBreakdown {
            legs,
            fixed,
            variable,
            handling,
            vehicle_count,
            total: fixed + variable + handling,
        }
    }

    pub fn legs(&self) -> &[LegCost] {
        &self.legs
    }

    pub fn fixed(&self) -> Cost {
        self.fixed
    }

    pub fn variable(&self) -> Cost {
        self.variable
    }

    pub fn handling(&self) -> Cost {
        self.handling
    }

    /// Vehicles dispatched over all legs of the route.
    pub fn vehicle_count(&self) -> u64 {
        self.vehicle_count
    }

    pub fn total(&self) -> Cost {
        self.total
    }
}

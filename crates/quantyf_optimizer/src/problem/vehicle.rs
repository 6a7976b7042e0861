use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::InvalidInputError, problem::travel::Cost};

#[derive(
    Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum VehicleType {
    Small,
    Medium,
    Large,
    Container,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Small,
        VehicleType::Medium,
        VehicleType::Large,
        VehicleType::Container,
    ];

    const fn slot(&self) -> usize {
        match self {
            VehicleType::Small => 0,
            VehicleType::Medium => 1,
            VehicleType::Large => 2,
            VehicleType::Container => 3,
        }
    }
}

impl Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleType::Small => write!(f, "Small"),
            VehicleType::Medium => write!(f, "Medium"),
            VehicleType::Large => write!(f, "Large"),
            VehicleType::Container => write!(f, "Container"),
        }
    }
}

impl std::str::FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Small" => Ok(VehicleType::Small),
            "Medium" => Ok(VehicleType::Medium),
            "Large" => Ok(VehicleType::Large),
            "Container" => Ok(VehicleType::Container),
            _ => Err(format!("Unknown vehicle type '{s}'")),
        }
    }
}

/// Attributes of one vehicle type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSpec {
    capacity: u32,
    cost_per_km: Cost,
    fixed_cost: Cost,
}

impl VehicleSpec {
    pub fn new(capacity: u32, cost_per_km: Cost, fixed_cost: Cost) -> Result<Self, InvalidInputError> {
        if capacity == 0 {
            return Err(InvalidInputError::NonPositiveCapacity(capacity.into()));
        }

        Ok(VehicleSpec {
            capacity,
            cost_per_km: InvalidInputError::check_non_negative("cost_per_km", cost_per_km)?,
            fixed_cost: InvalidInputError::check_non_negative("fixed_cost", fixed_cost)?,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn cost_per_km(&self) -> Cost {
        self.cost_per_km
    }

    pub fn fixed_cost(&self) -> Cost {
        self.fixed_cost
    }
}

/// Attribute table of the configured vehicle types, indexed by [`VehicleType`].
#[derive(Debug, Clone, Default)]
pub struct VehicleCatalog {
    specs: [Option<VehicleSpec>; 4],
}

impl VehicleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `spec` for `vehicle_type`, returns the previous spec if any.
    pub fn insert(&mut self, vehicle_type: VehicleType, spec: VehicleSpec) -> Option<VehicleSpec> {
        self.specs[vehicle_type.slot()].replace(spec)
    }

    pub fn get(&self, vehicle_type: VehicleType) -> Option<&VehicleSpec> {
        self.specs[vehicle_type.slot()].as_ref()
    }

    /// Configured types in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleType, &VehicleSpec)> {
        VehicleType::ALL
            .iter()
            .filter_map(|&vehicle_type| self.get(vehicle_type).map(|spec| (vehicle_type, spec)))
    }

    pub fn is_empty(&self) -> bool {
        self.specs.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.specs.iter().filter(|spec| spec.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_iterates_in_catalog_order() {
        let mut catalog = VehicleCatalog::new();
        catalog.insert(VehicleType::Container, VehicleSpec::new(40, 30.0, 900.0).unwrap());
        catalog.insert(VehicleType::Small, VehicleSpec::new(6, 8.0, 100.0).unwrap());

        let types: Vec<VehicleType> = catalog.iter().map(|(t, _)| t).collect();

        assert_eq!(types, vec![VehicleType::Small, VehicleType::Container]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get(VehicleType::Medium).is_none());
    }

    #[test]
    fn test_zero_capacity_spec_is_invalid() {
        assert_eq!(
            VehicleSpec::new(0, 1.0, 1.0).unwrap_err(),
            InvalidInputError::NonPositiveCapacity(0)
        );
    }

    #[test]
    fn test_vehicle_type_round_trips_through_display() {
        for vehicle_type in VehicleType::ALL {
            assert_eq!(
                vehicle_type.to_string().parse::<VehicleType>(),
                Ok(vehicle_type)
            );
        }
    }
}

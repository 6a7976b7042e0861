use crate::{
    define_index_newtype,
    error::InvalidInputError,
    problem::{node::NodeIdx, travel::Cost},
};

define_index_newtype!(HubIdx, Hub);

/// A sort center. The remaining capacity of a run is tracked by the
/// [`HubCapacityLedger`](crate::solver::capacity_ledger::HubCapacityLedger), not here.
#[derive(Debug, Clone)]
pub struct Hub {
    node_id: NodeIdx,
    throughput_capacity: u32,
    per_pallet_handling: Cost,
    per_touch_fixed_cost: Cost,
    dwell_hours: f64,
}

impl Hub {
    pub fn node_id(&self) -> NodeIdx {
        self.node_id
    }

    pub fn throughput_capacity(&self) -> u32 {
        self.throughput_capacity
    }

    pub fn per_pallet_handling(&self) -> Cost {
        self.per_pallet_handling
    }

    pub fn per_touch_fixed_cost(&self) -> Cost {
        self.per_touch_fixed_cost
    }

    pub fn dwell_hours(&self) -> f64 {
        self.dwell_hours
    }
}

#[derive(Default)]
pub struct HubBuilder {
    node_id: Option<NodeIdx>,
    throughput_capacity: Option<u32>,
    per_pallet_handling: Option<Cost>,
    per_touch_fixed_cost: Option<Cost>,
    dwell_hours: Option<f64>,
}

impl HubBuilder {
    pub fn set_node_id(&mut self, node_id: impl Into<NodeIdx>) -> &mut HubBuilder {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn set_throughput_capacity(&mut self, capacity: u32) -> &mut HubBuilder {
        self.throughput_capacity = Some(capacity);
        self
    }

    pub fn set_per_pallet_handling(&mut self, cost: Cost) -> &mut HubBuilder {
        self.per_pallet_handling = Some(cost);
        self
    }

    pub fn set_per_touch_fixed_cost(&mut self, cost: Cost) -> &mut HubBuilder {
        self.per_touch_fixed_cost = Some(cost);
        self
    }

    pub fn set_dwell_hours(&mut self, hours: f64) -> &mut HubBuilder {
        self.dwell_hours = Some(hours);
        self
    }

    pub fn build(self) -> Result<Hub, InvalidInputError> {
        let throughput_capacity = self
            .throughput_capacity
            .ok_or(InvalidInputError::MissingField("throughput_capacity"))?;
        if throughput_capacity == 0 {
            return Err(InvalidInputError::NonPositiveCapacity(0));
        }

        Ok(Hub {
            node_id: self.node_id.ok_or(InvalidInputError::MissingField("id"))?,
            throughput_capacity,
            per_pallet_handling: InvalidInputError::check_non_negative(
                "per_pallet_handling",
                self.per_pallet_handling.unwrap_or(0.0),
            )?,
            per_touch_fixed_cost: InvalidInputError::check_non_negative(
                "per_touch_fixed_cost",
                self.per_touch_fixed_cost.unwrap_or(0.0),
            )?,
            dwell_hours: InvalidInputError::check_non_negative(
                "dwell_hours",
                self.dwell_hours.unwrap_or(0.0),
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_hub_defaults() {
        let mut builder = HubBuilder::default();
        builder.set_node_id(3).set_throughput_capacity(500);
        let hub = builder.build().unwrap();

        assert_eq!(hub.node_id(), NodeIdx::new(3));
        assert_eq!(hub.per_pallet_handling(), 0.0);
        assert_eq!(hub.dwell_hours(), 0.0);
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        let mut builder = HubBuilder::default();
        builder.set_node_id(3).set_throughput_capacity(0);

        assert_eq!(
            builder.build().unwrap_err(),
            InvalidInputError::NonPositiveCapacity(0)
        );
    }

    #[test]
    fn test_negative_handling_is_invalid() {
        let mut builder = HubBuilder::default();
        builder
            .set_node_id(3)
            .set_throughput_capacity(10)
            .set_per_pallet_handling(-1.0);

        assert!(matches!(
            builder.build(),
            Err(InvalidInputError::NegativeValue {
                field: "per_pallet_handling",
                ..
            })
        ));
    }
}

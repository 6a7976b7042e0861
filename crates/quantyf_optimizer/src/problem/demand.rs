use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{define_index_newtype, error::InvalidInputError, problem::node::NodeIdx};

define_index_newtype!(DemandIdx, Demand);

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Assignment rank, lower is served first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// A required shipment of pallets between two nodes.
#[derive(Debug, Clone)]
pub struct Demand {
    external_id: String,
    origin: NodeIdx,
    destination: NodeIdx,
    pallets: u32,
    priority: Priority,
    time_window_hours: Option<f64>,
}

impl Demand {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn origin(&self) -> NodeIdx {
        self.origin
    }

    pub fn destination(&self) -> NodeIdx {
        self.destination
    }

    pub fn pallets(&self) -> u32 {
        self.pallets
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn time_window_hours(&self) -> Option<f64> {
        self.time_window_hours
    }

    pub fn is_degenerate(&self) -> bool {
        self.origin == self.destination
    }
}

#[derive(Default)]
pub struct DemandBuilder {
    external_id: Option<String>,
    origin: Option<NodeIdx>,
    destination: Option<NodeIdx>,
    pallets: Option<u32>,
    priority: Option<Priority>,
    time_window_hours: Option<f64>,
}

impl DemandBuilder {
    pub fn set_external_id(&mut self, external_id: impl Into<String>) -> &mut DemandBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_origin(&mut self, origin: impl Into<NodeIdx>) -> &mut DemandBuilder {
        self.origin = Some(origin.into());
        self
    }

    pub fn set_destination(&mut self, destination: impl Into<NodeIdx>) -> &mut DemandBuilder {
        self.destination = Some(destination.into());
        self
    }

    pub fn set_pallets(&mut self, pallets: u32) -> &mut DemandBuilder {
        self.pallets = Some(pallets);
        self
    }

    pub fn set_priority(&mut self, priority: Priority) -> &mut DemandBuilder {
        self.priority = Some(priority);
        self
    }

    pub fn set_time_window_hours(&mut self, hours: f64) -> &mut DemandBuilder {
        self.time_window_hours = Some(hours);
        self
    }

    pub fn build(self) -> Result<Demand, InvalidInputError> {
        let pallets = self
            .pallets
            .ok_or(InvalidInputError::MissingField("pallets"))?;
        if pallets == 0 {
            return Err(InvalidInputError::NonPositivePallets(pallets.into()));
        }

        if let Some(hours) = self.time_window_hours
            && (!hours.is_finite() || hours <= 0.0)
        {
            return Err(InvalidInputError::InvalidTimeWindow(hours));
        }

        Ok(Demand {
            external_id: self.external_id.ok_or(InvalidInputError::MissingField("id"))?,
            origin: self.origin.ok_or(InvalidInputError::MissingField("origin"))?,
            destination: self
                .destination
                .ok_or(InvalidInputError::MissingField("destination"))?,
            pallets,
            priority: self.priority.unwrap_or(Priority::Medium),
            time_window_hours: self.time_window_hours,
        })
    }
}

use crate::problem::{
    node::NodeIdx,
    travel::{Distance, Hours},
    vehicle::{VehicleSpec, VehicleType},
};

/// One direct segment of a route, with the vehicle type resolved for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    from: NodeIdx,
    to: NodeIdx,
    distance_km: Distance,
    time_hours: Hours,
    vehicle_type: VehicleType,
    vehicle: VehicleSpec,
}

impl Leg {
    pub fn new(
        from: NodeIdx,
        to: NodeIdx,
        distance_km: Distance,
        time_hours: Hours,
        vehicle_type: VehicleType,
        vehicle: VehicleSpec,
    ) -> Self {
        Leg {
            from,
            to,
            distance_km,
            time_hours,
            vehicle_type,
            vehicle,
        }
    }

    pub fn from(&self) -> NodeIdx {
        self.from
    }

    pub fn to(&self) -> NodeIdx {
        self.to
    }

    pub fn distance_km(&self) -> Distance {
        self.distance_km
    }

    pub fn time_hours(&self) -> Hours {
        self.time_hours
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    pub fn vehicle(&self) -> &VehicleSpec {
        &self.vehicle
    }
}

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    VehicleCount,
    TimeWindow,
    MaxTravelTime,
    Distance,
    Detour,
}

/// One limit a route breaks. `excess` is expressed in the unit of the limit
/// (vehicles, hours or kilometers).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub detail: String,
    pub excess: f64,
}

impl Violation {
    pub fn new(kind: ViolationKind, detail: impl Into<String>, excess: f64) -> Self {
        Violation {
            kind,
            detail: detail.into(),
            excess,
        }
    }
}

use crate::constraints::violation::{Violation, ViolationKind};

use super::route_constraint::{RouteConstraint, RouteContext};

/// Travel time plus hub dwell time against the demand time window and the global limit.
/// Each exceeded limit is a separate violation.
#[derive(Clone, Debug, Default)]
pub struct TravelTimeConstraint {
    max_travel_time_hours: Option<f64>,
}

impl TravelTimeConstraint {
    pub fn new(max_travel_time_hours: Option<f64>) -> Self {
        TravelTimeConstraint {
            max_travel_time_hours,
        }
    }
}

impl RouteConstraint for TravelTimeConstraint {
    fn check(&self, context: &RouteContext, violations: &mut Vec<Violation>) {
        let total_time = context.route.total_time(context.problem);

        if let Some(window) = context.demand.time_window_hours()
            && total_time > window
        {
            violations.push(Violation::new(
                ViolationKind::TimeWindow,
                format!("Route takes {total_time:.2} h, time window is {window:.2} h"),
                total_time - window,
            ));
        }

        if let Some(max_hours) = self.max_travel_time_hours
            && total_time > max_hours
        {
            violations.push(Violation::new(
                ViolationKind::MaxTravelTime,
                format!("Route takes {total_time:.2} h, limit is {max_hours:.2} h"),
                total_time - max_hours,
            ));
        }
    }
}

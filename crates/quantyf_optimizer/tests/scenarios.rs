mod common;

use quantyf_optimizer::{
    constraints::violation::ViolationKind,
    solver::solution::{SolutionWarning, UnservedReason},
};
use serde_json::json;

#[test]
fn direct_route_cost() {
    let (problem, params) = common::build(common::india(json!({ "max_hops": 0 })));
    let solution = common::optimize(&problem, params);

    let served = &solution.served()[0];
    let cost = served.cost();
    assert_eq!(cost.vehicle_count(), 1);
    assert_eq!(cost.variable(), 35000.0);
    assert_eq!(cost.fixed(), 500.0);
    assert_eq!(cost.handling(), 0.0);
    assert_eq!(cost.total(), 35500.0);
}

#[test]
fn cheaper_of_direct_and_consolidated_route_wins() {
    let (problem, params) = common::build(common::india(json!({})));
    let solution = common::optimize(&problem, params);

    // Direct 35500 against 29750 + 1000 + 7700 = 38450 via Bangalore
    assert_eq!(
        common::route_of(&problem, &solution, "MUM-DEL"),
        Some(vec!["Mumbai".to_owned(), "Delhi".to_owned()])
    );
    assert_eq!(solution.total_cost(), 35500.0);
}

#[test]
fn consolidated_route_wins_when_cheaper() {
    let mut input = common::india(json!({}));
    input["legs"][0]["distance_km"] = json!(1700);
    let (problem, params) = common::build(input);
    let solution = common::optimize(&problem, params);

    assert_eq!(
        common::route_of(&problem, &solution, "MUM-DEL"),
        Some(vec![
            "Mumbai".to_owned(),
            "Bangalore".to_owned(),
            "Delhi".to_owned()
        ])
    );
    assert_eq!(solution.total_cost(), 38450.0);
}

#[test]
fn hub_capacity_reroutes_second_demand() {
    let (problem, params) = common::build(common::consolidation(true));
    let solution = common::optimize(&problem, params);

    assert_eq!(
        common::route_of(&problem, &solution, "FIRST"),
        Some(vec!["A".to_owned(), "H".to_owned(), "B".to_owned()])
    );
    assert_eq!(
        common::route_of(&problem, &solution, "SECOND"),
        Some(vec!["A".to_owned(), "H2".to_owned(), "B".to_owned()])
    );
    assert!(solution.unserved().is_empty());
}

#[test]
fn hub_capacity_exhausted() {
    let (problem, params) = common::build(common::consolidation(false));
    let solution = common::optimize(&problem, params);

    assert_eq!(solution.served().len(), 1);
    assert_eq!(solution.unserved().len(), 1);
    assert_eq!(
        problem.demand(solution.unserved()[0].demand_id).external_id(),
        "SECOND"
    );
    assert_eq!(
        solution.unserved()[0].reason,
        UnservedReason::AllRoutesHubCapacityExhausted {
            hubs: vec!["H".to_owned()]
        }
    );
}

#[test]
fn max_travel_time_excludes_slow_route() {
    let (problem, params) = common::build(common::india(json!({ "max_travel_time_hours": 20 })));
    let solution = common::optimize(&problem, params);

    assert_eq!(
        common::route_of(&problem, &solution, "MUM-DEL"),
        Some(vec![
            "Mumbai".to_owned(),
            "Bangalore".to_owned(),
            "Delhi".to_owned()
        ])
    );
}

#[test]
fn max_travel_time_leaves_demand_unserved() {
    let (problem, params) = common::build(common::india(json!({ "max_travel_time_hours": 12 })));
    let solution = common::optimize(&problem, params);

    let UnservedReason::AllRoutesExceedConstraints { violations } = &solution.unserved()[0].reason
    else {
        panic!("Unexpected reason {:?}", solution.unserved()[0].reason);
    };
    assert!(
        violations
            .iter()
            .all(|violation| violation.kind == ViolationKind::MaxTravelTime)
    );
    assert_eq!(violations[0].excess, 12.0);
}

#[test]
fn time_window_and_dwell_time() {
    let mut input = common::india(json!({}));
    input["legs"][0]["distance_km"] = json!(1700);
    input["hubs"][0]["dwell_hours"] = json!(5);
    input["demands"][0]["time_window_hours"] = json!(24);
    let (problem, params) = common::build(input);
    let solution = common::optimize(&problem, params);

    // The cheaper hub route takes 20 h of driving plus 5 h at Bangalore
    assert_eq!(
        common::route_of(&problem, &solution, "MUM-DEL"),
        Some(vec!["Mumbai".to_owned(), "Delhi".to_owned()])
    );
}

#[test]
fn degenerate_demand() {
    let mut input = common::india(json!({}));
    input["demands"] = json!([
        { "id": "STAY", "origin": "Mumbai", "destination": "Mumbai", "pallets": 10 }
    ]);
    let (problem, params) = common::build(input);
    let solution = common::optimize(&problem, params);

    let served = &solution.served()[0];
    assert!(served.route().legs().is_empty());
    assert_eq!(served.cost().total(), 0.0);
    assert_eq!(
        solution.warnings(),
        &[SolutionWarning::DegenerateRoute {
            demand_id: "STAY".to_owned()
        }]
    );
}

#[test]
fn budget_overrun_is_flagged_not_reverted() {
    let (problem, params) = common::build(common::india(json!({ "budget_ceiling": 35000 })));
    let solution = common::optimize(&problem, params);

    assert_eq!(solution.served().len(), 1);
    assert!(solution.budget().exceeded);
    assert_eq!(solution.budget().overage, 500.0);
}

#[test]
fn vehicle_ceiling_picks_larger_vehicles() {
    let mut input = common::india(json!({ "max_hops": 0, "max_vehicles_per_leg": 2 }));
    input["vehicles"] = json!([
        { "type": "Small", "capacity": 50, "cost_per_km": 5, "fixed_cost": 100 },
        common::truck()
    ]);
    let (problem, params) = common::build(input);
    let solution = common::optimize(&problem, params);

    // 3 small vans would be cheaper but exceed the ceiling
    let cost = solution.served()[0].cost();
    assert_eq!(cost.vehicle_count(), 1);
    assert_eq!(cost.total(), 35500.0);
}

#[test]
fn no_route_exists() {
    let mut input = common::india(json!({}));
    input["legs"] = json!([]);
    let (problem, params) = common::build(input);
    let solution = common::optimize(&problem, params);

    assert_eq!(solution.unserved()[0].reason, UnservedReason::NoRouteExists);
}

//! Behavioural tests for planning itineraries.

mod support;

use nightstop_core::{
    CandidateKind, DayPlan, LodgingRecord, PlanError, PlanningConfig, RoutePath, plan_itinerary,
};
use nightstop_core::test_support::{hotel_at, straight_route};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use support::stop_names;

type Outcome = Option<Result<Vec<DayPlan>, PlanError>>;

#[fixture]
fn route() -> RefCell<Option<RoutePath>> {
    RefCell::new(None)
}

#[fixture]
fn lodgings() -> RefCell<Vec<LodgingRecord>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn outcome() -> RefCell<Outcome> {
    RefCell::new(None)
}

fn plan_with(
    route: &RefCell<Option<RoutePath>>,
    lodgings: &RefCell<Vec<LodgingRecord>>,
    outcome: &RefCell<Outcome>,
    config: &PlanningConfig,
) {
    let borrowed = route.borrow();
    let path = borrowed.as_ref().expect("route prepared");
    let result = plan_itinerary(path, &lodgings.borrow(), config);
    *outcome.borrow_mut() = Some(result);
}

#[given("a straight 100 km route")]
fn given_straight_route(#[from(route)] route: &RefCell<Option<RoutePath>>) {
    *route.borrow_mut() = Some(straight_route(100_000.0, 11).expect("valid route"));
}

#[given("a hotel on the route at 50 km")]
fn given_hotel_on_route(#[from(lodgings)] lodgings: &RefCell<Vec<LodgingRecord>>) {
    lodgings.borrow_mut().push(hotel_at("Hotel", 50_000.0, 0.0));
}

#[given("a hotel 10 km off the route at 50 km")]
fn given_remote_hotel(#[from(lodgings)] lodgings: &RefCell<Vec<LodgingRecord>>) {
    lodgings
        .borrow_mut()
        .push(hotel_at("Remote Lodge", 50_000.0, 10_000.0));
}

#[when("I plan with the default configuration")]
fn when_plan_default(
    #[from(route)] route: &RefCell<Option<RoutePath>>,
    #[from(lodgings)] lodgings: &RefCell<Vec<LodgingRecord>>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    plan_with(route, lodgings, outcome, &PlanningConfig::default());
}

#[when("I plan with a negative daily distance")]
fn when_plan_negative_target(
    #[from(route)] route: &RefCell<Option<RoutePath>>,
    #[from(lodgings)] lodgings: &RefCell<Vec<LodgingRecord>>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    let config = PlanningConfig::default().with_target_daily_distance_m(-5.0);
    plan_with(route, lodgings, outcome, &config);
}

#[when("I plan with the segment cap enabled")]
fn when_plan_capped(
    #[from(route)] route: &RefCell<Option<RoutePath>>,
    #[from(lodgings)] lodgings: &RefCell<Vec<LodgingRecord>>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    let config = PlanningConfig::default().with_segment_cap(true);
    plan_with(route, lodgings, outcome, &config);
}

#[then("the plan stops at the hotel and then the destination")]
fn then_hotel_then_destination(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let borrowed = outcome.borrow();
    let days = borrowed
        .as_ref()
        .expect("planning ran")
        .as_ref()
        .expect("plan succeeded");
    assert_eq!(stop_names(days), ["Hotel", "Destination"]);
}

#[then("the plan is a single day ending at the destination")]
fn then_single_day(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let borrowed = outcome.borrow();
    let days = borrowed
        .as_ref()
        .expect("planning ran")
        .as_ref()
        .expect("plan succeeded");
    assert_eq!(days.len(), 1, "expected a single day");
    let day = days.first().expect("one day present");
    assert_eq!(day.primary_stop.kind, CandidateKind::Destination);
    assert!(day.alternatives.is_empty(), "expected no alternatives");
}

#[then("planning fails with an invalid configuration")]
fn then_invalid_configuration(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let borrowed = outcome.borrow();
    let result = borrowed.as_ref().expect("planning ran");
    assert!(
        matches!(result, Err(PlanError::InvalidConfiguration(_))),
        "expected InvalidConfiguration, found {result:?}"
    );
}

#[then("planning fails because no itinerary is feasible")]
fn then_infeasible(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let borrowed = outcome.borrow();
    let result = borrowed.as_ref().expect("planning ran");
    assert!(
        matches!(result, Err(PlanError::NoFeasibleItinerary { .. })),
        "expected NoFeasibleItinerary, found {result:?}"
    );
}

#[scenario(path = "tests/features/planner.feature", index = 0)]
fn scenario_hotel_halfway(
    route: RefCell<Option<RoutePath>>,
    lodgings: RefCell<Vec<LodgingRecord>>,
    outcome: RefCell<Outcome>,
) {
    let _ = (route, lodgings, outcome);
}

#[scenario(path = "tests/features/planner.feature", index = 1)]
fn scenario_remote_lodging(
    route: RefCell<Option<RoutePath>>,
    lodgings: RefCell<Vec<LodgingRecord>>,
    outcome: RefCell<Outcome>,
) {
    let _ = (route, lodgings, outcome);
}

#[scenario(path = "tests/features/planner.feature", index = 2)]
fn scenario_negative_target(
    route: RefCell<Option<RoutePath>>,
    lodgings: RefCell<Vec<LodgingRecord>>,
    outcome: RefCell<Outcome>,
) {
    let _ = (route, lodgings, outcome);
}

#[scenario(path = "tests/features/planner.feature", index = 3)]
fn scenario_segment_cap(
    route: RefCell<Option<RoutePath>>,
    lodgings: RefCell<Vec<LodgingRecord>>,
    outcome: RefCell<Outcome>,
) {
    let _ = (route, lodgings, outcome);
}

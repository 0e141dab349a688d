//! Facade crate for the Nightstop itinerary planner.
//!
//! This crate re-exports the core planning types and, behind the `data`
//! feature, the loaders for route and lodging files.

#![forbid(unsafe_code)]

pub use nightstop_core::{
    Candidate, CandidateKind, CostWeights, DayPlan, DynamicProgrammingPlanner, ItineraryPlanner,
    LodgingCategory, LodgingRecord, NearbyLodging, PlanError, PlanRequest, PlanResponse,
    PlanningConfig, PlanningConfigError, PointLodgings, ProjectionStrategy, RoutePath,
    nearby_lodgings_along, nearest_lodgings, plan_itinerary,
};

#[cfg(feature = "data")]
pub use nightstop_data::{
    LodgingLoadError, RouteGeometry, RouteLoadError, load_lodgings, load_route,
};

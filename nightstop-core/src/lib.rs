//! Core planning engine for Nightstop.
//!
//! Given a route and a set of lodgings, the crate picks one overnight stop
//! per day so that daily distances stay close to a target while detours
//! off the route stay short. The pipeline runs strictly forward:
//!
//! 1. [`geodesy`] measures great-circle distances and builds the
//!    cumulative distance table of a [`RoutePath`].
//! 2. [`projector`] places each [`LodgingRecord`] on the route as a
//!    [`Candidate`], dropping those too far away.
//! 3. [`select_stops`] runs a dynamic program over the sorted
//!    [`CandidatePool`] to find the cheapest chain of stops.
//! 4. [`rank_alternatives`] lists substitutes for each chosen stop.
//! 5. [`compose_days`] assembles the [`DayPlan`] sequence.
//!
//! [`plan_itinerary`] wires these together, and [`ItineraryPlanner`] is the
//! boundary used by front ends. The [`nearby`] module answers the simpler
//! question of which lodgings lie closest to a given point.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use nightstop_core::{LodgingRecord, PlanningConfig, RoutePath, plan_itinerary};
//!
//! # fn main() -> Result<(), nightstop_core::PlanError> {
//! let route = RoutePath::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.9, y: 0.0 }])?;
//! let lodgings = vec![LodgingRecord::hotel("Midway Inn", Coord { x: 0.45, y: 0.001 })];
//! let days = plan_itinerary(&route, &lodgings, &PlanningConfig::default())?;
//! let stops: Vec<&str> = days.iter().map(|d| d.primary_stop.name.as_str()).collect();
//! assert_eq!(stops, ["Midway Inn", "Destination"]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
mod config;
mod error;
pub mod geodesy;
mod lodging;
pub mod nearby;
mod optimizer;
mod plan;
pub mod projector;
mod ranker;
mod route;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidate::{Candidate, CandidateKind, CandidatePool};
pub use config::{
    CostWeights, DEFAULT_ALTERNATIVES_PER_DAY, DEFAULT_MAX_OFF_ROUTE_M,
    DEFAULT_TARGET_DAILY_DISTANCE_M, PlanningConfig, PlanningConfigError, ProjectionStrategy,
    SEGMENT_CAP_FACTOR, UnknownProjectionStrategy,
};
pub use error::PlanError;
pub use lodging::{LodgingCategory, LodgingRecord, UnknownLodgingCategory};
pub use nearby::{NearbyLodging, PointLodgings, nearby_lodgings_along, nearest_lodgings};
pub use optimizer::{StopSelection, select_stops};
pub use plan::{
    DayPlan, DynamicProgrammingPlanner, ItineraryPlanner, PlanRequest, PlanResponse,
    compose_days, plan_itinerary,
};
pub use ranker::rank_alternatives;
pub use route::RoutePath;

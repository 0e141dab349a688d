//! Day plans and the planner boundary.
//!
//! [`plan_itinerary`] runs the whole pipeline for an already validated
//! route. [`ItineraryPlanner`] is the seam callers depend on;
//! [`DynamicProgrammingPlanner`] is its standard implementation.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::projector::project_lodgings;
use crate::{
    Candidate, CandidatePool, LodgingRecord, PlanError, PlanningConfig, RoutePath,
    rank_alternatives, select_stops,
};

/// One day of travel ending at an overnight stop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayPlan {
    /// Day number, starting at 1.
    pub day_index: usize,
    /// Where the day ends.
    pub primary_stop: Candidate,
    /// Nearby substitutes for the primary stop.
    pub alternatives: Vec<Candidate>,
    /// Route distance at which the day starts, in metres.
    pub start_distance: f64,
    /// Route distance at which the day ends, in metres.
    pub end_distance: f64,
}

impl DayPlan {
    /// Distance covered along the route on this day.
    #[expect(clippy::float_arithmetic, reason = "difference of route distances")]
    #[must_use]
    pub fn day_distance(&self) -> f64 {
        self.end_distance - self.start_distance
    }
}

/// Turn a chain of pool positions into consecutive day plans.
///
/// Each adjacent pair of stops becomes one day ending at the second stop.
///
/// # Errors
///
/// Returns [`PlanError::InternalInconsistency`] when a position in `stops`
/// is not in `pool`.
pub fn compose_days(
    pool: &CandidatePool,
    stops: &[usize],
    alternatives_per_day: usize,
) -> Result<Vec<DayPlan>, PlanError> {
    let stop_at = |position: usize| {
        pool.get(position).ok_or(PlanError::InternalInconsistency {
            reason: "stop position outside the candidate pool",
        })
    };
    stops
        .windows(2)
        .zip(1..)
        .map(|(pair, day_index)| {
            let &[from, to] = pair else {
                return Err(PlanError::InternalInconsistency {
                    reason: "day requires a pair of stops",
                });
            };
            let start = stop_at(from)?;
            let stop = stop_at(to)?;
            Ok(DayPlan {
                day_index,
                primary_stop: stop.clone(),
                alternatives: rank_alternatives(pool, to, alternatives_per_day),
                start_distance: start.route_distance,
                end_distance: stop.route_distance,
            })
        })
        .collect()
}

fn plan_with_pool(
    route: &RoutePath,
    lodgings: &[LodgingRecord],
    config: &PlanningConfig,
) -> Result<(Vec<DayPlan>, usize), PlanError> {
    config.validate()?;
    let projector = config.projection.projector(route, config.max_off_route_m);
    let candidates = project_lodgings(projector.as_ref(), lodgings, config.max_off_route_m);
    let pool = CandidatePool::new(route, candidates);
    let selection = select_stops(&pool, config)?;
    let days = compose_days(&pool, &selection.stops, config.alternatives_per_day)?;
    Ok((days, pool.len()))
}

/// Plan the days of an itinerary along `route`.
///
/// The function is pure: identical inputs always produce identical plans.
///
/// # Errors
///
/// Returns [`PlanError::InvalidConfiguration`] before any work when
/// `config` is invalid, and propagates the optimiser's errors.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nightstop_core::{CandidateKind, PlanningConfig, RoutePath, plan_itinerary};
///
/// # fn main() -> Result<(), nightstop_core::PlanError> {
/// let route = RoutePath::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.3, y: 0.0 }])?;
/// let days = plan_itinerary(&route, &[], &PlanningConfig::default())?;
/// assert_eq!(days.len(), 1);
/// assert_eq!(days[0].primary_stop.kind, CandidateKind::Destination);
/// # Ok(())
/// # }
/// ```
pub fn plan_itinerary(
    route: &RoutePath,
    lodgings: &[LodgingRecord],
    config: &PlanningConfig,
) -> Result<Vec<DayPlan>, PlanError> {
    plan_with_pool(route, lodgings, config).map(|(days, _)| days)
}

/// Inputs to a planning run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanRequest {
    /// Route vertices in travel order.
    pub route: Vec<Coord<f64>>,
    /// Lodgings that may serve as overnight stops.
    pub lodgings: Vec<LodgingRecord>,
}

/// Result of a successful planning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanResponse {
    /// Days in travel order.
    pub days: Vec<DayPlan>,
    /// Total route length in metres.
    pub route_distance: f64,
    /// Candidates considered by the optimiser, sentinels included.
    pub candidates_evaluated: usize,
}

/// Plan an itinerary for a request.
///
/// Implementations must be `Send + Sync` so one planner can serve
/// concurrent callers.
pub trait ItineraryPlanner: Send + Sync {
    /// Plan a request, producing days or an error.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] for invalid routes or configuration and for
    /// itineraries that cannot be built.
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError>;
}

/// Planner running projection, dynamic-programming stop selection and
/// alternative ranking with a fixed configuration.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nightstop_core::{
///     DynamicProgrammingPlanner, ItineraryPlanner, LodgingRecord, PlanRequest, PlanningConfig,
/// };
///
/// # fn main() -> Result<(), nightstop_core::PlanError> {
/// let planner = DynamicProgrammingPlanner::new(PlanningConfig::default());
/// let request = PlanRequest {
///     route: vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.9, y: 0.0 }],
///     lodgings: vec![LodgingRecord::hotel("Midway", Coord { x: 0.45, y: 0.0 })],
/// };
/// let response = planner.plan(&request)?;
/// assert_eq!(response.candidates_evaluated, 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynamicProgrammingPlanner {
    config: PlanningConfig,
}

impl DynamicProgrammingPlanner {
    /// Create a planner using `config` for every request.
    #[must_use]
    pub const fn new(config: PlanningConfig) -> Self {
        Self { config }
    }

    /// Configuration applied to every request.
    #[must_use]
    pub const fn config(&self) -> &PlanningConfig {
        &self.config
    }
}

impl ItineraryPlanner for DynamicProgrammingPlanner {
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError> {
        self.config.validate()?;
        let route = RoutePath::new(request.route.clone())?;
        let (days, candidates_evaluated) = plan_with_pool(&route, &request.lodgings, &self.config)?;
        Ok(PlanResponse {
            days,
            route_distance: route.total_distance(),
            candidates_evaluated,
        })
    }
}

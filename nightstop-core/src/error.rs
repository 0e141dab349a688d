//! Errors surfaced by the planning pipeline.

use thiserror::Error;

use crate::config::PlanningConfigError;

/// Errors returned while planning an itinerary.
///
/// Every variant is detected before the optimiser commits to work, except
/// [`PlanError::NoFeasibleItinerary`] and [`PlanError::CostOverflow`], which
/// depend on the candidate graph, and [`PlanError::InternalInconsistency`], which signals a defect rather
/// than bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The route geometry has fewer than two coordinates.
    #[error("route must contain at least 2 coordinates, got {vertices}")]
    RouteTooShort {
        /// Number of coordinates supplied.
        vertices: usize,
    },
    /// A route coordinate is NaN, infinite or outside the WGS84 ranges.
    #[error("route coordinate {index} is not a valid longitude/latitude pair")]
    InvalidCoordinate {
        /// Position of the offending coordinate in the route.
        index: usize,
    },
    /// The planning configuration failed validation.
    #[error("invalid planning configuration: {0}")]
    InvalidConfiguration(#[from] PlanningConfigError),
    /// The segment cap left no chain of stops reaching the destination.
    #[error("no itinerary reaches the destination with days capped at {max_segment_m} m")]
    NoFeasibleItinerary {
        /// Longest single-day distance the cap allowed.
        max_segment_m: f64,
    },
    /// Itinerary costs exceeded the range of `f64`, so no chain to the
    /// destination could be compared.
    #[error("itinerary cost overflowed; reduce the cost weights")]
    CostOverflow,
    /// An invariant of the optimiser was violated.
    #[error("internal planner inconsistency: {reason}")]
    InternalInconsistency {
        /// Description of the broken invariant.
        reason: &'static str,
    },
}

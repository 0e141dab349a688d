//! Mapping lodgings onto the route.
//!
//! A [`RouteProjector`] turns a lodging position into an along-route
//! distance and an off-route deviation. [`project_lodgings`] applies a
//! projector to every record and keeps those within the configured
//! threshold, in input order.

mod indexed;
mod segment;
mod vertex;

pub use indexed::IndexedVertexProjector;
pub use segment::SegmentProjector;
pub use vertex::NearestVertexProjector;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Candidate, LodgingRecord, ProjectionStrategy, RoutePath};

/// Where a point lands on the route.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Projection {
    /// Metres from the route start to the projected position.
    pub route_distance: f64,
    /// Metres between the point and the projected position.
    pub off_route: f64,
}

/// Projects points onto a route.
///
/// Implementations borrow the route they were built for and hold no other
/// state, so a projector can serve any number of lookups.
pub trait RouteProjector {
    /// Project `location`, or return `None` when it cannot be placed.
    fn project(&self, location: Coord<f64>) -> Option<Projection>;
}

impl ProjectionStrategy {
    /// Build the projector for this strategy.
    ///
    /// `max_off_route_m` lets index-backed strategies prune their search;
    /// the threshold itself is applied by [`project_lodgings`].
    #[must_use]
    pub fn projector<'a>(
        self,
        route: &'a RoutePath,
        max_off_route_m: f64,
    ) -> Box<dyn RouteProjector + 'a> {
        match self {
            Self::NearestVertex => Box::new(NearestVertexProjector::new(route)),
            Self::IndexedVertex => Box::new(IndexedVertexProjector::new(route, max_off_route_m)),
            Self::Segment => Box::new(SegmentProjector::new(route)),
        }
    }
}

/// Project every lodging and keep those within `max_off_route_m`.
///
/// Candidates come back in the same order as `lodgings`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nightstop_core::projector::{NearestVertexProjector, project_lodgings};
/// use nightstop_core::{LodgingRecord, RoutePath};
///
/// # fn main() -> Result<(), nightstop_core::PlanError> {
/// let route = RoutePath::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.5, y: 0.0 }])?;
/// let lodgings = vec![
///     LodgingRecord::hotel("Near", Coord { x: 0.5, y: 0.001 }),
///     LodgingRecord::hotel("Far", Coord { x: 0.5, y: 1.0 }),
/// ];
/// let projector = NearestVertexProjector::new(&route);
/// let candidates = project_lodgings(&projector, &lodgings, 2_500.0);
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].name, "Near");
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn project_lodgings(
    projector: &dyn RouteProjector,
    lodgings: &[LodgingRecord],
    max_off_route_m: f64,
) -> Vec<Candidate> {
    let candidates: Vec<Candidate> = lodgings
        .iter()
        .filter_map(|lodging| {
            let projection = projector.project(lodging.location)?;
            // NaN deviations fail the comparison and are dropped.
            (projection.off_route <= max_off_route_m)
                .then(|| Candidate::from_lodging(lodging, projection))
        })
        .collect();
    log::debug!(
        "projected {} of {} lodgings within {max_off_route_m} m of the route",
        candidates.len(),
        lodgings.len()
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CandidateKind;
    use rstest::{fixture, rstest};

    struct FixedProjector(Option<Projection>);

    impl RouteProjector for FixedProjector {
        fn project(&self, _location: Coord<f64>) -> Option<Projection> {
            self.0
        }
    }

    #[fixture]
    fn lodgings() -> Vec<LodgingRecord> {
        vec![
            LodgingRecord::hotel("Inn", Coord { x: 0.0, y: 0.0 }),
            LodgingRecord::shelter("Hut", Coord { x: 0.0, y: 0.0 }),
        ]
    }

    #[rstest]
    fn keeps_input_order_and_category(lodgings: Vec<LodgingRecord>) {
        let projector = FixedProjector(Some(Projection {
            route_distance: 10.0,
            off_route: 5.0,
        }));
        let candidates = project_lodgings(&projector, &lodgings, 5.0);
        let kinds: Vec<CandidateKind> = candidates.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, [CandidateKind::Hotel, CandidateKind::Shelter]);
    }

    #[rstest]
    #[case::beyond_threshold(Some(Projection { route_distance: 0.0, off_route: 5.5 }))]
    #[case::nan_deviation(Some(Projection { route_distance: 0.0, off_route: f64::NAN }))]
    #[case::unprojectable(None)]
    fn drops_lodgings_outside_threshold(
        lodgings: Vec<LodgingRecord>,
        #[case] projection: Option<Projection>,
    ) {
        let projector = FixedProjector(projection);
        assert!(project_lodgings(&projector, &lodgings, 5.0).is_empty());
    }
}

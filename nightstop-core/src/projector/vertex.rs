//! Linear nearest-vertex projection.

use geo::Coord;

use super::{Projection, RouteProjector};
use crate::RoutePath;
use crate::geodesy::distance;

/// Projects onto the closest route vertex by scanning every vertex.
///
/// The first vertex achieving the minimum distance wins, so a lodging
/// equidistant from two vertices lands on the earlier one.
#[derive(Debug, Clone, Copy)]
pub struct NearestVertexProjector<'a> {
    route: &'a RoutePath,
}

impl<'a> NearestVertexProjector<'a> {
    /// Create a projector over `route`.
    #[must_use]
    pub const fn new(route: &'a RoutePath) -> Self {
        Self { route }
    }
}

impl RouteProjector for NearestVertexProjector<'_> {
    fn project(&self, location: Coord<f64>) -> Option<Projection> {
        let (nearest, off_route) = self
            .route
            .coordinates()
            .iter()
            .map(|vertex| distance(location, *vertex))
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (index, d)| match best {
                Some((_, current)) if d >= current => best,
                _ => Some((index, d)),
            })?;
        let route_distance = self.route.cumulative().get(nearest)?;
        Some(Projection {
            route_distance,
            off_route,
        })
    }
}

//! Nearest-vertex projection backed by an R\*-tree.
//!
//! Results match [`super::NearestVertexProjector`] for every lodging within
//! the search radius. Each lookup queries a longitude/latitude envelope
//! that contains the whole spherical cap of that radius, then picks the
//! nearest vertex among the hits. Lodging longitudes outside `[-180, 180]`
//! are wrapped into range before the envelope is built.

use std::f64::consts::PI;

use geo::Coord;
use rstar::{AABB, RTree, RTreeObject};

use super::{Projection, RouteProjector};
use crate::RoutePath;
use crate::geodesy::{EARTH_RADIUS_M, distance};

/// Relative slack added to envelope half-widths to absorb rounding.
const ENVELOPE_MARGIN: f64 = 1.000_001;

/// Absolute slack in degrees added after [`ENVELOPE_MARGIN`].
const ENVELOPE_PAD_DEG: f64 = 1e-9;

/// Route vertex stored in the tree, keyed by its position in the route.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedVertex {
    index: usize,
    location: Coord<f64>,
}

impl RTreeObject for IndexedVertex {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.x, self.location.y])
    }
}

/// Projects onto the closest route vertex using a spatial index.
///
/// Lodgings with no vertex inside the search envelope are not projected.
pub struct IndexedVertexProjector<'a> {
    route: &'a RoutePath,
    index: RTree<IndexedVertex>,
    search_radius_m: f64,
}

impl<'a> IndexedVertexProjector<'a> {
    /// Index the vertices of `route` for lookups within `search_radius_m`.
    ///
    /// A negative or non-finite radius disables pruning.
    #[must_use]
    pub fn new(route: &'a RoutePath, search_radius_m: f64) -> Self {
        let vertices = route
            .coordinates()
            .iter()
            .enumerate()
            .map(|(index, location)| IndexedVertex {
                index,
                location: *location,
            })
            .collect();
        Self {
            route,
            index: RTree::bulk_load(vertices),
            search_radius_m,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "bounding a spherical cap needs trigonometry"
    )]
    fn envelope_around(&self, location: Coord<f64>) -> AABB<[f64; 2]> {
        let everywhere = AABB::from_corners([f64::MIN, f64::MIN], [f64::MAX, f64::MAX]);
        let angular = self.search_radius_m / EARTH_RADIUS_M;
        if !(angular.is_finite() && angular >= 0.0) || angular >= PI {
            return everywhere;
        }

        let dlat = angular.to_degrees().mul_add(ENVELOPE_MARGIN, ENVELOPE_PAD_DEG);
        let min_lat = location.y - dlat;
        let max_lat = location.y + dlat;

        let cos_lat = location.y.to_radians().cos();
        let sin_angular = angular.sin();
        // The cap touches a pole, so every longitude is reachable.
        if sin_angular >= cos_lat {
            return AABB::from_corners([f64::MIN, min_lat], [f64::MAX, max_lat]);
        }
        let dlon = (sin_angular / cos_lat)
            .asin()
            .to_degrees()
            .mul_add(ENVELOPE_MARGIN, ENVELOPE_PAD_DEG);
        let min_lon = location.x - dlon;
        let max_lon = location.x + dlon;
        // Wrapped longitudes cannot be expressed as one box.
        if min_lon < -180.0 || max_lon > 180.0 {
            return AABB::from_corners([f64::MIN, min_lat], [f64::MAX, max_lat]);
        }
        AABB::from_corners([min_lon, min_lat], [max_lon, max_lat])
    }
}

impl RouteProjector for IndexedVertexProjector<'_> {
    fn project(&self, location: Coord<f64>) -> Option<Projection> {
        if !(location.x.is_finite() && location.y.is_finite()) {
            return None;
        }
        let envelope = self.envelope_around(wrap_longitude(location));
        let (nearest, off_route) = self
            .index
            .locate_in_envelope_intersecting(&envelope)
            .map(|vertex| (vertex.index, distance(location, vertex.location)))
            .min_by(|(lhs_index, lhs), (rhs_index, rhs)| {
                lhs.total_cmp(rhs).then(lhs_index.cmp(rhs_index))
            })?;
        let route_distance = self.route.cumulative().get(nearest)?;
        Some(Projection {
            route_distance,
            off_route,
        })
    }
}

/// Shift the longitude by whole turns into `[-180, 180)`.
#[expect(clippy::float_arithmetic, reason = "wrapping an angle")]
fn wrap_longitude(location: Coord<f64>) -> Coord<f64> {
    if (-180.0..=180.0).contains(&location.x) {
        return location;
    }
    Coord {
        x: (location.x + 180.0).rem_euclid(360.0) - 180.0,
        y: location.y,
    }
}

impl std::fmt::Debug for IndexedVertexProjector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedVertexProjector")
            .field("vertices", &self.index.size())
            .field("search_radius_m", &self.search_radius_m)
            .finish_non_exhaustive()
    }
}

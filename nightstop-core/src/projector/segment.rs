//! Point-to-segment projection.

use geo::Coord;

use super::{Projection, RouteProjector};
use crate::RoutePath;
use crate::geodesy::distance;

/// Projects onto the closest point of any route segment.
///
/// The closest point on each segment is found in an equirectangular frame
/// centred on the lodging and clamped to the segment ends. Vertices are
/// always considered too, so the reported deviation never exceeds the
/// nearest-vertex deviation. On ties the earliest position along the route
/// wins.
#[derive(Debug, Clone, Copy)]
pub struct SegmentProjector<'a> {
    route: &'a RoutePath,
}

impl<'a> SegmentProjector<'a> {
    /// Create a projector over `route`.
    #[must_use]
    pub const fn new(route: &'a RoutePath) -> Self {
        Self { route }
    }
}

/// A position on one segment, as a fraction from its start vertex.
struct SegmentPoint {
    fraction: f64,
    location: Coord<f64>,
}

#[expect(
    clippy::float_arithmetic,
    reason = "longitude wrapping is modular float arithmetic"
)]
fn wrap_longitude(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// Closest point to `origin` on the segment `from`..`to`, excluding ends.
#[expect(
    clippy::float_arithmetic,
    reason = "planar projection in a local equirectangular frame"
)]
fn interior_closest(origin: Coord<f64>, from: Coord<f64>, to: Coord<f64>) -> Option<SegmentPoint> {
    let scale = origin.y.to_radians().cos();
    let ax = wrap_longitude(from.x - origin.x) * scale;
    let ay = from.y - origin.y;
    let span_lon = wrap_longitude(to.x - from.x);
    let dx = span_lon * scale;
    let dy = to.y - from.y;
    let length_sq = dx.mul_add(dx, dy * dy);
    if length_sq.is_nan() || length_sq <= 0.0 {
        return None;
    }
    let fraction = -ax.mul_add(dx, ay * dy) / length_sq;
    if fraction.is_nan() || fraction <= 0.0 || fraction >= 1.0 {
        return None;
    }
    Some(SegmentPoint {
        fraction,
        location: Coord {
            x: span_lon.mul_add(fraction, from.x),
            y: dy.mul_add(fraction, from.y),
        },
    })
}

impl RouteProjector for SegmentProjector<'_> {
    #[expect(
        clippy::float_arithmetic,
        reason = "interpolating the along-route distance"
    )]
    fn project(&self, location: Coord<f64>) -> Option<Projection> {
        let coordinates = self.route.coordinates();
        let cumulative = self.route.cumulative().as_slice();
        let mut best: Option<Projection> = None;
        let mut consider = |candidate: Projection| match best {
            Some(current) if candidate.off_route >= current.off_route => {}
            _ => best = Some(candidate),
        };

        if let (Some(first), Some(first_distance)) = (coordinates.first(), cumulative.first()) {
            consider(Projection {
                route_distance: *first_distance,
                off_route: distance(location, *first),
            });
        }
        for (vertices, distances) in coordinates.windows(2).zip(cumulative.windows(2)) {
            let ([from, to], [start_d, end_d]) = (vertices, distances) else {
                continue;
            };
            if let Some(point) = interior_closest(location, *from, *to) {
                consider(Projection {
                    route_distance: (end_d - start_d).mul_add(point.fraction, *start_d),
                    off_route: distance(location, point.location),
                });
            }
            consider(Projection {
                route_distance: *end_d,
                off_route: distance(location, *to),
            });
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::NearestVertexProjector;
    use rstest::rstest;

    fn sparse_route() -> RoutePath {
        RoutePath::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }])
            .expect("valid route")
    }

    #[rstest]
    fn lodging_beside_midpoint_projects_onto_segment() {
        let route = sparse_route();
        let projection = SegmentProjector::new(&route)
            .project(Coord { x: 0.5, y: 0.01 })
            .expect("projection");
        let half = route.total_distance() / 2.0;
        assert!((projection.route_distance - half).abs() < 1.0);
        assert!((projection.off_route - 1_111.95).abs() < 1.0);
    }

    #[rstest]
    fn lodging_past_the_end_clamps_to_last_vertex() {
        let route = sparse_route();
        let projection = SegmentProjector::new(&route)
            .project(Coord { x: 1.2, y: 0.0 })
            .expect("projection");
        assert_eq!(projection.route_distance, route.total_distance());
    }

    #[rstest]
    #[case(Coord { x: 0.5, y: 0.01 })]
    #[case(Coord { x: -0.3, y: 0.2 })]
    #[case(Coord { x: 0.9, y: -0.05 })]
    fn never_farther_than_nearest_vertex(#[case] lodging: Coord<f64>) {
        let route = sparse_route();
        let segment = SegmentProjector::new(&route)
            .project(lodging)
            .expect("projection");
        let vertex = NearestVertexProjector::new(&route)
            .project(lodging)
            .expect("projection");
        assert!(segment.off_route <= vertex.off_route);
    }

    #[rstest]
    fn degenerate_segments_are_skipped() {
        let route = RoutePath::new(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.1, y: 0.0 },
        ])
        .expect("valid route");
        let projection = SegmentProjector::new(&route)
            .project(Coord { x: 0.0, y: 0.0 })
            .expect("projection");
        assert_eq!(projection.route_distance, 0.0);
        assert_eq!(projection.off_route, 0.0);
    }

    #[rstest]
    #[case(190.0, -170.0)]
    #[case(-181.0, 179.0)]
    #[case(45.0, 45.0)]
    fn wraps_longitudes(#[case] raw: f64, #[case] wrapped: f64) {
        assert!((wrap_longitude(raw) - wrapped).abs() < 1e-9);
    }
}

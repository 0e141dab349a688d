//! Geometry helpers shared by unit and behaviour tests.
//!
//! Points on the equator make along-route distances easy to reason about:
//! the haversine distance between two of them is the great-circle arc
//! length of their longitude difference.

use geo::Coord;

use crate::geodesy::EARTH_RADIUS_M;
use crate::{LodgingRecord, PlanError, RoutePath};

/// Metres spanned by one degree of longitude on the equator.
#[expect(clippy::float_arithmetic, reason = "arc length of one degree")]
#[must_use]
pub fn metres_per_degree() -> f64 {
    EARTH_RADIUS_M * std::f64::consts::PI / 180.0
}

/// Point on the equator `metres` east of longitude zero.
#[expect(clippy::float_arithmetic, reason = "metres to degrees")]
#[must_use]
pub fn equator_point(metres: f64) -> Coord<f64> {
    Coord {
        x: metres / metres_per_degree(),
        y: 0.0,
    }
}

/// Straight equatorial route of `length_m` metres with evenly spaced
/// vertices.
///
/// # Errors
///
/// Returns [`PlanError::RouteTooShort`] when `vertices` is below two.
#[expect(
    clippy::float_arithmetic,
    reason = "spacing vertices along the route"
)]
pub fn straight_route(length_m: f64, vertices: u32) -> Result<RoutePath, PlanError> {
    let last = f64::from(vertices.saturating_sub(1).max(1));
    RoutePath::new(
        (0..vertices)
            .map(|step| equator_point(length_m * f64::from(step) / last))
            .collect(),
    )
}

/// Hotel on the equator `metres` east of longitude zero, offset
/// `off_route_m` metres north.
#[expect(clippy::float_arithmetic, reason = "metres to degrees")]
#[must_use]
pub fn hotel_at(name: &str, metres: f64, off_route_m: f64) -> LodgingRecord {
    let along = equator_point(metres);
    LodgingRecord::hotel(
        name,
        Coord {
            x: along.x,
            y: off_route_m / metres_per_degree(),
        },
    )
}

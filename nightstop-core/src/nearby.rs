//! Nearest lodgings around arbitrary points.
//!
//! Unlike the planner this lookup ignores the route: it ranks every
//! lodging by straight-line distance from each query point.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::LodgingRecord;
use crate::geodesy::distance;

/// Default number of lodgings returned per point.
pub const DEFAULT_NEARBY_LIMIT: usize = 5;

/// A lodging and its distance from a query point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NearbyLodging {
    /// The lodging.
    pub lodging: LodgingRecord,
    /// Distance from the query point, in metres.
    pub distance: f64,
}

/// Nearby lodgings for one query point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointLodgings {
    /// The query point.
    pub point: Coord<f64>,
    /// Closest lodgings first.
    pub lodgings: Vec<NearbyLodging>,
}

/// The `limit` lodgings closest to `point`, nearest first.
///
/// Lodgings at equal distance keep their input order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nightstop_core::LodgingRecord;
/// use nightstop_core::nearby::nearest_lodgings;
///
/// let lodgings = vec![
///     LodgingRecord::hotel("Far", Coord { x: 1.0, y: 0.0 }),
///     LodgingRecord::shelter("Near", Coord { x: 0.1, y: 0.0 }),
/// ];
/// let nearby = nearest_lodgings(Coord { x: 0.0, y: 0.0 }, &lodgings, 1);
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0].lodging.name, "Near");
/// ```
#[must_use]
pub fn nearest_lodgings(
    point: Coord<f64>,
    lodgings: &[LodgingRecord],
    limit: usize,
) -> Vec<NearbyLodging> {
    let mut ranked: Vec<(f64, &LodgingRecord)> = lodgings
        .iter()
        .map(|lodging| (distance(point, lodging.location), lodging))
        .collect();
    ranked.sort_by(|(lhs, _), (rhs, _)| lhs.total_cmp(rhs));
    ranked
        .into_iter()
        .take(limit)
        .map(|(metres, lodging)| NearbyLodging {
            lodging: lodging.clone(),
            distance: metres,
        })
        .collect()
}

/// [`nearest_lodgings`] for each of `points`, in order.
#[must_use]
pub fn nearby_lodgings_along(
    points: &[Coord<f64>],
    lodgings: &[LodgingRecord],
    limit: usize,
) -> Vec<PointLodgings> {
    points
        .iter()
        .map(|point| PointLodgings {
            point: *point,
            lodgings: nearest_lodgings(*point, lodgings, limit),
        })
        .collect()
}

//! Validated route geometry.

use geo::Coord;

use crate::PlanError;
use crate::geodesy::{CumulativeDistanceTable, cumulative_distances};

/// An ordered travel path together with its cumulative distance table.
///
/// Construction validates the geometry once so that projection and
/// optimisation can assume at least two finite vertices with longitudes in
/// `[-180, 180]` and latitudes in `[-90, 90]`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nightstop_core::RoutePath;
///
/// # fn main() -> Result<(), nightstop_core::PlanError> {
/// let route = RoutePath::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.1, y: 0.0 }])?;
/// assert_eq!(route.coordinates().len(), 2);
/// assert!(route.total_distance() > 11_000.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    coordinates: Vec<Coord<f64>>,
    cumulative: CumulativeDistanceTable,
    start: Coord<f64>,
    end: Coord<f64>,
}

impl RoutePath {
    /// Validate the coordinates and compute the cumulative distances.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::RouteTooShort`] for fewer than two coordinates
    /// and [`PlanError::InvalidCoordinate`] for NaN, infinite or
    /// out-of-range values.
    pub fn new(coordinates: Vec<Coord<f64>>) -> Result<Self, PlanError> {
        let (Some(&start), Some(&end)) = (coordinates.first(), coordinates.last()) else {
            return Err(PlanError::RouteTooShort { vertices: 0 });
        };
        if let Some(index) = coordinates.iter().position(|coord| !is_wgs84(*coord)) {
            return Err(PlanError::InvalidCoordinate { index });
        }
        let cumulative = cumulative_distances(&coordinates)?;
        Ok(Self {
            coordinates,
            cumulative,
            start,
            end,
        })
    }

    /// Route vertices in travel order.
    #[must_use]
    pub fn coordinates(&self) -> &[Coord<f64>] {
        &self.coordinates
    }

    /// Along-route distance at each vertex.
    #[must_use]
    pub const fn cumulative(&self) -> &CumulativeDistanceTable {
        &self.cumulative
    }

    /// Total route length in metres.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.cumulative.total()
    }

    /// First vertex.
    #[must_use]
    pub const fn start(&self) -> Coord<f64> {
        self.start
    }

    /// Last vertex.
    #[must_use]
    pub const fn end(&self) -> Coord<f64> {
        self.end
    }
}

/// Longitude and latitude both lie within their WGS84 ranges.
fn is_wgs84(coord: Coord<f64>) -> bool {
    (-180.0..=180.0).contains(&coord.x) && (-90.0..=90.0).contains(&coord.y)
}

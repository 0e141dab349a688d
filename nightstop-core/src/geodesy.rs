//! Great-circle distances on a spherical Earth.
//!
//! All distances are metres. Coordinates follow the `geo` convention of
//! `x = longitude` and `y = latitude`, in degrees.

use geo::Coord;

use crate::PlanError;

/// Radius of the sphere used for every distance in the crate, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in metres.
///
/// The result does not depend on argument order and is exactly zero for
/// coincident points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nightstop_core::geodesy::distance;
///
/// let copenhagen = Coord { x: 12.5683, y: 55.6761 };
/// let roskilde = Coord { x: 12.0803, y: 55.6415 };
/// let metres = distance(copenhagen, roskilde);
/// assert!((30_000.0..32_000.0).contains(&metres));
/// assert_eq!(distance(copenhagen, copenhagen), 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
#[must_use]
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    // Absolute differences keep the result bit-identical under argument swap.
    let half_dlat = (b.y - a.y).abs().to_radians() / 2.0;
    let half_dlon = (b.x - a.x).abs().to_radians() / 2.0;
    let lat_product = a.y.to_radians().cos() * b.y.to_radians().cos();
    let h = lat_product
        .mul_add(half_dlon.sin().powi(2), half_dlat.sin().powi(2))
        .clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Along-route distance from the first vertex to each vertex.
///
/// The table is parallel to the route: entry `i` is the sum of the
/// distances between consecutive vertices up to `i`, so the first entry is
/// zero and the sequence never decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistanceTable(Vec<f64>);

impl CumulativeDistanceTable {
    /// Distances as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Distance at vertex `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Number of entries, equal to the number of route vertices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty. Tables built by
    /// [`cumulative_distances`] never are.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total length of the route.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }
}

/// Build the cumulative distance table for a path.
///
/// # Errors
///
/// Returns [`PlanError::RouteTooShort`] when the path has fewer than two
/// points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nightstop_core::geodesy::cumulative_distances;
///
/// # fn main() -> Result<(), nightstop_core::PlanError> {
/// let path = [Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 0.1 }];
/// let table = cumulative_distances(&path)?;
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(0), Some(0.0));
/// # Ok(())
/// # }
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "prefix sums of floating-point distances"
)]
pub fn cumulative_distances(path: &[Coord<f64>]) -> Result<CumulativeDistanceTable, PlanError> {
    if path.len() < 2 {
        return Err(PlanError::RouteTooShort {
            vertices: path.len(),
        });
    }

    let mut table = Vec::with_capacity(path.len());
    let mut running = 0.0;
    table.push(running);
    for pair in path.windows(2) {
        if let [from, to] = pair {
            running += distance(*from, *to);
            table.push(running);
        }
    }
    Ok(CumulativeDistanceTable(table))
}

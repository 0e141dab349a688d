//! Substitute stops for a chosen day.

use crate::{Candidate, CandidatePool};

/// Up to `limit` candidates nearest to the primary stop along the route.
///
/// `primary` is the primary stop's position in `pool`. Sentinels and the
/// primary itself are never returned. Candidates are ordered by absolute
/// route-distance difference; exact ties fall back to discovery order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nightstop_core::{
///     Candidate, CandidateKind, CandidatePool, RoutePath, rank_alternatives,
/// };
///
/// # fn main() -> Result<(), nightstop_core::PlanError> {
/// let route = RoutePath::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }])?;
/// let hotel = |name: &str, route_distance| Candidate {
///     name: name.to_owned(),
///     location: Coord { x: 0.0, y: 0.0 },
///     route_distance,
///     off_route: 0.0,
///     kind: CandidateKind::Hotel,
/// };
/// let pool = CandidatePool::new(
///     &route,
///     vec![hotel("A", 40_000.0), hotel("B", 50_000.0), hotel("C", 58_000.0)],
/// );
/// let alternatives = rank_alternatives(&pool, 2, 1);
/// assert_eq!(alternatives[0].name, "C");
/// # Ok(())
/// # }
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "ranking by absolute route-distance difference"
)]
#[must_use]
pub fn rank_alternatives(pool: &CandidatePool, primary: usize, limit: usize) -> Vec<Candidate> {
    let Some(anchor) = pool.get(primary) else {
        return Vec::new();
    };
    let mut eligible: Vec<(f64, usize, &Candidate)> = pool
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(index, candidate)| *index != primary && !candidate.is_sentinel())
        .map(|(index, candidate)| {
            let gap = (candidate.route_distance - anchor.route_distance).abs();
            let discovery = pool.discovery_index(index).unwrap_or(usize::MAX);
            (gap, discovery, candidate)
        })
        .collect();
    eligible.sort_by(|(lhs_gap, lhs_order, _), (rhs_gap, rhs_order, _)| {
        lhs_gap.total_cmp(rhs_gap).then(lhs_order.cmp(rhs_order))
    });
    eligible
        .into_iter()
        .take(limit)
        .map(|(_, _, candidate)| candidate.clone())
        .collect()
}

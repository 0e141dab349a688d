//! Dynamic-programming stop selection.
//!
//! Candidates form a DAG ordered by route distance. The cheapest chain from
//! Start to Destination is found in O(n²) by relaxing every forward edge
//! once, then recovered by following predecessor links back from the
//! Destination.

use crate::{CandidatePool, CostWeights, PlanError, PlanningConfig};

/// The cheapest chain of stops through a [`CandidatePool`].
#[derive(Debug, Clone, PartialEq)]
pub struct StopSelection {
    /// Pool positions of the chosen stops, Start first and Destination last.
    pub stops: Vec<usize>,
    /// Total cost of the chain.
    pub cost: f64,
}

/// Edge weights of the candidate graph.
#[derive(Debug, Clone, Copy)]
struct TransitionCost {
    target_m: f64,
    weights: CostWeights,
    max_segment_m: Option<f64>,
}

impl TransitionCost {
    fn new(config: &PlanningConfig) -> Self {
        Self {
            target_m: config.target_daily_distance_m,
            weights: config.weights,
            max_segment_m: config.max_segment_length_m(),
        }
    }

    /// Cost of travelling from `from_rd` to a stop at `to_rd` lying
    /// `to_off_route` metres off the route, or `None` when the edge is not
    /// admissible.
    #[expect(clippy::float_arithmetic, reason = "the cost function is real-valued")]
    fn between(&self, from_rd: f64, to_rd: f64, to_off_route: f64) -> Option<f64> {
        if to_rd <= from_rd {
            return None;
        }
        let segment = to_rd - from_rd;
        if self.max_segment_m.is_some_and(|cap| segment > cap) {
            return None;
        }
        let deviation = (segment - self.target_m).abs();
        Some(self.weights.distance_deviation_weight.mul_add(
            deviation,
            self.weights.off_route_deviation_weight * to_off_route,
        ))
    }
}

/// Select the cost-minimal chain of stops from Start to Destination.
///
/// Relaxation only accepts strictly cheaper paths, so among equal-cost
/// chains the one using the earliest predecessor wins. When the route has
/// zero length no stop lies strictly ahead of Start and the trivial chain
/// Start, Destination is returned.
///
/// # Errors
///
/// - [`PlanError::InvalidConfiguration`] when `config` fails validation.
/// - [`PlanError::NoFeasibleItinerary`] when the segment cap leaves the
///   Destination unreachable.
/// - [`PlanError::CostOverflow`] when the weights are so large that every
///   chain to the Destination costs more than `f64::MAX`. Overflowing edges
///   are skipped, so a finite chain still wins when one exists.
/// - [`PlanError::InternalInconsistency`] when the pool lacks its sentinels
///   or the predecessor chain is broken.
#[expect(
    clippy::float_arithmetic,
    reason = "accumulating path costs is floating-point addition"
)]
pub fn select_stops(
    pool: &CandidatePool,
    config: &PlanningConfig,
) -> Result<StopSelection, PlanError> {
    config.validate()?;
    let start = pool.start_index().ok_or(PlanError::InternalInconsistency {
        reason: "candidate pool has no start",
    })?;
    let destination = pool
        .destination_index()
        .ok_or(PlanError::InternalInconsistency {
            reason: "candidate pool has no destination",
        })?;

    let candidates = pool.as_slice();
    if let (Some(first), Some(last)) = (candidates.get(start), candidates.get(destination))
        && last.route_distance <= first.route_distance
    {
        log::warn!("route has zero length; planning a single day");
        return Ok(StopSelection {
            stops: vec![start, destination],
            cost: 0.0,
        });
    }

    let edges = TransitionCost::new(config);
    let n = candidates.len();
    let mut best = vec![f64::INFINITY; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    if let Some(slot) = best.get_mut(start) {
        *slot = 0.0;
    }

    let mut overflowed = false;
    for (i, from) in candidates.iter().enumerate() {
        let Some(&base) = best.get(i) else { continue };
        if !base.is_finite() {
            continue;
        }
        for (j, to) in candidates.iter().enumerate().skip(i + 1) {
            let Some(cost) = edges.between(from.route_distance, to.route_distance, to.off_route)
            else {
                continue;
            };
            let total = base + cost;
            if !total.is_finite() {
                overflowed = true;
                continue;
            }
            if let (Some(slot), Some(link)) = (best.get_mut(j), previous.get_mut(j))
                && total < *slot
            {
                *slot = total;
                *link = Some(i);
            }
        }
    }

    let cost = best.get(destination).copied().unwrap_or(f64::INFINITY);
    if !cost.is_finite() {
        return Err(unreachable_destination(config, overflowed));
    }

    let stops = backtrack(&previous, start, destination)?;
    log::debug!(
        "selected {} stops from {n} candidates at cost {cost}",
        stops.len()
    );
    Ok(StopSelection { stops, cost })
}

/// Explain why relaxation never reached the Destination.
fn unreachable_destination(config: &PlanningConfig, overflowed: bool) -> PlanError {
    if overflowed {
        log::warn!("transition costs overflowed; the cost weights are too large");
        return PlanError::CostOverflow;
    }
    match config.max_segment_length_m() {
        Some(max_segment_m) => PlanError::NoFeasibleItinerary { max_segment_m },
        None => PlanError::InternalInconsistency {
            reason: "destination unreachable without a segment cap",
        },
    }
}

fn backtrack(
    previous: &[Option<usize>],
    start: usize,
    destination: usize,
) -> Result<Vec<usize>, PlanError> {
    let mut stops = vec![destination];
    let mut current = destination;
    while current != start {
        if stops.len() > previous.len() {
            return Err(PlanError::InternalInconsistency {
                reason: "predecessor chain contains a cycle",
            });
        }
        current = previous
            .get(current)
            .copied()
            .flatten()
            .ok_or(PlanError::InternalInconsistency {
                reason: "predecessor chain does not reach the start",
            })?;
        stops.push(current);
    }
    stops.reverse();
    Ok(stops)
}

//! Planning configuration and its validation.
//!
//! Tuning knobs that differed between earlier versions of the planner
//! (off-route threshold, cost weights, segment capping) are all explicit
//! fields here rather than constants baked into the optimiser.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default target distance for a single day, in metres.
pub const DEFAULT_TARGET_DAILY_DISTANCE_M: f64 = 50_000.0;

/// Default maximum distance between a lodging and the route, in metres.
pub const DEFAULT_MAX_OFF_ROUTE_M: f64 = 2_500.0;

/// Default number of alternative stops listed per day.
pub const DEFAULT_ALTERNATIVES_PER_DAY: usize = 4;

/// Multiple of the target distance above which a capped day is rejected.
pub const SEGMENT_CAP_FACTOR: f64 = 1.5;

/// Relative weights of the two penalties in the optimiser's cost function.
///
/// # Examples
/// ```
/// use nightstop_core::CostWeights;
///
/// let weights = CostWeights::default();
/// assert_eq!(weights.distance_deviation_weight, 5.0);
/// assert_eq!(weights.off_route_deviation_weight, 0.02);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostWeights {
    /// Penalty per metre of deviation from the target daily distance.
    pub distance_deviation_weight: f64,
    /// Penalty per metre a stop lies away from the route.
    pub off_route_deviation_weight: f64,
}

impl CostWeights {
    /// Construct weights from their two components.
    #[must_use]
    pub const fn new(distance_deviation_weight: f64, off_route_deviation_weight: f64) -> Self {
        Self {
            distance_deviation_weight,
            off_route_deviation_weight,
        }
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        Self::new(5.0, 0.02)
    }
}

/// How lodgings are mapped onto the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ProjectionStrategy {
    /// Linear scan for the nearest route vertex.
    #[default]
    NearestVertex,
    /// Nearest route vertex found through an R\*-tree over the vertices.
    IndexedVertex,
    /// Closest point on any route segment.
    Segment,
}

impl ProjectionStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 3] = [Self::NearestVertex, Self::IndexedVertex, Self::Segment];

    /// Stable identifier used in configuration files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NearestVertex => "nearest-vertex",
            Self::IndexedVertex => "indexed-vertex",
            Self::Segment => "segment",
        }
    }
}

impl fmt::Display for ProjectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ProjectionStrategy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown projection strategy {0:?}; expected nearest-vertex, indexed-vertex or segment")]
pub struct UnknownProjectionStrategy(pub String);

impl FromStr for ProjectionStrategy {
    type Err = UnknownProjectionStrategy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownProjectionStrategy(value.to_owned()))
    }
}

/// Validation failures for [`PlanningConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningConfigError {
    /// The target daily distance was zero or negative.
    #[error("target daily distance must be positive, got {value} m")]
    NonPositiveTargetDistance {
        /// Rejected value in metres.
        value: f64,
    },
    /// A weight or threshold was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeValue {
        /// Name of the configuration field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A weight, threshold or distance was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteValue {
        /// Name of the configuration field.
        field: &'static str,
    },
}

/// Everything the planner needs besides the route and the lodgings.
///
/// # Examples
/// ```
/// use nightstop_core::{PlanningConfig, ProjectionStrategy};
///
/// let config = PlanningConfig::default()
///     .with_target_daily_distance_m(80_000.0)
///     .with_projection(ProjectionStrategy::Segment);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_segment_length_m(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanningConfig {
    /// Desired distance covered per day, in metres.
    pub target_daily_distance_m: f64,
    /// Cost function weights.
    pub weights: CostWeights,
    /// Lodgings farther than this from the route are ignored, in metres.
    pub max_off_route_m: f64,
    /// Maximum number of alternatives attached to each day.
    pub alternatives_per_day: usize,
    /// Reject days longer than [`SEGMENT_CAP_FACTOR`] times the target.
    pub cap_segment_length: bool,
    /// Strategy used to project lodgings onto the route.
    pub projection: ProjectionStrategy,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            target_daily_distance_m: DEFAULT_TARGET_DAILY_DISTANCE_M,
            weights: CostWeights::default(),
            max_off_route_m: DEFAULT_MAX_OFF_ROUTE_M,
            alternatives_per_day: DEFAULT_ALTERNATIVES_PER_DAY,
            cap_segment_length: false,
            projection: ProjectionStrategy::default(),
        }
    }
}

impl PlanningConfig {
    /// Replace the target daily distance.
    #[must_use]
    pub const fn with_target_daily_distance_m(mut self, metres: f64) -> Self {
        self.target_daily_distance_m = metres;
        self
    }

    /// Replace the cost weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the off-route threshold.
    #[must_use]
    pub const fn with_max_off_route_m(mut self, metres: f64) -> Self {
        self.max_off_route_m = metres;
        self
    }

    /// Replace the number of alternatives per day.
    #[must_use]
    pub const fn with_alternatives_per_day(mut self, count: usize) -> Self {
        self.alternatives_per_day = count;
        self
    }

    /// Enable or disable the segment length cap.
    #[must_use]
    pub const fn with_segment_cap(mut self, enabled: bool) -> Self {
        self.cap_segment_length = enabled;
        self
    }

    /// Replace the projection strategy.
    #[must_use]
    pub const fn with_projection(mut self, projection: ProjectionStrategy) -> Self {
        self.projection = projection;
        self
    }

    /// Longest admissible day when the segment cap is enabled.
    #[expect(
        clippy::float_arithmetic,
        reason = "the cap is a multiple of the target distance"
    )]
    #[must_use]
    pub fn max_segment_length_m(&self) -> Option<f64> {
        self.cap_segment_length
            .then(|| self.target_daily_distance_m * SEGMENT_CAP_FACTOR)
    }

    /// Check every numeric field before any planning work starts.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PlanningConfigError> {
        let target = self.target_daily_distance_m;
        if !target.is_finite() {
            return Err(PlanningConfigError::NonFiniteValue {
                field: "target_daily_distance_m",
            });
        }
        if target <= 0.0 {
            return Err(PlanningConfigError::NonPositiveTargetDistance { value: target });
        }
        require_non_negative(
            "distance_deviation_weight",
            self.weights.distance_deviation_weight,
        )?;
        require_non_negative(
            "off_route_deviation_weight",
            self.weights.off_route_deviation_weight,
        )?;
        require_non_negative("max_off_route_m", self.max_off_route_m)
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), PlanningConfigError> {
    if !value.is_finite() {
        return Err(PlanningConfigError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(PlanningConfigError::NegativeValue { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_config_is_valid() {
        assert!(PlanningConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case(-5.0)]
    #[case(0.0)]
    fn rejects_non_positive_target(#[case] target: f64) {
        let config = PlanningConfig::default().with_target_daily_distance_m(target);
        assert_eq!(
            config.validate(),
            Err(PlanningConfigError::NonPositiveTargetDistance { value: target })
        );
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn rejects_non_finite_target(#[case] target: f64) {
        let config = PlanningConfig::default().with_target_daily_distance_m(target);
        assert_eq!(
            config.validate(),
            Err(PlanningConfigError::NonFiniteValue {
                field: "target_daily_distance_m"
            })
        );
    }

    #[rstest]
    #[case::distance_weight(CostWeights::new(-1.0, 0.0), "distance_deviation_weight")]
    #[case::off_route_weight(CostWeights::new(1.0, -0.5), "off_route_deviation_weight")]
    fn rejects_negative_weights(#[case] weights: CostWeights, #[case] expected: &str) {
        let config = PlanningConfig::default().with_weights(weights);
        match config.validate() {
            Err(PlanningConfigError::NegativeValue { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected NegativeValue, found {other:?}"),
        }
    }

    #[rstest]
    fn rejects_nan_weight() {
        let config = PlanningConfig::default().with_weights(CostWeights::new(f64::NAN, 1.0));
        assert_eq!(
            config.validate(),
            Err(PlanningConfigError::NonFiniteValue {
                field: "distance_deviation_weight"
            })
        );
    }

    #[rstest]
    fn rejects_negative_threshold() {
        let config = PlanningConfig::default().with_max_off_route_m(-1.0);
        assert!(matches!(
            config.validate(),
            Err(PlanningConfigError::NegativeValue {
                field: "max_off_route_m",
                ..
            })
        ));
    }

    #[rstest]
    fn zero_weights_are_allowed() {
        let config = PlanningConfig::default().with_weights(CostWeights::new(0.0, 0.0));
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn segment_cap_is_one_and_a_half_targets() {
        let config = PlanningConfig::default()
            .with_target_daily_distance_m(40_000.0)
            .with_segment_cap(true);
        assert_eq!(config.max_segment_length_m(), Some(60_000.0));
    }

    #[rstest]
    #[case("nearest-vertex", ProjectionStrategy::NearestVertex)]
    #[case("Indexed-Vertex", ProjectionStrategy::IndexedVertex)]
    #[case(" segment ", ProjectionStrategy::Segment)]
    fn parses_projection_strategy(#[case] raw: &str, #[case] expected: ProjectionStrategy) {
        assert_eq!(raw.parse::<ProjectionStrategy>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_projection_strategy() {
        let err = "perpendicular"
            .parse::<ProjectionStrategy>()
            .expect_err("unknown strategy");
        assert_eq!(err.0, "perpendicular");
    }
}

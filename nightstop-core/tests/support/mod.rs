//! Assertions shared by the integration tests.
//!
//! Route and lodging fixtures come from `nightstop_core::test_support`.

use nightstop_core::DayPlan;

/// Tolerance for along-route distances built from equatorial points.
pub const DISTANCE_EPSILON: f64 = 1e-6;

/// Names of the primary stops, in day order.
pub fn stop_names(days: &[DayPlan]) -> Vec<String> {
    days.iter().map(|day| day.primary_stop.name.clone()).collect()
}

/// Assert two distances agree within [`DISTANCE_EPSILON`].
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < DISTANCE_EPSILON,
        "expected {expected}, found {actual}"
    );
}

//! Solver traits and configuration.

use crate::geometry::BoxSpec;
use crate::result::SessionResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Heaviest box the robot can lift, in mass units.
pub const MAX_LIFT_WEIGHT: f64 = 10.0;

/// Order in which a session feeds boxes to the placer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrderingPolicy {
    /// Use the sequence exactly as supplied.
    AsGiven,
    /// Accessible boxes first, then heavier before lighter within each group.
    #[default]
    AccessibleThenHeaviest,
}

impl OrderingPolicy {
    /// Returns a short name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            OrderingPolicy::AsGiven => "as_given",
            OrderingPolicy::AccessibleThenHeaviest => "accessible_then_heaviest",
        }
    }

    /// Reorders `items` in place. Ties keep their original relative order.
    pub fn apply(&self, items: &mut [BoxSpec]) {
        match self {
            OrderingPolicy::AsGiven => {}
            OrderingPolicy::AccessibleThenHeaviest => items.sort_by(|a, b| {
                b.accessible
                    .cmp(&a.accessible)
                    .then_with(|| b.weight.total_cmp(&a.weight))
            }),
        }
    }
}

/// Common configuration for placers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Boxes heavier than this are rejected before any search.
    pub max_lift_weight: f64,

    /// Ordering applied by [`Solver::run`] before placement.
    pub ordering: OrderingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_lift_weight: MAX_LIFT_WEIGHT,
            ordering: OrderingPolicy::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lift limit.
    pub fn with_max_lift_weight(mut self, weight: f64) -> Self {
        self.max_lift_weight = weight;
        self
    }

    /// Sets the ordering policy.
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Checks that the lift limit is a finite, non-negative number.
    pub fn validate(&self) -> Result<()> {
        if !self.max_lift_weight.is_finite() || self.max_lift_weight < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_lift_weight must be a non-negative number, got {}",
                self.max_lift_weight
            )));
        }
        Ok(())
    }
}

/// Progress callback for long-running sessions.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information during a session.
#[derive(Debug, Clone, Default)]
pub struct ProgressInfo {
    /// Number of boxes attempted so far.
    pub items_processed: usize,
    /// Number of boxes placed so far.
    pub items_placed: usize,
    /// Total number of boxes.
    pub total_items: usize,
    /// Current utilization (0.0 to 1.0).
    pub utilization: f64,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Current phase/stage description.
    pub phase: String,
    /// Whether the session is still running.
    pub running: bool,
}

impl ProgressInfo {
    /// Creates a new progress info with default values.
    pub fn new() -> Self {
        Self {
            running: true,
            ..Default::default()
        }
    }

    /// Sets the item counters.
    pub fn with_items(mut self, processed: usize, placed: usize, total: usize) -> Self {
        self.items_processed = processed;
        self.items_placed = placed;
        self.total_items = total;
        self
    }

    /// Sets the utilization.
    pub fn with_utilization(mut self, utilization: f64) -> Self {
        self.utilization = utilization;
        self
    }

    /// Sets the elapsed time.
    pub fn with_elapsed(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    /// Sets the phase description.
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    /// Marks the session as finished.
    pub fn finished(mut self) -> Self {
        self.running = false;
        self
    }

    /// Fraction of boxes attempted (0.0 to 1.0).
    pub fn progress_percent(&self) -> f64 {
        if self.total_items > 0 {
            self.items_processed as f64 / self.total_items as f64
        } else {
            0.0
        }
    }
}

/// Trait for placers that run a whole box sequence.
pub trait Solver {
    /// Returns the active configuration.
    fn config(&self) -> &Config;

    /// Validates, orders and places every box.
    fn run(&mut self, items: &[BoxSpec]) -> Result<SessionResult>;

    /// Same as [`Solver::run`], reporting progress after every box.
    fn run_with_progress(
        &mut self,
        items: &[BoxSpec],
        callback: ProgressCallback,
    ) -> Result<SessionResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[BoxSpec]) -> Vec<&str> {
        items.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert_eq!(config.max_lift_weight, MAX_LIFT_WEIGHT);
        assert_eq!(config.ordering, OrderingPolicy::AccessibleThenHeaviest);

        let config = config
            .with_max_lift_weight(25.0)
            .with_ordering(OrderingPolicy::AsGiven);
        assert_eq!(config.max_lift_weight, 25.0);
        assert_eq!(config.ordering, OrderingPolicy::AsGiven);
    }

    #[test]
    fn test_config_validate_lift_limit() {
        assert!(Config::new().validate().is_ok());
        assert!(Config::new().with_max_lift_weight(0.0).validate().is_ok());

        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            assert!(matches!(
                Config::new().with_max_lift_weight(bad).validate(),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_accessible_then_heaviest() {
        let mut items = vec![
            BoxSpec::cube("light_hidden", 1).with_weight(1.0),
            BoxSpec::cube("heavy_hidden", 1).with_weight(9.0),
            BoxSpec::cube("light_open", 1)
                .with_weight(2.0)
                .with_accessible(true),
            BoxSpec::cube("heavy_open", 1)
                .with_weight(8.0)
                .with_accessible(true),
        ];

        OrderingPolicy::AccessibleThenHeaviest.apply(&mut items);
        assert_eq!(
            ids(&items),
            vec!["heavy_open", "light_open", "heavy_hidden", "light_hidden"]
        );
    }

    #[test]
    fn test_ordering_ties_are_stable() {
        let mut items = vec![
            BoxSpec::cube("first", 1).with_weight(3.0),
            BoxSpec::cube("second", 1).with_weight(3.0),
        ];
        OrderingPolicy::AccessibleThenHeaviest.apply(&mut items);
        assert_eq!(ids(&items), vec!["first", "second"]);
    }

    #[test]
    fn test_as_given_keeps_order() {
        let mut items = vec![
            BoxSpec::cube("a", 1).with_weight(1.0),
            BoxSpec::cube("b", 1).with_weight(5.0).with_accessible(true),
        ];
        OrderingPolicy::AsGiven.apply(&mut items);
        assert_eq!(ids(&items), vec!["a", "b"]);
    }

    #[test]
    fn test_progress_percent() {
        let info = ProgressInfo::new().with_items(3, 2, 4);
        assert!((info.progress_percent() - 0.75).abs() < 1e-9);
        assert!(info.running);
        assert!(!info.finished().running);
        assert_eq!(ProgressInfo::new().progress_percent(), 0.0);
    }
}

//! Post-run verification of a placement ledger.
//!
//! The placer enforces bounds, overlap and support while it searches. This
//! module re-derives the same guarantees from the ledger alone, without the
//! grid, so a finished session can be audited independently.
//!
//! # Support Models
//!
//! 1. **Full Base Support**: every base cell must rest on another box (what the
//!    placer enforces)
//! 2. **Partial Base Support**: a configurable fraction of base cells must be
//!    supported
//!
//! Boxes on the floor are always supported.
//!
//! # Example
//!
//! ```
//! use u_stacking_core::{BoxSpec, Origin, PlacedBox, Room};
//! use u_stacking_d3::stability::{StabilityAnalyzer, StabilityConstraint};
//!
//! let placed = vec![
//!     PlacedBox::new(BoxSpec::new("base", 2, 2, 1), Origin::new(0, 0, 0)),
//!     PlacedBox::new(BoxSpec::cube("top", 1), Origin::new(1, 1, 1)),
//! ];
//! let report = StabilityAnalyzer::new(StabilityConstraint::FullBase)
//!     .analyze(&Room::cube(2), &placed);
//! assert!(report.is_valid());
//! ```

use u_stacking_core::{BoxId, PlacedBox, Room};

use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Support requirement checked for boxes above the floor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StabilityConstraint {
    /// No support checking; bounds and overlap are still verified.
    None,

    /// Every base cell must have an occupied cell directly beneath it.
    #[default]
    FullBase,

    /// At least `min_ratio` (0.0-1.0) of the base cells must be supported.
    PartialBase {
        /// Minimum support ratio (0.0-1.0).
        min_ratio: f64,
    },
}

impl StabilityConstraint {
    /// Creates a partial base support constraint with the given ratio.
    pub fn partial_base(min_ratio: f64) -> Self {
        Self::PartialBase {
            min_ratio: min_ratio.clamp(0.0, 1.0),
        }
    }

    /// Returns true if this constraint requires checking.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }

    fn is_satisfied(&self, supported: u64, base: u64) -> bool {
        match self {
            Self::None => true,
            Self::FullBase => supported == base,
            Self::PartialBase { min_ratio } => supported as f64 >= *min_ratio * base as f64,
        }
    }
}

/// A broken ledger invariant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InvariantViolation {
    /// The box extends outside the room.
    OutOfBounds {
        /// Offending box.
        id: BoxId,
    },
    /// Two boxes share at least one cell.
    Overlap {
        /// Earlier box in commit order.
        first: BoxId,
        /// Later box in commit order.
        second: BoxId,
    },
    /// The box does not meet the support constraint.
    Unsupported {
        /// Offending box.
        id: BoxId,
        /// Base cells resting on another box.
        supported_cells: u64,
        /// Total base cells.
        base_cells: u64,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { id } => write!(f, "box '{}' extends outside the room", id),
            Self::Overlap { first, second } => {
                write!(f, "boxes '{}' and '{}' overlap", first, second)
            }
            Self::Unsupported {
                id,
                supported_cells,
                base_cells,
            } => write!(
                f,
                "box '{}' is supported on {} of {} base cells",
                id, supported_cells, base_cells
            ),
        }
    }
}

/// Result of stability analysis for a single box.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StabilityResult {
    /// Box identifier.
    pub id: BoxId,
    /// Whether the box meets the support constraint.
    pub is_stable: bool,
    /// Base cells resting on another box (all of them on the floor).
    pub supported_cells: u64,
    /// Supported base cells / base cells (1.0 on the floor).
    pub support_ratio: f64,
    /// Boxes whose top face carries this box.
    pub supported_by: Vec<BoxId>,
}

/// Complete report for a ledger.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StabilityReport {
    /// Individual results in ledger order.
    pub results: Vec<StabilityResult>,
    /// Every broken invariant found.
    pub violations: Vec<InvariantViolation>,
    /// Number of stable boxes.
    pub stable_count: usize,
    /// Number of unstable boxes.
    pub unstable_count: usize,
    /// Minimum support ratio among all boxes.
    pub min_support_ratio: f64,
    /// Analysis time in milliseconds.
    pub analysis_time_ms: u64,
}

impl StabilityReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            violations: Vec::new(),
            stable_count: 0,
            unstable_count: 0,
            min_support_ratio: 1.0,
            analysis_time_ms: 0,
        }
    }

    /// Returns true if no invariant is broken.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns true if all boxes are stable.
    pub fn is_all_stable(&self) -> bool {
        self.unstable_count == 0
    }

    /// Returns the unstable boxes.
    pub fn unstable_boxes(&self) -> Vec<&StabilityResult> {
        self.results.iter().filter(|r| !r.is_stable).collect()
    }
}

impl Default for StabilityReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Verifies bounds, overlap and support for a list of placed boxes.
#[derive(Debug, Clone, Default)]
pub struct StabilityAnalyzer {
    constraint: StabilityConstraint,
}

impl StabilityAnalyzer {
    /// Creates a new analyzer with the given constraint.
    pub fn new(constraint: StabilityConstraint) -> Self {
        Self { constraint }
    }

    /// Returns the active constraint.
    pub fn constraint(&self) -> StabilityConstraint {
        self.constraint
    }

    /// Analyzes a ledger against the room it was built in.
    pub fn analyze(&self, room: &Room, placed: &[PlacedBox]) -> StabilityReport {
        let start = Instant::now();
        let mut report = StabilityReport::new();

        for p in placed {
            if !room.contains(&p.footprint()) {
                report
                    .violations
                    .push(InvariantViolation::OutOfBounds { id: p.id().clone() });
            }
        }

        for (i, a) in placed.iter().enumerate() {
            let fa = a.footprint();
            for b in &placed[i + 1..] {
                if fa.intersects(&b.footprint()) {
                    report.violations.push(InvariantViolation::Overlap {
                        first: a.id().clone(),
                        second: b.id().clone(),
                    });
                }
            }
        }

        for p in placed {
            let result = self.check_support(p, placed);
            if result.is_stable {
                report.stable_count += 1;
            } else {
                report.unstable_count += 1;
            }
            report.min_support_ratio = report.min_support_ratio.min(result.support_ratio);
            report.results.push(result);
        }

        report.violations.extend(
            report
                .results
                .iter()
                .zip(placed)
                .filter(|(r, _)| !r.is_stable)
                .map(|(r, p)| InvariantViolation::Unsupported {
                    id: r.id.clone(),
                    supported_cells: r.supported_cells,
                    base_cells: p.item.base_area(),
                }),
        );

        report.analysis_time_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Computes how much of `target`'s base rests on the other boxes.
    fn check_support(&self, target: &PlacedBox, placed: &[PlacedBox]) -> StabilityResult {
        let id = target.id().clone();
        if target.on_floor() {
            return StabilityResult {
                id,
                is_stable: true,
                supported_cells: target.item.base_area(),
                support_ratio: 1.0,
                supported_by: Vec::new(),
            };
        }

        let footprint = target.footprint();
        let below = target.origin.z - 1;
        let supporters: Vec<&PlacedBox> = placed
            .iter()
            .filter(|p| p.id() != target.id() && p.footprint().top() == target.origin.z)
            .filter(|p| {
                let fp = p.footprint();
                footprint
                    .base_cells()
                    .any(|(x, y)| fp.contains_cell(x, y, below))
            })
            .collect();

        let base_cells = target.item.base_area();
        let supported = footprint
            .base_cells()
            .filter(|&(x, y)| {
                supporters
                    .iter()
                    .any(|s| s.footprint().contains_cell(x, y, below))
            })
            .count() as u64;

        StabilityResult {
            id,
            is_stable: self.constraint.is_satisfied(supported, base_cells),
            supported_cells: supported,
            support_ratio: supported as f64 / base_cells as f64,
            supported_by: supporters.iter().map(|s| s.id().clone()).collect(),
        }
    }
}

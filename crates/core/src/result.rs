//! Placement outcomes and session results.

use crate::geometry::{BoxId, Origin};
use crate::placement::PlacedBox;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a box was left out of the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RejectReason {
    /// The box weighs more than the robot can lift.
    TooHeavy,
    /// No legal origin exists given the current occupancy.
    NoValidPosition,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::TooHeavy => write!(f, "too heavy"),
            RejectReason::NoValidPosition => write!(f, "no valid position"),
        }
    }
}

/// Result of a single placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlacementOutcome {
    /// The box was committed at this origin.
    Placed(Origin),
    /// The box was skipped and the room is unchanged.
    Rejected(RejectReason),
}

impl PlacementOutcome {
    /// Returns true if the box was placed.
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    /// Returns the origin for placed boxes.
    pub fn origin(&self) -> Option<Origin> {
        match self {
            Self::Placed(origin) => Some(*origin),
            Self::Rejected(_) => None,
        }
    }

    /// Returns the reject reason for skipped boxes.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Placed(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Result of running a whole box sequence through a placer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionResult {
    /// Every attempt in processing order.
    pub outcomes: Vec<(BoxId, PlacementOutcome)>,

    /// Committed boxes in commit order.
    pub placements: Vec<PlacedBox>,

    /// Boxes that were skipped, with the reason.
    pub rejected: Vec<(BoxId, RejectReason)>,

    /// Occupied cells / room cells (0.0 - 1.0).
    pub utilization: f64,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,

    /// Ordering policy applied before placement.
    pub ordering: Option<String>,
}

impl SessionResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            placements: Vec::new(),
            rejected: Vec::new(),
            utilization: 0.0,
            computation_time_ms: 0,
            ordering: None,
        }
    }

    /// Returns true if every box was placed.
    pub fn all_placed(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Returns the number of placed boxes.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of rejected boxes.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Returns the number of boxes rejected for the given reason.
    pub fn rejected_for(&self, reason: RejectReason) -> usize {
        self.rejected.iter().filter(|(_, r)| *r == reason).count()
    }

    /// Looks up the outcome for a box id.
    pub fn outcome_of(&self, id: &str) -> Option<PlacementOutcome> {
        self.outcomes
            .iter()
            .find(|(box_id, _)| box_id == id)
            .map(|(_, outcome)| *outcome)
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization * 100.0)
    }

    /// Records an attempt.
    pub fn record(&mut self, id: BoxId, outcome: PlacementOutcome) {
        if let PlacementOutcome::Rejected(reason) = outcome {
            self.rejected.push((id.clone(), reason));
        }
        self.outcomes.push((id, outcome));
    }
}

impl Default for SessionResult {
    fn default() -> Self {
        Self::new()
    }
}

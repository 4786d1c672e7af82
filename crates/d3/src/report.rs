//! Read-only view of the placement ledger.

use u_stacking_core::{BoxId, Origin, PlacedBox, Room};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One committed placement, flattened for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedgerEntry {
    /// Id of the placed box.
    pub box_id: BoxId,
    /// Origin X.
    pub x: u32,
    /// Origin Y.
    pub y: u32,
    /// Origin Z.
    pub z: u32,
}

impl LedgerEntry {
    /// Returns the origin of the entry.
    pub fn origin(&self) -> Origin {
        Origin::new(self.x, self.y, self.z)
    }
}

impl From<&PlacedBox> for LedgerEntry {
    fn from(placed: &PlacedBox) -> Self {
        Self {
            box_id: placed.item.id.clone(),
            x: placed.origin.x,
            y: placed.origin.y,
            z: placed.origin.z,
        }
    }
}

/// Exposes the room state after (or during) a session.
#[derive(Debug, Clone, Copy)]
pub struct RoomStateReporter<'a> {
    room: &'a Room,
    placed: &'a [PlacedBox],
}

impl<'a> RoomStateReporter<'a> {
    /// Creates a reporter over a ledger.
    pub fn new(room: &'a Room, placed: &'a [PlacedBox]) -> Self {
        Self { room, placed }
    }

    /// Placements in commit order.
    pub fn ledger(&self) -> Vec<LedgerEntry> {
        self.placed.iter().map(LedgerEntry::from).collect()
    }

    /// Full placement records in commit order.
    pub fn placed_boxes(&self) -> &'a [PlacedBox] {
        self.placed
    }

    /// Looks up where a box was placed.
    pub fn position_of(&self, id: &str) -> Option<Origin> {
        self.placed
            .iter()
            .find(|p| p.item.id == id)
            .map(|p| p.origin)
    }

    /// Number of placed boxes.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Returns true if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Total weight resting in the room.
    pub fn total_weight(&self) -> f64 {
        self.placed.iter().map(|p| p.item.weight).sum()
    }

    /// Placed volume / room volume.
    pub fn utilization(&self) -> f64 {
        let used: u64 = self.placed.iter().map(|p| p.item.volume()).sum();
        used as f64 / self.room.volume() as f64
    }
}

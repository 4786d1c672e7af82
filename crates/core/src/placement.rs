//! Committed placement records.

use crate::footprint::Footprint;
use crate::geometry::{BoxId, BoxSpec, Origin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A box committed to the room at a fixed origin.
///
/// Records are created once, when a placement is committed, and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedBox {
    /// The placed box.
    pub item: BoxSpec,
    /// Minimum corner of the box in the room.
    pub origin: Origin,
}

impl PlacedBox {
    /// Creates a new placement record.
    pub fn new(item: BoxSpec, origin: Origin) -> Self {
        Self { item, origin }
    }

    /// Returns the id of the placed box.
    pub fn id(&self) -> &BoxId {
        &self.item.id
    }

    /// Cells occupied by the box.
    pub fn footprint(&self) -> Footprint {
        Footprint::of(&self.item, self.origin)
    }

    /// Returns true if the box rests on the floor.
    pub fn on_floor(&self) -> bool {
        self.origin.on_floor()
    }
}

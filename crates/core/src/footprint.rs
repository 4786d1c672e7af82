//! Integer axis-aligned cell ranges.

use crate::geometry::{BoxSpec, Origin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half-open cell range `[min, max)` on each axis.
///
/// This is the set of cells a box occupies at a given origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Footprint {
    /// Minimum corner (inclusive).
    pub min: [u32; 3],
    /// Maximum corner (exclusive).
    pub max: [u32; 3],
}

impl Footprint {
    /// Creates a new footprint.
    pub const fn new(min: [u32; 3], max: [u32; 3]) -> Self {
        Self { min, max }
    }

    /// Footprint of `item` placed at `origin`.
    ///
    /// Saturates instead of overflowing, so an oversized box still falls
    /// outside any room.
    pub fn of(item: &BoxSpec, origin: Origin) -> Self {
        Self {
            min: [origin.x, origin.y, origin.z],
            max: [
                origin.x.saturating_add(item.width),
                origin.y.saturating_add(item.depth),
                origin.z.saturating_add(item.height),
            ],
        }
    }

    /// Checks if this footprint shares at least one cell with another.
    pub fn intersects(&self, other: &Footprint) -> bool {
        self.min[0] < other.max[0]
            && self.max[0] > other.min[0]
            && self.min[1] < other.max[1]
            && self.max[1] > other.min[1]
            && self.min[2] < other.max[2]
            && self.max[2] > other.min[2]
    }

    /// Checks if this footprint is fully contained within another.
    pub fn is_within(&self, other: &Footprint) -> bool {
        self.min[0] >= other.min[0]
            && self.min[1] >= other.min[1]
            && self.min[2] >= other.min[2]
            && self.max[0] <= other.max[0]
            && self.max[1] <= other.max[1]
            && self.max[2] <= other.max[2]
    }

    /// Checks if the cell lies inside this footprint.
    pub fn contains_cell(&self, x: u32, y: u32, z: u32) -> bool {
        (self.min[0]..self.max[0]).contains(&x)
            && (self.min[1]..self.max[1]).contains(&y)
            && (self.min[2]..self.max[2]).contains(&z)
    }

    /// Number of cells covered.
    pub fn volume(&self) -> u64 {
        (0..3)
            .map(|axis| u64::from(self.max[axis].saturating_sub(self.min[axis])))
            .product()
    }

    /// The z layer just above the top face.
    pub fn top(&self) -> u32 {
        self.max[2]
    }

    /// Iterates the `(x, y)` columns of the base layer.
    pub fn base_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.min[0]..self.max[0])
            .flat_map(move |x| (self.min[1]..self.max[1]).map(move |y| (x, y)))
    }

    /// Iterates every covered cell, x-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        self.base_cells()
            .flat_map(move |(x, y)| (self.min[2]..self.max[2]).map(move |z| (x, y, z)))
    }
}

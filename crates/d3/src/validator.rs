//! Geometric legality of a candidate placement.
//!
//! A placement is legal when the box stays inside the room, every cell it
//! would cover is empty, and (above the floor) every column of its base sits
//! on an occupied cell. Bounds are always checked first so the later checks
//! never index outside the grid.

use crate::grid::SpatialGrid;
use u_stacking_core::{BoxSpec, Footprint, Origin};

/// The first check a candidate placement fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The box would extend past a room wall or the ceiling.
    OutOfBounds,
    /// The cell is already occupied.
    Overlap {
        /// Offending cell.
        cell: (u32, u32, u32),
    },
    /// The cell under this base column is empty.
    Unsupported {
        /// Base column missing support.
        column: (u32, u32),
    },
}

/// Returns the first failing check for `item` at `origin`, or `None` if the
/// placement is legal.
pub fn diagnose(grid: &SpatialGrid, origin: Origin, item: &BoxSpec) -> Option<Violation> {
    let footprint = Footprint::of(item, origin);
    let room = grid.room();

    // u64 so huge boxes cannot wrap around
    if u64::from(origin.x) + u64::from(item.width) > u64::from(room.width)
        || u64::from(origin.y) + u64::from(item.depth) > u64::from(room.depth)
        || u64::from(origin.z) + u64::from(item.height) > u64::from(room.height)
    {
        return Some(Violation::OutOfBounds);
    }

    if let Some(cell) = footprint
        .cells()
        .find(|&(x, y, z)| grid.is_occupied(x, y, z))
    {
        return Some(Violation::Overlap { cell });
    }

    if origin.z > 0 {
        let below = origin.z - 1;
        if let Some(column) = footprint
            .base_cells()
            .find(|&(x, y)| !grid.is_occupied(x, y, below))
        {
            return Some(Violation::Unsupported { column });
        }
    }

    None
}

/// Returns true if `item` can be committed at `origin`.
pub fn can_place(grid: &SpatialGrid, origin: Origin, item: &BoxSpec) -> bool {
    diagnose(grid, origin, item).is_none()
}

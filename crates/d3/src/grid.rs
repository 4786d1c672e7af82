//! Cell occupancy for a room.
//!
//! The grid is a flat arena: one slot per cell, each either empty or a 1-based
//! index into the table of box ids committed so far. Cells are laid out
//! x-major, so a z column is contiguous.

use std::num::NonZeroU32;
use u_stacking_core::{BoxId, BoxSpec, Error, Footprint, Origin, Result, Room};

/// 3D occupancy state of a room.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    room: Room,
    cells: Vec<Option<NonZeroU32>>,
    ids: Vec<BoxId>,
    occupied: u64,
}

impl SpatialGrid {
    /// Creates an empty grid covering the room.
    pub fn new(room: Room) -> Result<Self> {
        room.validate()?;
        let too_large = || Error::InvalidRoom(format!("room {} is too large", room));
        let len = usize::try_from(room.volume()).map_err(|_| too_large())?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.resize(len, None);

        Ok(Self {
            room,
            cells,
            ids: Vec::new(),
            occupied: 0,
        })
    }

    /// Returns the room this grid covers.
    pub fn room(&self) -> &Room {
        &self.room
    }

    /// Returns `(width, depth, height)`.
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.room.width, self.room.depth, self.room.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let (_, depth, height) = self.dimensions();
        ((x as usize * depth as usize) + y as usize) * height as usize + z as usize
    }

    /// Returns the id of the box occupying a cell, or `None` if it is empty.
    pub fn cell(&self, x: u32, y: u32, z: u32) -> Result<Option<&BoxId>> {
        if !self.room.contains_cell(x, y, z) {
            return Err(Error::OutOfBounds { x, y, z });
        }
        Ok(self.cells[self.index(x, y, z)].map(|slot| &self.ids[slot.get() as usize - 1]))
    }

    /// Returns true if the cell is inside the room and occupied.
    #[inline]
    pub fn is_occupied(&self, x: u32, y: u32, z: u32) -> bool {
        self.room.contains_cell(x, y, z) && self.cells[self.index(x, y, z)].is_some()
    }

    /// Marks every cell of `item` at `origin` as occupied by it.
    ///
    /// Legality (overlap, support) is the caller's responsibility; only room
    /// containment is checked.
    pub fn occupy(&mut self, origin: Origin, item: &BoxSpec) -> Result<()> {
        let footprint = Footprint::of(item, origin);
        if !self.room.contains(&footprint) {
            return Err(Error::OutOfBounds {
                x: footprint.max[0].saturating_sub(1),
                y: footprint.max[1].saturating_sub(1),
                z: footprint.max[2].saturating_sub(1),
            });
        }

        let slot = u32::try_from(self.ids.len() + 1)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| Error::Internal("box table is full".to_string()))?;
        self.ids.push(item.id.clone());

        for (x, y, z) in footprint.cells() {
            let idx = self.index(x, y, z);
            self.cells[idx] = Some(slot);
        }
        self.occupied += footprint.volume();

        Ok(())
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> u64 {
        self.occupied
    }

    /// Number of boxes committed to the grid.
    pub fn box_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no box has been committed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Occupied cells / room cells.
    pub fn fill_ratio(&self) -> f64 {
        self.occupied as f64 / self.room.volume() as f64
    }
}

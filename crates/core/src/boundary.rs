//! Room dimensions.

use crate::error::{Error, Result};
use crate::footprint::Footprint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bounded rectangular room measured in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Room {
    /// Cells along X.
    pub width: u32,
    /// Cells along Y.
    pub depth: u32,
    /// Cells along Z.
    pub height: u32,
}

impl Room {
    /// Creates a new room.
    pub const fn new(width: u32, depth: u32, height: u32) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// Creates a cubic room.
    pub const fn cube(side: u32) -> Self {
        Self::new(side, side, side)
    }

    /// Total number of cells.
    pub fn volume(&self) -> u64 {
        u64::from(self.width) * u64::from(self.depth) * u64::from(self.height)
    }

    /// Returns true if the cell lies inside the room.
    pub fn contains_cell(&self, x: u32, y: u32, z: u32) -> bool {
        x < self.width && y < self.depth && z < self.height
    }

    /// Returns true if the footprint lies entirely inside the room.
    pub fn contains(&self, footprint: &Footprint) -> bool {
        footprint.is_within(&self.bounds())
    }

    /// The footprint covering the whole room.
    pub fn bounds(&self) -> Footprint {
        Footprint::new([0, 0, 0], [self.width, self.depth, self.height])
    }

    /// Checks that every dimension is positive.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.depth == 0 || self.height == 0 {
            return Err(Error::InvalidRoom(format!(
                "room dimensions must be positive, got {}x{}x{}",
                self.width, self.depth, self.height
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.depth, self.height)
    }
}

impl std::str::FromStr for Room {
    type Err = Error;

    /// Parses `WxDxH`, e.g. `10x10x10`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(['x', 'X']).collect();
        if parts.len() != 3 {
            return Err(Error::InvalidRoom(format!(
                "expected WxDxH, got '{}'",
                s
            )));
        }

        let mut dims = [0u32; 3];
        for (slot, part) in dims.iter_mut().zip(&parts) {
            *slot = part.trim().parse().map_err(|_| {
                Error::InvalidRoom(format!("'{}' is not a valid dimension", part))
            })?;
        }

        let room = Room::new(dims[0], dims[1], dims[2]);
        room.validate()?;
        Ok(room)
    }
}

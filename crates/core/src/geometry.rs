//! Box and coordinate types.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a box.
pub type BoxId = String;

/// Default weight given to boxes built without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Minimum-corner cell coordinate of a placed box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Origin {
    /// Position along the room width.
    pub x: u32,
    /// Position along the room depth.
    pub y: u32,
    /// Position along the room height.
    pub z: u32,
}

impl Origin {
    /// Creates a new origin.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Returns true if the origin rests on the floor.
    pub fn on_floor(&self) -> bool {
        self.z == 0
    }
}

impl From<(u32, u32, u32)> for Origin {
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self::new(x, y, z)
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A rectangular box to be stacked.
///
/// Dimensions are in grid cells. `color` is cosmetic and never consulted by
/// placement logic; `accessible` is only used by ordering policies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxSpec {
    /// Unique identifier.
    pub id: BoxId,
    /// Extent along the room width.
    pub width: u32,
    /// Extent along the room depth.
    pub depth: u32,
    /// Extent along the room height.
    pub height: u32,
    /// Weight in mass units.
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: f64,
    /// Priority flag for accessible boxes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accessible: bool,
    /// Display color.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub color: Option<String>,
}

#[cfg(feature = "serde")]
fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl BoxSpec {
    /// Creates a new box with default weight, not accessible and no color.
    pub fn new(id: impl Into<BoxId>, width: u32, depth: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            depth,
            height,
            weight: DEFAULT_WEIGHT,
            accessible: false,
            color: None,
        }
    }

    /// Creates a cube with the given side.
    pub fn cube(id: impl Into<BoxId>, side: u32) -> Self {
        Self::new(id, side, side, side)
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the accessible flag.
    pub fn with_accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns the box id.
    pub fn id(&self) -> &BoxId {
        &self.id
    }

    /// Returns the box volume in cells.
    pub fn volume(&self) -> u64 {
        u64::from(self.width) * u64::from(self.depth) * u64::from(self.height)
    }

    /// Returns the base area in cells.
    pub fn base_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.depth)
    }

    /// Checks that the box can enter a room.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidBox("box id must not be empty".to_string()));
        }

        if self.width == 0 || self.depth == 0 || self.height == 0 {
            return Err(Error::InvalidBox(format!(
                "box '{}' has a zero dimension ({}x{}x{})",
                self.id, self.width, self.depth, self.height
            )));
        }

        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(Error::InvalidBox(format!(
                "box '{}' has invalid weight {}",
                self.id, self.weight
            )));
        }

        Ok(())
    }
}

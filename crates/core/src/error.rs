//! Error types shared by all U-Stacking crates.

use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the stacking engine.
///
/// Placement rejections (too heavy, no valid position) are not errors; they are
/// reported through [`crate::PlacementOutcome`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A grid query touched a cell outside the room.
    #[error("cell ({x}, {y}, {z}) is outside the room")]
    OutOfBounds {
        /// X index of the offending cell.
        x: u32,
        /// Y index of the offending cell.
        y: u32,
        /// Z index of the offending cell.
        z: u32,
    },

    /// A box failed validation.
    #[error("invalid box: {0}")]
    InvalidBox(String),

    /// A room failed validation.
    #[error("invalid room: {0}")]
    InvalidRoom(String),

    /// Placer configuration is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Two boxes in the same session share an id.
    #[error("duplicate box id '{0}'")]
    DuplicateId(String),

    /// Grid state no longer matches the placement ledger.
    #[error("internal error: {0}")]
    Internal(String),
}

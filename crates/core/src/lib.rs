//! # U-Stacking Core
//!
//! Core types and traits for the U-Stacking robot box-stacking engine.
//!
//! This crate provides the shared vocabulary used by the grid-based placer in
//! `u-stacking-d3` and by the simulation driver in `u-stacking-sim`.
//!
//! ## Core Components
//!
//! - **Boxes and rooms**: [`BoxSpec`], [`Room`], [`Origin`], [`Footprint`]
//! - **Ledger records**: [`PlacedBox`]
//! - **Outcomes**: [`PlacementOutcome`], [`RejectReason`], [`SessionResult`]
//! - **Solver trait**: [`Solver`] - common interface for session runners
//!
//! ## Configuration
//!
//! Use [`Config`] to configure the placer:
//!
//! ```rust
//! use u_stacking_core::{Config, OrderingPolicy};
//!
//! let config = Config::new()
//!     .with_max_lift_weight(12.5)
//!     .with_ordering(OrderingPolicy::AsGiven);
//! assert_eq!(config.max_lift_weight, 12.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod boundary;
pub mod error;
pub mod footprint;
pub mod geometry;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use boundary::Room;
pub use error::{Error, Result};
pub use footprint::Footprint;
pub use geometry::{BoxId, BoxSpec, Origin, DEFAULT_WEIGHT};
pub use placement::PlacedBox;
pub use result::{PlacementOutcome, RejectReason, SessionResult};
pub use solver::{
    Config, OrderingPolicy, ProgressCallback, ProgressInfo, Solver, MAX_LIFT_WEIGHT,
};

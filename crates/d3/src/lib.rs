//! # U-Stacking 3D
//!
//! Grid-based box placement for the U-Stacking robot stacking engine.
//!
//! A room is discretised into unit cells. Boxes are placed one at a time at
//! the first legal origin of a fixed scan, and stay there for the rest of the
//! session.
//!
//! ## Components
//!
//! - [`SpatialGrid`]: cell occupancy, mutated only by committing a placement
//! - [`validator`]: bounds, overlap and full-base support checks
//! - [`search`]: first-fit scan (`x` descending, then `y`, then `z` ascending)
//! - [`RobotPlacer`]: weight gate, search, commit-or-reject, whole sessions
//! - [`RoomStateReporter`]: read-only ledger for presentation layers
//! - [`stability`]: independent audit of a finished ledger
//!
//! ## Example
//!
//! ```
//! use u_stacking_d3::{BoxSpec, Origin, PlacementOutcome, RobotPlacer, Room};
//!
//! let mut placer = RobotPlacer::default_config(Room::cube(10)).unwrap();
//! let outcome = placer.simulate_placement(&BoxSpec::cube("crate", 3)).unwrap();
//! assert_eq!(outcome, PlacementOutcome::Placed(Origin::new(7, 0, 0)));
//! ```

pub mod grid;
pub mod placer;
pub mod report;
pub mod search;
pub mod stability;
pub mod validator;

// Re-exports
pub use grid::SpatialGrid;
pub use placer::RobotPlacer;
pub use report::{LedgerEntry, RoomStateReporter};
pub use search::find_position;
pub use stability::{InvariantViolation, StabilityAnalyzer, StabilityConstraint, StabilityReport};
pub use validator::{can_place, diagnose, Violation};
pub use u_stacking_core::{
    BoxSpec, Config, Error, OrderingPolicy, Origin, PlacedBox, PlacementOutcome, RejectReason,
    Result, Room, SessionResult, Solver,
};

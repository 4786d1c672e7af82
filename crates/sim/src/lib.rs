//! # U-Stacking Sim
//!
//! Drives [`RobotPlacer`](u_stacking_d3::RobotPlacer) sessions from scenario
//! files or random batches and reports the outcome.
//!
//! ## Example
//!
//! ```
//! use u_stacking_core::Room;
//! use u_stacking_sim::{Scenario, SessionRunner};
//!
//! let scenario = Scenario::new("demo", Room::cube(10)).with_generated(25, Some(42));
//! let report = SessionRunner::new().with_verify(true).run(&scenario).unwrap();
//! assert_eq!(report.total(), 25);
//! ```

pub mod generator;
pub mod runner;
pub mod scenario;

pub use generator::{BoxGenerator, GeneratorConfig, COLORS};
pub use runner::{OutcomeRecord, SessionRunner, SimulationReport};
pub use scenario::{GenerateSpec, Scenario, ScenarioError};

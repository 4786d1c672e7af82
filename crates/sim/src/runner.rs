//! Session runner for scenarios.

use crate::scenario::{Scenario, ScenarioError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Instant;
use u_stacking_core::{BoxId, OrderingPolicy, PlacementOutcome, RejectReason, Room, Solver};
use u_stacking_d3::{
    InvariantViolation, LedgerEntry, RobotPlacer, StabilityAnalyzer, StabilityConstraint,
};

/// One processed box, in processing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Box id.
    pub box_id: BoxId,
    /// Box weight.
    pub weight: f64,
    /// What happened to the box.
    pub outcome: PlacementOutcome,
}

impl OutcomeRecord {
    /// Human-readable line for console output.
    pub fn describe(&self, max_lift_weight: f64) -> String {
        match self.outcome {
            PlacementOutcome::Placed(origin) => {
                format!("placed box '{}' at {}", self.box_id, origin)
            }
            PlacementOutcome::Rejected(RejectReason::TooHeavy) => format!(
                "box '{}' is too heavy to lift ({} > {})",
                self.box_id, self.weight, max_lift_weight
            ),
            PlacementOutcome::Rejected(RejectReason::NoValidPosition) => {
                format!("no valid position for box '{}'", self.box_id)
            }
        }
    }
}

/// Everything a finished session produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Scenario name.
    pub scenario: String,
    /// Room that was filled.
    pub room: Room,
    /// Ordering policy applied.
    pub ordering: OrderingPolicy,
    /// Lift limit in force.
    pub max_lift_weight: f64,
    /// Per-box outcomes in processing order.
    pub outcomes: Vec<OutcomeRecord>,
    /// Final room state in commit order.
    pub ledger: Vec<LedgerEntry>,
    /// Number of placed boxes.
    pub placed: usize,
    /// Boxes rejected for weight.
    pub rejected_too_heavy: usize,
    /// Boxes rejected for lack of space.
    pub rejected_no_position: usize,
    /// Occupied cells / room cells.
    pub utilization: f64,
    /// Wall-clock time in milliseconds.
    pub computation_time_ms: u64,
    /// Broken invariants (only filled when verification ran).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<InvariantViolation>,
}

impl SimulationReport {
    /// Total number of boxes processed.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of rejected boxes.
    pub fn rejected(&self) -> usize {
        self.rejected_too_heavy + self.rejected_no_position
    }

    /// Utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization * 100.0)
    }

    /// Prints one line per processed box.
    pub fn print_outcomes(&self) {
        for record in &self.outcomes {
            println!("{}", record.describe(self.max_lift_weight));
        }
    }

    /// Prints the final room state and the counters.
    pub fn print_summary(&self) {
        println!("\nFinal room state ({}):", self.room);
        for entry in &self.ledger {
            println!(
                " - box '{}' at ({}, {}, {})",
                entry.box_id, entry.x, entry.y, entry.z
            );
        }

        println!("\nSummary: {}", self.scenario);
        println!("{:-<40}", "");
        println!("  Boxes:             {}", self.total());
        println!("  Placed:            {}", self.placed);
        println!("  Too heavy:         {}", self.rejected_too_heavy);
        println!("  No position:       {}", self.rejected_no_position);
        println!("  Utilization:       {}", self.utilization_percent());
        println!("  Time:              {} ms", self.computation_time_ms);
    }

    /// Saves the report as pretty JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| ScenarioError::Parse(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Runs scenarios through a [`RobotPlacer`].
#[derive(Debug, Clone, Default)]
pub struct SessionRunner {
    verify: bool,
}

impl SessionRunner {
    /// Creates a runner without post-run verification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-checks the finished ledger and fails on any broken invariant.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Runs one scenario from an empty room.
    pub fn run(&self, scenario: &Scenario) -> Result<SimulationReport, ScenarioError> {
        scenario.validate()?;
        let start = Instant::now();
        let boxes = scenario.resolve_boxes();
        log::info!(
            "running scenario '{}': {} boxes in a {} room",
            scenario.name,
            boxes.len(),
            scenario.room
        );

        let mut placer = RobotPlacer::new(scenario.room, scenario.config())?;
        let result = placer.run(&boxes)?;

        let outcomes = result
            .outcomes
            .iter()
            .map(|(id, outcome)| OutcomeRecord {
                box_id: id.clone(),
                weight: boxes
                    .iter()
                    .find(|b| &b.id == id)
                    .map(|b| b.weight)
                    .unwrap_or_default(),
                outcome: *outcome,
            })
            .collect();

        let violations = if self.verify {
            let report = StabilityAnalyzer::new(StabilityConstraint::FullBase)
                .analyze(placer.room(), placer.placed());
            for violation in &report.violations {
                log::error!("{}", violation);
            }
            report.violations
        } else {
            Vec::new()
        };

        let report = SimulationReport {
            scenario: scenario.name.clone(),
            room: scenario.room,
            ordering: scenario.ordering,
            max_lift_weight: scenario.max_lift_weight,
            outcomes,
            ledger: placer.reporter().ledger(),
            placed: result.placed_count(),
            rejected_too_heavy: result.rejected_for(RejectReason::TooHeavy),
            rejected_no_position: result.rejected_for(RejectReason::NoValidPosition),
            utilization: result.utilization,
            computation_time_ms: start.elapsed().as_millis() as u64,
            violations,
        };

        if let Some(first) = report.violations.first() {
            return Err(ScenarioError::Invariant(format!(
                "{} ({} violations in total)",
                first,
                report.violations.len()
            )));
        }

        Ok(report)
    }
}

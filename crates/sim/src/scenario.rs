//! Scenario files describing a stacking session.
//!
//! A scenario names a room, the robot's lift limit, the ordering policy and the
//! boxes to stack: an explicit list, a random batch, or both (explicit boxes
//! come first).
//!
//! ```toml
//! name = "warehouse_corner"
//! max_lift_weight = 10.0
//! ordering = "accessible_then_heaviest"
//!
//! [room]
//! width = 10
//! depth = 10
//! height = 10
//!
//! [generate]
//! count = 25
//! seed = 42
//!
//! [[boxes]]
//! id = "pallet"
//! width = 3
//! depth = 3
//! height = 1
//! weight = 8.5
//! accessible = true
//! ```

use crate::generator::{BoxGenerator, GeneratorConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use u_stacking_core::{BoxSpec, Config, OrderingPolicy, Room, MAX_LIFT_WEIGHT};

/// Errors raised while loading or running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be parsed or serialized.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The scenario describes an impossible room or malformed boxes.
    #[error("Invalid scenario: {0}")]
    Invalid(#[from] u_stacking_core::Error),

    /// A finished session failed verification.
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

/// Random batch appended to a scenario's explicit boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateSpec {
    /// Number of boxes to draw.
    pub count: usize,
    /// Seed for reproducible batches (entropy if absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Side and weight ranges.
    #[serde(flatten)]
    pub ranges: GeneratorConfig,
}

/// A complete session description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lift limit of the robot.
    #[serde(default = "default_max_lift_weight")]
    pub max_lift_weight: f64,
    /// Order in which boxes are fed to the placer.
    #[serde(default)]
    pub ordering: OrderingPolicy,
    /// Room to fill.
    pub room: Room,
    /// Random boxes to append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate: Option<GenerateSpec>,
    /// Explicit boxes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boxes: Vec<BoxSpec>,
}

fn default_max_lift_weight() -> f64 {
    MAX_LIFT_WEIGHT
}

impl Scenario {
    /// Creates an empty scenario for a room.
    pub fn new(name: impl Into<String>, room: Room) -> Self {
        Self {
            name: name.into(),
            description: None,
            max_lift_weight: MAX_LIFT_WEIGHT,
            ordering: OrderingPolicy::default(),
            room,
            generate: None,
            boxes: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the lift limit.
    pub fn with_max_lift_weight(mut self, weight: f64) -> Self {
        self.max_lift_weight = weight;
        self
    }

    /// Sets the ordering policy.
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets the explicit boxes.
    pub fn with_boxes(mut self, boxes: Vec<BoxSpec>) -> Self {
        self.boxes = boxes;
        self
    }

    /// Requests a random batch of `count` boxes.
    pub fn with_generated(mut self, count: usize, seed: Option<u64>) -> Self {
        self.generate = Some(GenerateSpec {
            count,
            seed,
            ranges: GeneratorConfig::default(),
        });
        self
    }

    /// Placer configuration for this scenario.
    pub fn config(&self) -> Config {
        Config::new()
            .with_max_lift_weight(self.max_lift_weight)
            .with_ordering(self.ordering)
    }

    /// Explicit boxes followed by the generated batch.
    pub fn resolve_boxes(&self) -> Vec<BoxSpec> {
        let mut boxes = self.boxes.clone();
        if let Some(spec) = &self.generate {
            let generator = match spec.seed {
                Some(seed) => BoxGenerator::with_seed(seed),
                None => BoxGenerator::new(),
            };
            boxes.extend(generator.with_config(spec.ranges.clone()).generate(spec.count));
        }
        boxes
    }

    /// Checks the room, the lift limit and every box.
    ///
    /// Seeded batches are resolved so that explicit ids colliding with
    /// generated ones fail here. An unseeded batch can only be checked when
    /// the session runs.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.room.validate()?;
        self.config().validate()?;

        let seeded = self.generate.as_ref().is_some_and(|spec| spec.seed.is_some());
        let resolved;
        let boxes = if seeded {
            resolved = self.resolve_boxes();
            &resolved
        } else {
            &self.boxes
        };

        let mut seen = HashSet::new();
        for item in boxes {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(u_stacking_core::Error::DuplicateId(item.id.clone()).into());
            }
        }
        Ok(())
    }

    /// Load a scenario from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a scenario from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario =
            toml::from_str(content).map_err(|e| ScenarioError::Parse(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        let scenario: Scenario =
            serde_json::from_str(&content).map_err(|e| ScenarioError::Parse(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario, picking the format from the file extension.
    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String, ScenarioError> {
        toml::to_string_pretty(self).map_err(|e| ScenarioError::Parse(e.to_string()))
    }

    /// Save the scenario as TOML.
    pub fn save_toml(&self, path: &Path) -> Result<(), ScenarioError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

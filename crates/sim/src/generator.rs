//! Random box sets for simulation runs.

use rand::prelude::*;
use serde::{Deserialize, Serialize};
use u_stacking_core::BoxSpec;

/// Colors boxes are drawn in.
pub const COLORS: [&str; 10] = [
    "red", "blue", "green", "yellow", "purple", "orange", "cyan", "magenta", "lime", "brown",
];

/// Ranges used when drawing random boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Largest side length in cells (sides are drawn from `1..=max_side`).
    pub max_side: u32,
    /// Lightest possible box.
    pub min_weight: f64,
    /// Heaviest possible box (exclusive).
    pub max_weight: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_side: 3,
            min_weight: 1.0,
            max_weight: 15.0,
        }
    }
}

impl GeneratorConfig {
    /// Sets the largest side length.
    pub fn with_max_side(mut self, max_side: u32) -> Self {
        self.max_side = max_side.max(1);
        self
    }

    /// Sets the weight range.
    pub fn with_weight_range(mut self, min: f64, max: f64) -> Self {
        self.min_weight = min.max(0.0);
        self.max_weight = max.max(self.min_weight);
        self
    }
}

/// Generator for random box sequences.
#[derive(Debug, Clone)]
pub struct BoxGenerator {
    rng: StdRng,
    config: GeneratorConfig,
}

impl BoxGenerator {
    /// Creates a new generator with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            config: GeneratorConfig::default(),
        }
    }

    /// Creates a new generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config: GeneratorConfig::default(),
        }
    }

    /// Replaces the generator ranges.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Draws `count` boxes.
    ///
    /// Ids follow `{color}_{w}x{d}x{h}_{n}` with `n` starting at 1, so they are
    /// unique within one call.
    pub fn generate(&mut self, count: usize) -> Vec<BoxSpec> {
        (0..count).map(|i| self.next_box(i + 1)).collect()
    }

    fn next_box(&mut self, serial: usize) -> BoxSpec {
        let max_side = self.config.max_side.max(1);
        let w = self.rng.gen_range(1..=max_side);
        let d = self.rng.gen_range(1..=max_side);
        let h = self.rng.gen_range(1..=max_side);
        let color = COLORS.choose(&mut self.rng).copied().unwrap_or(COLORS[0]);
        let weight = self.weight();
        let accessible = self.rng.gen_bool(0.5);

        BoxSpec::new(format!("{}_{}x{}x{}_{}", color, w, d, h, serial), w, d, h)
            .with_weight(weight)
            .with_accessible(accessible)
            .with_color(color)
    }

    /// Uniform weight rounded to one decimal.
    fn weight(&mut self) -> f64 {
        let GeneratorConfig {
            min_weight,
            max_weight,
            ..
        } = self.config;
        let raw = if max_weight > min_weight {
            self.rng.gen_range(min_weight..max_weight)
        } else {
            min_weight
        };
        (raw * 10.0).round() / 10.0
    }
}

impl Default for BoxGenerator {
    fn default() -> Self {
        Self::new()
    }
}

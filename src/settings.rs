//! Session settings
//!
//! Everything here is optional JSON; missing fields take their defaults.
//! Gameplay rules are fixed in `consts` and deliberately not exposed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_WORLD_SIZE, WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::World;

/// Host and session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play field width
    pub world_width: f32,
    /// Play field height
    pub world_height: f32,
    /// Fixed run seed; random when absent
    pub seed: Option<u64>,

    // === Headless host ===
    /// Simulated frame spacing (ms)
    pub frame_interval_ms: f64,
    /// Stop after this many frames even without an outcome
    pub max_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            seed: None,
            frame_interval_ms: 1000.0 / 60.0,
            max_frames: 60 * 60 * 10,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// World bounds, falling back to the defaults for sizes the player cannot fit in
    pub fn world(&self) -> World {
        let width = if self.world_width >= MIN_WORLD_SIZE {
            self.world_width
        } else {
            log::warn!("Ignoring world_width {}, using {}", self.world_width, WORLD_WIDTH);
            WORLD_WIDTH
        };
        let height = if self.world_height >= MIN_WORLD_SIZE {
            self.world_height
        } else {
            log::warn!("Ignoring world_height {}, using {}", self.world_height, WORLD_HEIGHT);
            WORLD_HEIGHT
        };
        World::new(width, height)
    }

    /// Load settings from a JSON file, using defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

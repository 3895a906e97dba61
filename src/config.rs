//! Game configuration
//!
//! Tunable constants for the playfield, physics and game rules. Loaded from
//! JSON; every field falls back to its default when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::FRAMES_PER_SECOND;

/// Playfield dimensions (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
        }
    }
}

/// Per-frame physics constants
///
/// Units are pixels and frames: gravity is added to vertical velocity once
/// per frame, velocity is added to position once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration (px/frame²)
    pub gravity: f32,
    /// Damping applied to velocity on wall and pin bounces
    pub bounce: f32,
    pub ball_radius: f32,
    pub pin_radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.2,
            bounce: 0.6,
            ball_radius: 10.0,
            pin_radius: 5.0,
        }
    }
}

/// Inventory, level and pin-roll rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Ball inventory at the start of a new game
    pub starting_balls: u32,
    /// Balls added to the inventory whenever a level starts
    pub balls_per_level: u32,
    /// Balls may only be dropped above this line
    pub drop_zone_height: f32,
    /// Chance a pin rolls as bonus-A (extra balls)
    pub bonus_a_chance: f32,
    /// Chance a non-bonus-A pin rolls as bonus-B (credit)
    pub bonus_b_chance: f32,
    /// Frames between clearing a level and starting the next
    pub level_transition_frames: u32,
    pub bucket_count: u32,
    /// Pins on a level = base_pin_count + pins_per_level * level
    pub base_pin_count: u32,
    pub pins_per_level: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_balls: 15,
            balls_per_level: 5,
            drop_zone_height: 150.0,
            bonus_a_chance: 0.1,
            bonus_b_chance: 0.1,
            level_transition_frames: 2 * FRAMES_PER_SECOND,
            bucket_count: 5,
            base_pin_count: 30,
            pins_per_level: 5,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: Playfield,
    pub physics: PhysicsConfig,
    pub rules: RulesConfig,
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from a JSON file, falling back to defaults if the
    /// file is missing or malformed
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

//! Game rules and presentation settings
//!
//! Persisted separately from level data as a small JSON file.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What happens when the player drops below the bottom of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FallPolicy {
    /// Take a hit (unless invincible) and return to the spawn point
    #[default]
    Respawn,
    /// The run ends immediately
    Lethal,
}

impl FallPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallPolicy::Respawn => "respawn",
            FallPolicy::Lethal => "lethal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "respawn" => Some(FallPolicy::Respawn),
            "lethal" | "instant" => Some(FallPolicy::Lethal),
            _ => None,
        }
    }
}

/// Rules and viewport settings for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fall_policy: FallPolicy,
    /// Health at the start of the run
    pub start_health: u32,
    /// Where the player starts and respawns (top-left)
    pub spawn_point: Vec2,

    // === World/viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Horizontal span of each level in world space
    pub level_width: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fall_policy: FallPolicy::Respawn,
            start_health: START_HEALTH,
            spawn_point: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            viewport_width: SCREEN_WIDTH,
            viewport_height: SCREEN_HEIGHT,
            level_width: LEVEL_WIDTH,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_json(&json).map_err(|e| e.to_string()));

        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }
}

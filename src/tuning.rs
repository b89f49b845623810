//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a level pack can ship its
//! own physics without recompiling. Missing fields fall back to `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ProjectileKind;

/// Speed, lifetime and fire rate for one projectile kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponTuning {
    /// Horizontal speed (pixels/tick)
    pub speed: f32,
    /// Ticks before the projectile expires
    pub lifetime: u32,
    /// Ticks between shots
    pub cooldown: u32,
    /// Square hitbox edge (pixels)
    pub size: f32,
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub player_speed: f32,
    pub jump_velocity: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Size multiplier applied by the dumbbell power-up
    pub grow_factor: f32,
    pub invincible_ticks: u32,
    pub stomp_tolerance: f32,
    pub enemy_size: f32,
    /// Ticks between shots for shooter enemies
    pub shooter_period: u32,
    pub puck: WeaponTuning,
    pub note: WeaponTuning,
    /// How long a level banner stays on the HUD
    pub banner_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            player_speed: PLAYER_SPEED,
            jump_velocity: JUMP_VELOCITY,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            grow_factor: 2.0,
            invincible_ticks: INVINCIBLE_TICKS,
            stomp_tolerance: STOMP_TOLERANCE,
            enemy_size: ENEMY_SIZE,
            shooter_period: SHOOTER_PERIOD,
            puck: WeaponTuning {
                speed: PUCK_SPEED,
                lifetime: PUCK_LIFETIME,
                cooldown: PUCK_COOLDOWN,
                size: PUCK_SIZE,
            },
            note: WeaponTuning {
                speed: NOTE_SPEED,
                lifetime: NOTE_LIFETIME,
                cooldown: NOTE_COOLDOWN,
                size: NOTE_SIZE,
            },
            banner_ticks: BANNER_TICKS,
        }
    }
}

impl Tuning {
    /// Weapon numbers for a projectile kind
    pub fn weapon(&self, kind: ProjectileKind) -> &WeaponTuning {
        match kind {
            ProjectileKind::Puck => &self.puck,
            ProjectileKind::Note => &self.note,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a tuning file, falling back to defaults if it is missing or malformed
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

//! Level/world composition
//!
//! Levels are authored in level-local coordinates and laid side by side:
//! level `i` is shifted right by `i × level_width`. The offset is applied
//! once, here, while building the `GameState`; nothing downstream knows a
//! level boundary exists except through `camera::level_index_at`.
//!
//! Level data is static configuration, so anything malformed is rejected
//! before a single entity is created.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::aabb::Aabb;
use super::camera::camera_offset;
use super::state::{
    Collectible, CollectibleKind, Enemy, EnemyKind, GameState, Patrol, Platform, PowerUp,
    PowerUpKind, ProjectileKind, Turret,
};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Bad level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("no levels supplied")]
    NoLevels,
    #[error("level width must be positive and finite, got {0}")]
    InvalidLevelWidth(f32),
    #[error("level {level}: {what} has non-positive size {w}x{h}")]
    NonPositiveSize {
        level: usize,
        what: String,
        w: f32,
        h: f32,
    },
    #[error("level {level}: {what} has negative patrol range {range}")]
    NegativeRange { level: usize, what: String, range: f32 },
    #[error("level {level}: {what} has invalid patrol speed {speed}")]
    InvalidSpeed { level: usize, what: String, speed: f32 },
    #[error("level {level}: {what} has a non-finite coordinate")]
    NonFinite { level: usize, what: String },
    #[error("level {level}: {what} at x={x} lies outside 0..{width}")]
    OutOfLevel {
        level: usize,
        what: String,
        x: f32,
        width: f32,
    },
    #[error("cannot read level file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static platform, top-left anchored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformPlacement {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Enemy spawn, top-left anchored; patrols `[x, x + range]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyPlacement {
    pub x: f32,
    pub y: f32,
    pub range: f32,
    pub speed: f32,
    #[serde(default)]
    pub kind: EnemyKind,
}

/// Power-up spawn, center anchored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpPlacement {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
}

fn default_value() -> u32 {
    1
}

/// Collectible spawn, center anchored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectiblePlacement {
    pub x: f32,
    pub y: f32,
    pub kind: CollectibleKind,
    #[serde(default = "default_value")]
    pub value: u32,
}

fn default_fallback_color() -> [u8; 3] {
    [200, 200, 200]
}

/// One level in level-local coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDesc {
    /// Banner text shown when the level comes into view
    pub name: String,
    /// Background image identifier
    #[serde(default)]
    pub background: String,
    /// Solid color used when the background image is unavailable
    #[serde(default = "default_fallback_color")]
    pub fallback_color: [u8; 3],
    #[serde(default)]
    pub platforms: Vec<PlatformPlacement>,
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
    #[serde(default)]
    pub powerups: Vec<PowerUpPlacement>,
    #[serde(default)]
    pub collectibles: Vec<CollectiblePlacement>,
}

/// Per-level metadata kept after the world is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub index: usize,
    pub name: String,
    pub background: String,
    pub fallback_color: [u8; 3],
    /// World x of the level's left edge
    pub offset_x: f32,
}

/// Parse a JSON array of level descriptions
pub fn parse_levels(json: &str) -> Result<Vec<LevelDesc>, LevelError> {
    Ok(serde_json::from_str(json)?)
}

fn check_finite(level: usize, what: &str, values: &[f32]) -> Result<(), LevelError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(LevelError::NonFinite {
            level,
            what: what.to_string(),
        })
    }
}

fn check_in_level(level: usize, what: &str, x: f32, width: f32) -> Result<(), LevelError> {
    if (0.0..width).contains(&x) {
        Ok(())
    } else {
        Err(LevelError::OutOfLevel {
            level,
            what: what.to_string(),
            x,
            width,
        })
    }
}

/// Reject anything that cannot come from a well-formed level table
fn validate_level(level: usize, desc: &LevelDesc, width: f32) -> Result<(), LevelError> {
    for (i, p) in desc.platforms.iter().enumerate() {
        let what = format!("platform {i}");
        check_finite(level, &what, &[p.x, p.y, p.w, p.h])?;
        if p.w <= 0.0 || p.h <= 0.0 {
            return Err(LevelError::NonPositiveSize {
                level,
                what,
                w: p.w,
                h: p.h,
            });
        }
        check_in_level(level, &what, p.x, width)?;
    }

    for (i, e) in desc.enemies.iter().enumerate() {
        let what = format!("enemy {i}");
        check_finite(level, &what, &[e.x, e.y, e.range, e.speed])?;
        if e.range < 0.0 {
            return Err(LevelError::NegativeRange {
                level,
                what,
                range: e.range,
            });
        }
        if e.speed < 0.0 {
            return Err(LevelError::InvalidSpeed {
                level,
                what,
                speed: e.speed,
            });
        }
        check_in_level(level, &what, e.x, width)?;
    }

    for (i, p) in desc.powerups.iter().enumerate() {
        let what = format!("power-up {i}");
        check_finite(level, &what, &[p.x, p.y])?;
        check_in_level(level, &what, p.x, width)?;
    }

    for (i, c) in desc.collectibles.iter().enumerate() {
        let what = format!("collectible {i}");
        check_finite(level, &what, &[c.x, c.y])?;
        check_in_level(level, &what, c.x, width)?;
    }

    Ok(())
}

/// Lay the levels out side by side and build the initial game state
pub fn build_world(
    levels: &[LevelDesc],
    tuning: Tuning,
    settings: Settings,
) -> Result<GameState, LevelError> {
    let width = settings.level_width;
    if !(width.is_finite() && width > 0.0) {
        return Err(LevelError::InvalidLevelWidth(width));
    }
    if levels.is_empty() {
        return Err(LevelError::NoLevels);
    }
    for (index, desc) in levels.iter().enumerate() {
        validate_level(index, desc, width)?;
    }

    let infos = levels
        .iter()
        .enumerate()
        .map(|(index, desc)| LevelInfo {
            index,
            name: desc.name.clone(),
            background: desc.background.clone(),
            fallback_color: desc.fallback_color,
            offset_x: index as f32 * width,
        })
        .collect();
    let mut state = GameState::new(tuning, settings, infos);

    let enemy_size = Vec2::splat(state.tuning.enemy_size);
    let shooter_period = state.tuning.shooter_period;

    for (index, desc) in levels.iter().enumerate() {
        let offset = index as f32 * width;

        for p in &desc.platforms {
            let id = state.next_entity_id();
            state.platforms.push(Platform {
                id,
                rect: Aabb::new(p.x + offset, p.y, p.w, p.h),
            });
        }

        for e in &desc.enemies {
            let id = state.next_entity_id();
            let x = e.x + offset;
            let turret = match e.kind {
                EnemyKind::Walker => None,
                EnemyKind::Shooter => Some(Turret {
                    kind: ProjectileKind::Puck,
                    cooldown: shooter_period,
                    period: shooter_period,
                }),
            };
            state.enemies.push(Enemy {
                id,
                kind: e.kind,
                rect: Aabb {
                    pos: Vec2::new(x, e.y),
                    size: enemy_size,
                },
                patrol: Patrol::new(x, e.range, e.speed),
                turret,
            });
        }

        for p in &desc.powerups {
            let id = state.next_entity_id();
            state.powerups.push(PowerUp {
                id,
                kind: p.kind,
                rect: Aabb::from_center(Vec2::new(p.x + offset, p.y), p.kind.size()),
            });
        }

        for c in &desc.collectibles {
            let id = state.next_entity_id();
            state.collectibles.push(Collectible {
                id,
                kind: c.kind,
                rect: Aabb::from_center(Vec2::new(c.x + offset, c.y), c.kind.size()),
                value: c.value,
            });
        }
    }

    state.camera.x = camera_offset(
        state.player.rect.center().x,
        state.settings.viewport_width,
        state.world_width(),
    );

    log::info!(
        "Built world: {} levels, {} platforms, {} enemies, {} power-ups, {} collectibles",
        state.level_count(),
        state.platforms.len(),
        state.enemies.len(),
        state.powerups.len(),
        state.collectibles.len()
    );

    Ok(state)
}

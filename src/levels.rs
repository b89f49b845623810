//! Built-in campaign and level file loading
//!
//! Eight levels, one screen wide each, all in level-local coordinates.
//! Every level has a ground strip at y=560 and a puck-shooting enemy pacing
//! the middle of the screen.

use std::path::Path;

use crate::settings::Settings;
use crate::sim::state::{CollectibleKind, EnemyKind, GameState, PowerUpKind};
use crate::sim::world::{
    CollectiblePlacement, EnemyPlacement, LevelDesc, LevelError, PlatformPlacement,
    PowerUpPlacement, build_world, parse_levels,
};
use crate::tuning::Tuning;

const GROUND_Y: f32 = 560.0;
const GROUND_H: f32 = 40.0;
/// Gap left between consecutive levels' ground strips
const GAP: f32 = 50.0;

fn platform(x: f32, y: f32, w: f32, h: f32) -> PlatformPlacement {
    PlatformPlacement { x, y, w, h }
}

fn ground(first: bool) -> PlatformPlacement {
    if first {
        platform(0.0, GROUND_Y, 800.0 - GAP, GROUND_H)
    } else {
        platform(GAP, GROUND_Y, 800.0 - 2.0 * GAP, GROUND_H)
    }
}

fn walker(x: f32, y: f32, range: f32, speed: f32) -> EnemyPlacement {
    EnemyPlacement {
        x,
        y,
        range,
        speed,
        kind: EnemyKind::Walker,
    }
}

fn shooter() -> EnemyPlacement {
    EnemyPlacement {
        x: 400.0,
        y: 520.0,
        range: 100.0,
        speed: 2.0,
        kind: EnemyKind::Shooter,
    }
}

fn powerup(x: f32, y: f32, kind: PowerUpKind) -> PowerUpPlacement {
    PowerUpPlacement { x, y, kind }
}

fn pickup(x: f32, y: f32, kind: CollectibleKind) -> CollectiblePlacement {
    CollectiblePlacement {
        x,
        y,
        kind,
        value: 1,
    }
}

fn level(name: &str, background: &str, fallback_color: [u8; 3]) -> LevelDesc {
    LevelDesc {
        name: name.to_string(),
        background: background.to_string(),
        fallback_color,
        ..Default::default()
    }
}

/// The eight-level campaign, from high school to the startup
pub fn campaign() -> Vec<LevelDesc> {
    use CollectibleKind::*;
    use PowerUpKind::*;

    vec![
        LevelDesc {
            platforms: vec![ground(true), platform(200.0, 450.0, 100.0, 20.0)],
            enemies: vec![walker(500.0, 520.0, 150.0, 2.0), shooter()],
            powerups: vec![powerup(300.0, 520.0, Dumbbell)],
            collectibles: vec![pickup(350.0, 500.0, Coin)],
            ..level("High School", "highschool_bg", [200, 200, 200])
        },
        LevelDesc {
            platforms: vec![ground(false)],
            enemies: vec![walker(100.0, 520.0, 100.0, 1.0), shooter()],
            collectibles: vec![pickup(150.0, 500.0, Sushi)],
            ..level("Cornell", "cornell_bg", [180, 50, 50])
        },
        LevelDesc {
            platforms: vec![ground(false)],
            enemies: vec![walker(200.0, 520.0, 100.0, 2.0), shooter()],
            powerups: vec![powerup(600.0, 520.0, Hockey)],
            collectibles: vec![pickup(350.0, 500.0, Beer)],
            ..level("Collegetown", "collegetown_bg", [100, 150, 100])
        },
        LevelDesc {
            platforms: vec![ground(false)],
            enemies: vec![walker(100.0, 520.0, 150.0, 3.0), shooter()],
            collectibles: vec![pickup(200.0, 500.0, Coin)],
            ..level("Lynah Rink", "lynah_bg", [173, 216, 230])
        },
        LevelDesc {
            platforms: vec![ground(false)],
            enemies: vec![walker(300.0, 520.0, 120.0, 2.0), shooter()],
            powerups: vec![powerup(400.0, 520.0, Guitar)],
            collectibles: vec![pickup(500.0, 450.0, Sushi)],
            ..level("Gym", "gym_bg", [160, 160, 160])
        },
        LevelDesc {
            platforms: vec![ground(false)],
            enemies: vec![
                walker(400.0, 520.0, 100.0, 2.0),
                walker(600.0, 450.0, 80.0, 2.0),
                shooter(),
            ],
            powerups: vec![powerup(200.0, 520.0, Heart)],
            collectibles: vec![pickup(350.0, 500.0, Coin), pickup(450.0, 420.0, Beer)],
            ..level("NYC", "nyc_bg", [50, 50, 80])
        },
        LevelDesc {
            platforms: vec![
                ground(false),
                platform(150.0, 450.0, 200.0, 20.0),
                platform(400.0, 350.0, 150.0, 20.0),
            ],
            enemies: vec![
                walker(300.0, 520.0, 100.0, 1.0),
                walker(500.0, 400.0, 80.0, 2.0),
                shooter(),
            ],
            powerups: vec![powerup(475.0, 330.0, Laptop)],
            collectibles: vec![pickup(250.0, 500.0, Coin), pickup(350.0, 430.0, Sushi)],
            ..level("Office", "workspace_bg", [220, 220, 220])
        },
        LevelDesc {
            platforms: vec![
                ground(false),
                platform(100.0, 460.0, 120.0, 20.0),
                platform(300.0, 380.0, 100.0, 20.0),
            ],
            enemies: vec![
                walker(200.0, 520.0, 120.0, 2.0),
                walker(450.0, 420.0, 100.0, 1.0),
                shooter(),
            ],
            collectibles: vec![pickup(150.0, 500.0, Beer), pickup(350.0, 480.0, Coin)],
            ..level("Startup", "startup_bg", [240, 230, 140])
        },
    ]
}

/// Build the campaign world
pub fn campaign_world(tuning: Tuning, settings: Settings) -> Result<GameState, LevelError> {
    build_world(&campaign(), tuning, settings)
}

/// Read a JSON level table from disk
pub fn load_from(path: &Path) -> Result<Vec<LevelDesc>, LevelError> {
    let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let levels = parse_levels(&json)?;
    log::info!("Loaded {} levels from {}", levels.len(), path.display());
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_campaign_builds() {
        let state = campaign_world(Tuning::default(), Settings::default()).unwrap();
        assert_eq!(state.level_count(), 8);
        assert_eq!(state.world_width(), 8.0 * LEVEL_WIDTH);
        assert_eq!(state.current_level_name(), Some("High School"));
        assert_eq!(state.levels[7].name, "Startup");
        assert_eq!(state.camera.x, 0.0);
    }

    #[test]
    fn test_every_level_has_ground_and_shooter() {
        for (i, desc) in campaign().iter().enumerate() {
            assert!(
                desc.platforms.iter().any(|p| p.y == GROUND_Y),
                "level {i} has no ground"
            );
            assert!(
                desc.enemies.iter().any(|e| e.kind == EnemyKind::Shooter),
                "level {i} has no shooter"
            );
        }
    }

    #[test]
    fn test_player_spawns_on_ground() {
        let state = campaign_world(Tuning::default(), Settings::default()).unwrap();
        let floor = &state.platforms[0].rect;
        assert_eq!(state.player.rect.bottom(), floor.top());
        assert!(state.player.rect.left() >= floor.left());
    }

    #[test]
    fn test_campaign_round_trips_through_json() {
        let json = serde_json::to_string(&campaign()).unwrap();
        assert_eq!(parse_levels(&json).unwrap(), campaign());
    }

    #[test]
    fn test_missing_level_file() {
        let err = load_from(Path::new("/nonexistent/levels.json")).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame, all rates are per tick)
//! - No randomness
//! - Stable iteration order (container order, removal-safe iteration only)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod camera;
pub mod collision;
pub mod patrol;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod world;

pub use aabb::Aabb;
pub use camera::{Camera, camera_offset, level_index_at};
pub use collision::{
    CollisionResult, depenetrate, move_and_collide, resolve_horizontal, resolve_vertical,
};
pub use state::{
    Capabilities, Collectible, CollectibleKind, Direction, Enemy, EnemyKind, Faction, GameEvent,
    GamePhase, GameState, Patrol, Platform, Player, PlayerOverlay, PowerUp, PowerUpKind,
    Projectile, ProjectileKind, Turret,
};
pub use tick::{TickInput, tick};
pub use world::{
    CollectiblePlacement, EnemyPlacement, LevelDesc, LevelError, LevelInfo, PlatformPlacement,
    PowerUpPlacement, build_world, parse_levels,
};

//! Campus Run - a side-scrolling platformer across eight campus levels
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, player, enemies, projectiles, camera)
//! - `levels`: Built-in level table and JSON level loading
//! - `tuning`: Data-driven game balance
//! - `settings`: Rule policies (fall handling, starting health, viewport)
//! - `hud`: Plain-data HUD snapshot
//! - `assets`: Sprite catalog and placeholder bitmaps
//! - `renderer`: Camera-relative draw list in fixed layering order
//! - `platform`: Input source boundary and frame pacing
//! - `session`: The outer fixed-timestep loop

pub mod assets;
pub mod hud;
pub mod levels;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use hud::Hud;
pub use settings::{FallPolicy, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep (seconds)
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Viewport dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Every level is exactly one screen wide
    pub const LEVEL_WIDTH: f32 = SCREEN_WIDTH;

    /// Vertical acceleration per tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Maximum falling speed (pixels/tick)
    pub const TERMINAL_VELOCITY: f32 = 15.0;
    /// Horizontal walk speed (pixels/tick)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Upward impulse for jumps and stomp bounces (negative = up)
    pub const JUMP_VELOCITY: f32 = -12.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_SPAWN_X: f32 = 10.0;
    pub const PLAYER_SPAWN_Y: f32 = 510.0;
    pub const START_HEALTH: u32 = 3;
    /// Damage immunity after a hit (one second)
    pub const INVINCIBLE_TICKS: u32 = FPS;
    /// How far below an enemy's top edge a falling player may be and still stomp
    pub const STOMP_TOLERANCE: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const SHOOTER_PERIOD: u32 = 90;

    /// Hockey puck
    pub const PUCK_SPEED: f32 = 10.0;
    pub const PUCK_LIFETIME: u32 = 60;
    pub const PUCK_COOLDOWN: u32 = 15;
    pub const PUCK_SIZE: f32 = 10.0;

    /// Music note
    pub const NOTE_SPEED: f32 = 8.0;
    pub const NOTE_LIFETIME: u32 = 60;
    pub const NOTE_COOLDOWN: u32 = 20;
    pub const NOTE_SIZE: f32 = 12.0;

    /// Level banner display time
    pub const BANNER_TICKS: u32 = 2 * FPS;
}

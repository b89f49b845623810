//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: it owns the player, every
//! entity collection, the score and the per-tick event buffer. Systems
//! receive it explicitly; there is no process-wide state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::camera::Camera;
use super::world::LevelInfo;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player walked off the right edge of the world
    Won,
    /// Health reached zero (or a lethal fall)
    Lost,
}

/// Horizontal heading, used for facing, patrols and projectiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Static level geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Aabb,
}

/// Horizontal back-and-forth movement over `[start_x, start_x + range]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    pub start_x: f32,
    pub range: f32,
    /// Pixels per tick
    pub speed: f32,
    pub direction: Direction,
}

/// Periodic ranged attack carried by shooter enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    pub kind: ProjectileKind,
    /// Ticks until the next shot
    pub cooldown: u32,
    /// Cooldown reset value after each shot
    pub period: u32,
}

/// Enemy variants as written in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Patrols only
    #[default]
    Walker,
    /// Patrols and fires pucks along its heading
    Shooter,
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub rect: Aabb,
    pub patrol: Patrol,
    /// Ranged attack, if any
    pub turret: Option<Turret>,
}

/// Who fired a projectile; projectiles only hit the opposing side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub fn opposes(self, other: Faction) -> bool {
        self != other
    }
}

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Hockey puck (player with helmet, shooter enemies)
    Puck,
    /// Music note (player with guitar only)
    Note,
}

/// A short-lived projectile; flies straight, ignores gravity and platforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub faction: Faction,
    pub rect: Aabb,
    /// Horizontal speed × direction (pixels/tick)
    pub vel_x: f32,
    /// Ticks remaining; removed at zero
    pub lifetime_ticks: u32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Hockey helmet: puck attack
    Hockey,
    /// Guitar: note attack
    Guitar,
    /// Dumbbell: double size
    Dumbbell,
    /// Laptop: double jump
    Laptop,
    /// Heart: +1 health
    Heart,
}

impl PowerUpKind {
    /// Pickup hitbox size
    pub fn size(self) -> Vec2 {
        match self {
            PowerUpKind::Hockey | PowerUpKind::Guitar | PowerUpKind::Heart => Vec2::splat(20.0),
            PowerUpKind::Dumbbell => Vec2::splat(30.0),
            PowerUpKind::Laptop => Vec2::new(24.0, 16.0),
        }
    }
}

/// A power-up pickup; consumed on first touch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Aabb,
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Sushi,
    Beer,
}

impl CollectibleKind {
    pub fn size(self) -> Vec2 {
        match self {
            CollectibleKind::Coin => Vec2::splat(15.0),
            CollectibleKind::Sushi => Vec2::splat(16.0),
            CollectibleKind::Beer => Vec2::new(12.0, 20.0),
        }
    }
}

/// A score pickup; consumed on first touch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub rect: Aabb,
    /// Points added to the score
    pub value: u32,
}

/// Abilities granted by power-ups; each flag is independent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub hockey: bool,
    pub guitar: bool,
    pub double_jump: bool,
}

/// Visual layers drawn over the player sprite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOverlay {
    pub helmet: bool,
    pub guitar: bool,
    pub laptop: bool,
    pub grown: bool,
    /// Blink while invincible
    pub flashing: bool,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Aabb,
    /// Size when not grown
    pub base_size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub health: u32,
    /// Ticks of damage immunity remaining
    pub invincible_ticks: u32,
    pub caps: Capabilities,
    pub grown: bool,
    /// Jumps taken since last touching the ground
    pub jumps_used: u32,
    pub facing: Direction,
    pub puck_cooldown: u32,
    pub note_cooldown: u32,
    /// Respawn anchor (top-left)
    pub spawn_point: Vec2,
    /// Jump button state last tick (air jumps need a fresh press)
    pub jump_held: bool,
    pub overlay: PlayerOverlay,
}

impl Player {
    pub fn new(spawn_point: Vec2, base_size: Vec2, health: u32) -> Self {
        Self {
            rect: Aabb {
                pos: spawn_point,
                size: base_size,
            },
            base_size,
            vel: Vec2::ZERO,
            on_ground: false,
            health,
            invincible_ticks: 0,
            caps: Capabilities::default(),
            grown: false,
            jumps_used: 0,
            facing: Direction::Right,
            puck_cooldown: 0,
            note_cooldown: 0,
            spawn_point,
            jump_held: false,
            overlay: PlayerOverlay::default(),
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    pub fn max_jumps(&self) -> u32 {
        if self.caps.double_jump { 2 } else { 1 }
    }

    /// Count down invincibility and weapon cooldowns, flooring at zero
    pub fn tick_timers(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
        self.puck_cooldown = self.puck_cooldown.saturating_sub(1);
        self.note_cooldown = self.note_cooldown.saturating_sub(1);
    }

    /// Double in size with feet planted. No-op if already grown.
    pub fn grow(&mut self, factor: f32) {
        if !self.grown {
            self.rect = self.rect.resized_from_mid_bottom(self.base_size * factor);
            self.grown = true;
        }
    }

    /// Back to base size with feet planted
    pub fn shrink(&mut self) {
        if self.grown {
            self.rect = self.rect.resized_from_mid_bottom(self.base_size);
            self.grown = false;
        }
    }

    /// Strip every capability and return to base size
    pub fn lose_powerups(&mut self) {
        self.caps = Capabilities::default();
        self.shrink();
    }

    /// Damage path shared by enemy contact, enemy projectiles and falls.
    ///
    /// Returns false (and changes nothing) while invincible.
    pub fn take_hit(&mut self, invincible_ticks: u32) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.lose_powerups();
        self.health = self.health.saturating_sub(1);
        self.invincible_ticks = invincible_ticks;
        true
    }

    /// Back to the spawn point, at rest.
    ///
    /// The spawn point is a base-size top-left corner; a grown player is
    /// placed with its feet on the same line so it never starts in the floor.
    pub fn respawn(&mut self) {
        let feet = self.spawn_point.y + self.base_size.y;
        self.rect.pos = Vec2::new(self.spawn_point.x, feet - self.rect.size.y);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.jumps_used = 0;
    }

    /// Rebuild the visual overlay from simulation state
    pub fn refresh_overlay(&mut self) {
        self.overlay = PlayerOverlay {
            helmet: self.caps.hockey,
            guitar: self.caps.guitar,
            laptop: self.caps.double_jump,
            grown: self.grown,
            flashing: self.is_invincible(),
        };
    }
}

/// Observer-visible things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PowerUpCollected { kind: PowerUpKind },
    CollectiblePicked { kind: CollectibleKind, value: u32 },
    ProjectileFired { kind: ProjectileKind, faction: Faction },
    EnemyStomped { enemy_id: u32 },
    EnemyShot { enemy_id: u32, by: ProjectileKind },
    PlayerDamaged { health: u32 },
    PlayerRespawned,
    LevelEntered { index: usize },
    Won,
    Lost,
}

/// Complete simulation state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Collectible points; never decreases
    pub score: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    pub collectibles: Vec<Collectible>,
    /// Per-level metadata, in world order
    pub levels: Vec<LevelInfo>,
    pub camera: Camera,
    /// Level index shown on the HUD (derived from the camera)
    pub current_level: usize,
    /// Ticks left to show the current level banner
    pub banner_ticks: u32,
    /// Events raised during the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Empty world with a player at the spawn point
    pub fn new(tuning: Tuning, settings: Settings, levels: Vec<LevelInfo>) -> Self {
        let player = Player::new(
            settings.spawn_point,
            Vec2::new(tuning.player_width, tuning.player_height),
            settings.start_health,
        );
        let banner_ticks = tuning.banner_ticks;
        Self {
            tuning,
            settings,
            phase: GamePhase::Playing,
            time_ticks: 0,
            score: 0,
            player,
            platforms: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            collectibles: Vec::new(),
            levels,
            camera: Camera::default(),
            current_level: 0,
            banner_ticks,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total horizontal extent of all levels laid side by side
    pub fn world_width(&self) -> f32 {
        self.levels.len() as f32 * self.settings.level_width
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Name of the level the camera is currently in
    pub fn current_level_name(&self) -> Option<&str> {
        self.levels.get(self.current_level).map(|l| l.name.as_str())
    }
}

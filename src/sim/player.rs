//! Player update: input, physics, pickups, attacks, enemy contact
//!
//! Per tick, in order:
//! 1. count down timers
//! 2. read movement and jump intent
//! 3. move through the level geometry
//! 4. collect power-ups
//! 5. fire weapons that are held, owned and off cooldown
//! 6. resolve enemy contact (stomp or take a hit)
//! 7. handle falling out of the world
//! 8. collect score items
//! 9. rebuild the visual overlay
//!
//! Enemy projectiles reach the player through `projectile::sweep`, which
//! uses the same damage path (`Player::take_hit`).

use super::collision::{depenetrate, move_and_collide};
use super::projectile;
use super::state::{
    Direction, Faction, GameEvent, GameState, Platform, Player, PowerUpKind, ProjectileKind,
};
use super::tick::TickInput;
use crate::settings::FallPolicy;
use crate::tuning::Tuning;

/// What touching a power-up did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    /// Effect applied; the pickup is consumed
    Applied,
    /// Already held; consumed with no effect
    AlreadyHeld,
    /// No room to grow here; the pickup stays in the level
    NoRoom,
}

impl PickupOutcome {
    pub fn consumed(self) -> bool {
        self != PickupOutcome::NoRoom
    }
}

/// Apply a power-up effect. Re-granting something already held changes nothing.
///
/// Growing pushes the player out of any platform the bigger body reaches
/// into. If there is nowhere clear to go the player stays small.
pub fn apply_power_up(
    player: &mut Player,
    kind: PowerUpKind,
    tuning: &Tuning,
    platforms: &[Platform],
) -> PickupOutcome {
    let newly_held = match kind {
        PowerUpKind::Hockey => !std::mem::replace(&mut player.caps.hockey, true),
        PowerUpKind::Guitar => !std::mem::replace(&mut player.caps.guitar, true),
        PowerUpKind::Laptop => !std::mem::replace(&mut player.caps.double_jump, true),
        PowerUpKind::Dumbbell => {
            if player.grown {
                return PickupOutcome::AlreadyHeld;
            }
            player.grow(tuning.grow_factor);
            match depenetrate(&mut player.rect, platforms) {
                Some(offset) => {
                    if offset.y != 0.0 {
                        player.on_ground = false;
                    }
                    true
                }
                None => {
                    player.shrink();
                    return PickupOutcome::NoRoom;
                }
            }
        }
        PowerUpKind::Heart => {
            player.health += 1;
            true
        }
    };
    if newly_held {
        PickupOutcome::Applied
    } else {
        PickupOutcome::AlreadyHeld
    }
}

/// Horizontal intent and jumping
fn handle_input(player: &mut Player, input: &TickInput, tuning: &Tuning) {
    player.vel.x = 0.0;
    if input.left {
        player.vel.x = -tuning.player_speed;
        player.facing = Direction::Left;
    }
    if input.right {
        player.vel.x = tuning.player_speed;
        player.facing = Direction::Right;
    }

    let fresh_press = input.jump && !player.jump_held;
    player.jump_held = input.jump;

    if input.jump && player.on_ground {
        player.vel.y = tuning.jump_velocity;
        player.jumps_used = 1;
    } else if fresh_press && !player.on_ground && player.jumps_used < player.max_jumps() {
        player.vel.y = tuning.jump_velocity;
        player.jumps_used += 1;
    }
}

/// Weapons that fire this tick; each one fired has its cooldown reset
fn ready_weapons(player: &mut Player, input: &TickInput, tuning: &Tuning) -> Vec<ProjectileKind> {
    let mut fired = Vec::new();
    if input.primary_attack && player.caps.hockey && player.puck_cooldown == 0 {
        player.puck_cooldown = tuning.puck.cooldown;
        fired.push(ProjectileKind::Puck);
    }
    if input.secondary_attack && player.caps.guitar && player.note_cooldown == 0 {
        player.note_cooldown = tuning.note.cooldown;
        fired.push(ProjectileKind::Note);
    }
    fired
}

/// Stomp or get hurt by every enemy the player overlaps
fn resolve_enemy_contact(state: &mut GameState) {
    let player = &mut state.player;
    let events = &mut state.events;
    let tuning = &state.tuning;

    state.enemies.retain(|enemy| {
        if !player.rect.intersects(&enemy.rect) {
            return true;
        }
        let from_above = player.vel.y > 0.0
            && player.rect.bottom() <= enemy.rect.top() + tuning.stomp_tolerance;
        if from_above {
            log::debug!("Stomped enemy {}", enemy.id);
            player.vel.y = tuning.jump_velocity;
            events.push(GameEvent::EnemyStomped { enemy_id: enemy.id });
            return false;
        }
        if player.take_hit(tuning.invincible_ticks) {
            log::debug!("Enemy {} hit player, health {}", enemy.id, player.health);
            events.push(GameEvent::PlayerDamaged {
                health: player.health,
            });
        }
        true
    });
}

/// Advance the player by one tick
pub fn update_player(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.tick_timers();
    handle_input(player, input, tuning);

    let result = move_and_collide(
        &mut player.rect,
        &mut player.vel,
        &state.platforms,
        tuning.gravity,
        tuning.terminal_velocity,
    );
    player.on_ground = result.grounded;
    if player.on_ground {
        player.jumps_used = 0;
    } else if player.jumps_used == 0 {
        // Walking off a ledge spends the ground jump
        player.jumps_used = 1;
    }

    // Power-ups
    let events = &mut state.events;
    let platforms = &state.platforms;
    state.powerups.retain(|pu| {
        if !pu.rect.intersects(&player.rect) {
            return true;
        }
        if !apply_power_up(player, pu.kind, tuning, platforms).consumed() {
            log::debug!("No room to use {:?}", pu.kind);
            return true;
        }
        log::debug!("Picked up {:?}", pu.kind);
        events.push(GameEvent::PowerUpCollected { kind: pu.kind });
        false
    });

    // Attacks
    let fired = ready_weapons(&mut state.player, input, &state.tuning);
    for kind in fired {
        let id = state.next_entity_id();
        projectile::spawn(
            &mut state.projectiles,
            id,
            kind,
            Faction::Player,
            state.player.rect.center(),
            state.player.facing,
            state.tuning.weapon(kind),
        );
        state.events.push(GameEvent::ProjectileFired {
            kind,
            faction: Faction::Player,
        });
    }

    resolve_enemy_contact(state);

    // Fell past the bottom of the screen
    let player = &mut state.player;
    if state.settings.fall_policy == FallPolicy::Respawn
        && player.rect.top() > state.settings.viewport_height
    {
        if player.take_hit(state.tuning.invincible_ticks) {
            state.events.push(GameEvent::PlayerDamaged {
                health: player.health,
            });
        }
        player.respawn();
        if depenetrate(&mut player.rect, &state.platforms).is_none() {
            // Spawn area too tight for a grown player
            player.shrink();
            player.respawn();
        }
        log::debug!("Player respawned, health {}", player.health);
        state.events.push(GameEvent::PlayerRespawned);
    }

    // Collectibles
    let score = &mut state.score;
    let events = &mut state.events;
    state.collectibles.retain(|c| {
        if !c.rect.intersects(&player.rect) {
            return true;
        }
        *score += u64::from(c.value);
        events.push(GameEvent::CollectiblePicked {
            kind: c.kind,
            value: c.value,
        });
        false
    });

    player.refresh_overlay();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::aabb::Aabb;
    use crate::sim::state::{
        Collectible, CollectibleKind, Enemy, EnemyKind, Patrol, Platform, PowerUp,
    };
    use glam::Vec2;

    /// Player standing on a long floor at y=560
    fn grounded_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), Settings::default(), Vec::new());
        let id = state.next_entity_id();
        state.platforms.push(Platform {
            id,
            rect: Aabb::new(0.0, 560.0, 2000.0, 40.0),
        });
        state.player.rect.set_bottom(560.0);
        update_player(&mut state, &TickInput::default());
        assert!(state.player.on_ground);
        state
    }

    fn add_enemy(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            kind: EnemyKind::Walker,
            rect: Aabb::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            patrol: Patrol::new(x, 0.0, 0.0),
            turret: None,
        });
        id
    }

    fn add_power_up(state: &mut GameState, kind: PowerUpKind) {
        let id = state.next_entity_id();
        let center = state.player.rect.center();
        state.powerups.push(PowerUp {
            id,
            kind,
            rect: Aabb::from_center(center, kind.size()),
        });
    }

    #[test]
    fn test_walk_sets_facing() {
        let mut state = grounded_state();
        let x0 = state.player.rect.left();
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        update_player(&mut state, &input);
        assert_eq!(state.player.rect.left(), x0 - PLAYER_SPEED);
        assert_eq!(state.player.facing, Direction::Left);
    }

    #[test]
    fn test_jump_only_from_ground_without_laptop() {
        let mut state = grounded_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        update_player(&mut state, &jump);
        assert_eq!(state.player.vel.y, JUMP_VELOCITY + GRAVITY);
        assert!(!state.player.on_ground);

        // Release and press again mid-air: no second jump
        update_player(&mut state, &TickInput::default());
        let vy = state.player.vel.y;
        update_player(&mut state, &jump);
        assert_eq!(state.player.vel.y, vy + GRAVITY);
    }

    #[test]
    fn test_double_jump_with_laptop() {
        let mut state = grounded_state();
        state.player.caps.double_jump = true;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        update_player(&mut state, &jump);
        update_player(&mut state, &TickInput::default());
        update_player(&mut state, &jump);
        assert_eq!(state.player.vel.y, JUMP_VELOCITY + GRAVITY);
        assert_eq!(state.player.jumps_used, 2);

        // Third press does nothing
        update_player(&mut state, &TickInput::default());
        let vy = state.player.vel.y;
        update_player(&mut state, &jump);
        assert_eq!(state.player.vel.y, vy + GRAVITY);
    }

    #[test]
    fn test_holding_jump_does_not_spend_air_jump() {
        let mut state = grounded_state();
        state.player.caps.double_jump = true;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        update_player(&mut state, &jump);
        update_player(&mut state, &jump);
        assert_eq!(state.player.jumps_used, 1);
    }

    #[test]
    fn test_power_ups_grant_capabilities() {
        let mut state = grounded_state();
        add_power_up(&mut state, PowerUpKind::Hockey);
        add_power_up(&mut state, PowerUpKind::Guitar);
        add_power_up(&mut state, PowerUpKind::Laptop);
        update_player(&mut state, &TickInput::default());

        assert!(state.powerups.is_empty());
        assert!(state.player.caps.hockey);
        assert!(state.player.caps.guitar);
        assert!(state.player.caps.double_jump);
        assert!(state.player.overlay.helmet);
        assert!(state.player.overlay.laptop);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PowerUpCollected { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_second_dumbbell_is_no_op() {
        let mut state = grounded_state();
        add_power_up(&mut state, PowerUpKind::Dumbbell);
        update_player(&mut state, &TickInput::default());
        assert!(state.player.grown);
        let size = state.player.rect.size;
        assert_eq!(size, Vec2::new(PLAYER_WIDTH * 2.0, PLAYER_HEIGHT * 2.0));

        add_power_up(&mut state, PowerUpKind::Dumbbell);
        update_player(&mut state, &TickInput::default());
        assert!(state.powerups.is_empty(), "second dumbbell is still consumed");
        assert!(state.player.grown);
        assert_eq!(state.player.rect.size, size);
        assert_eq!(state.player.rect.bottom(), 560.0);
    }

    fn add_platform(state: &mut GameState, x: f32, y: f32, w: f32, h: f32) {
        let id = state.next_entity_id();
        state.platforms.push(Platform {
            id,
            rect: Aabb::new(x, y, w, h),
        });
    }

    fn clear_of_platforms(state: &GameState) -> bool {
        let rect = &state.player.rect;
        state.platforms.iter().all(|p| !rect.intersects(&p.rect))
    }

    #[test]
    fn test_growing_under_a_ledge_pushes_clear() {
        let mut state = grounded_state();
        add_platform(&mut state, 200.0, 450.0, 100.0, 20.0);
        state.player.rect.pos.x = 255.0;
        add_power_up(&mut state, PowerUpKind::Dumbbell);

        update_player(&mut state, &TickInput::default());
        assert!(state.player.grown);
        assert!(state.powerups.is_empty());
        assert!(clear_of_platforms(&state));
        assert_eq!(state.player.rect.left(), 300.0);
        assert_eq!(state.player.rect.bottom(), 560.0);

        // Standing still afterwards does not snap anywhere
        update_player(&mut state, &TickInput::default());
        assert_eq!(state.player.rect.left(), 300.0);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_dumbbell_waits_when_there_is_no_room() {
        let mut state = grounded_state();
        add_platform(&mut state, 0.0, 490.0, 2000.0, 20.0);
        add_platform(&mut state, 0.0, 380.0, 2000.0, 20.0);
        state.player.rect.pos.x = 500.0;
        let before = state.player.rect;
        add_power_up(&mut state, PowerUpKind::Dumbbell);

        update_player(&mut state, &TickInput::default());
        assert!(!state.player.grown);
        assert_eq!(state.player.rect, before);
        assert_eq!(state.powerups.len(), 1, "pickup left for later");
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::PowerUpCollected { .. })));
        assert!(clear_of_platforms(&state));
    }

    #[test]
    fn test_heart_heals() {
        let mut state = grounded_state();
        add_power_up(&mut state, PowerUpKind::Heart);
        update_player(&mut state, &TickInput::default());
        assert_eq!(state.player.health, START_HEALTH + 1);
    }

    #[test]
    fn test_attack_needs_capability_and_cooldown() {
        let mut state = grounded_state();
        let fire = TickInput {
            primary_attack: true,
            ..Default::default()
        };
        update_player(&mut state, &fire);
        assert!(state.projectiles.is_empty(), "no helmet, no puck");

        state.player.caps.hockey = true;
        update_player(&mut state, &fire);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].faction, Faction::Player);
        assert_eq!(state.projectiles[0].rect.center(), state.player.rect.center());
        assert_eq!(state.player.puck_cooldown, PUCK_COOLDOWN);

        // Held fire is rate-limited by the cooldown
        for _ in 0..PUCK_COOLDOWN - 1 {
            update_player(&mut state, &fire);
        }
        assert_eq!(state.projectiles.len(), 1);
        update_player(&mut state, &fire);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_note_fires_facing_direction() {
        let mut state = grounded_state();
        state.player.caps.guitar = true;
        state.player.facing = Direction::Left;
        let input = TickInput {
            secondary_attack: true,
            ..Default::default()
        };
        update_player(&mut state, &input);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].kind, ProjectileKind::Note);
        assert_eq!(state.projectiles[0].vel_x, -NOTE_SPEED);
    }

    #[test]
    fn test_stomp_kills_and_bounces_even_while_invincible() {
        let mut state = grounded_state();
        state.player.invincible_ticks = 30;
        let enemy_id = add_enemy(&mut state, 100.0, 300.0);
        // Falling onto the enemy's head
        state.player.rect.pos = Vec2::new(100.0, 300.0 - PLAYER_HEIGHT - 4.0);
        state.player.vel = Vec2::new(0.0, 6.0);

        update_player(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert_eq!(state.player.vel.y, JUMP_VELOCITY);
        assert_eq!(state.player.health, START_HEALTH);
        assert!(state.events.contains(&GameEvent::EnemyStomped { enemy_id }));
    }

    #[test]
    fn test_side_contact_hurts_once_per_window() {
        let mut state = grounded_state();
        state.player.caps.hockey = true;
        let x = state.player.rect.right() - 5.0;
        add_enemy(&mut state, x, 520.0);

        for _ in 0..INVINCIBLE_TICKS {
            update_player(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.health, START_HEALTH - 1);
        assert!(!state.player.caps.hockey);
        assert_eq!(state.enemies.len(), 1);

        // Window elapsed: the next tick of contact hurts again
        update_player(&mut state, &TickInput::default());
        assert_eq!(state.player.health, START_HEALTH - 2);
    }

    #[test]
    fn test_invincibility_counts_down_by_one() {
        let mut state = grounded_state();
        state.player.invincible_ticks = 5;
        for expected in (0..5).rev() {
            update_player(&mut state, &TickInput::default());
            assert_eq!(state.player.invincible_ticks, expected);
        }
        update_player(&mut state, &TickInput::default());
        assert_eq!(state.player.invincible_ticks, 0);
    }

    #[test]
    fn test_fall_respawns_with_damage() {
        let mut state = GameState::new(Tuning::default(), Settings::default(), Vec::new());
        state.player.rect.set_top(SCREEN_HEIGHT - 1.0);
        state.player.vel.y = 5.0;
        update_player(&mut state, &TickInput::default());

        assert_eq!(state.player.rect.pos, state.player.spawn_point);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.player.health, START_HEALTH - 1);
        assert!(state.events.contains(&GameEvent::PlayerRespawned));
    }

    #[test]
    fn test_grown_invincible_fall_respawns_on_the_floor() {
        let mut state = GameState::new(Tuning::default(), Settings::default(), Vec::new());
        add_platform(&mut state, 0.0, 560.0, 750.0, 40.0);
        state.player.grow(state.tuning.grow_factor);
        state.player.invincible_ticks = 30;
        state.player.rect.pos = Vec2::new(760.0, SCREEN_HEIGHT - 1.0);
        state.player.vel.y = 5.0;

        update_player(&mut state, &TickInput::default());
        assert!(state.events.contains(&GameEvent::PlayerRespawned));
        // Invincible, so the fall cost nothing and the player is still big
        assert!(state.player.grown);
        assert_eq!(state.player.health, START_HEALTH);
        let feet = state.player.spawn_point.y + PLAYER_HEIGHT;
        assert_eq!(state.player.rect.bottom(), feet);
        assert_eq!(state.player.rect.left(), state.player.spawn_point.x);
        assert!(clear_of_platforms(&state));

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..20 {
            let x0 = state.player.rect.left();
            update_player(&mut state, &right);
            assert!(state.player.rect.left() >= x0, "walking right never snaps left");
            assert!(clear_of_platforms(&state));
        }
        assert!(state.player.on_ground);
        assert_eq!(state.player.rect.bottom(), 560.0);
    }

    #[test]
    fn test_lethal_fall_leaves_player_below() {
        let settings = Settings {
            fall_policy: FallPolicy::Lethal,
            ..Settings::default()
        };
        let mut state = GameState::new(Tuning::default(), settings, Vec::new());
        state.player.rect.set_top(SCREEN_HEIGHT - 1.0);
        state.player.vel.y = 5.0;
        update_player(&mut state, &TickInput::default());
        assert!(state.player.rect.top() > SCREEN_HEIGHT);
        assert_eq!(state.player.health, START_HEALTH);
    }

    #[test]
    fn test_collectibles_add_score() {
        let mut state = grounded_state();
        let center = state.player.rect.center();
        for (kind, value) in [(CollectibleKind::Coin, 1), (CollectibleKind::Beer, 5)] {
            let id = state.next_entity_id();
            state.collectibles.push(Collectible {
                id,
                kind,
                rect: Aabb::from_center(center, kind.size()),
                value,
            });
        }
        update_player(&mut state, &TickInput::default());
        assert_eq!(state.score, 6);
        assert!(state.collectibles.is_empty());

        update_player(&mut state, &TickInput::default());
        assert_eq!(state.score, 6);
    }
}

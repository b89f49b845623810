//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The update
//! order within a tick is fixed:
//! player → enemies → projectile flight → projectile hits → expiry →
//! win/loss → camera.

use super::camera::{camera_offset, level_index_at};
use super::patrol::update_enemies;
use super::player::update_player;
use super::projectile;
use super::state::{GameEvent, GamePhase, GameState};
use crate::settings::FallPolicy;

/// Input commands for a single tick (held state, sampled once per tick)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Hockey puck
    pub primary_attack: bool,
    /// Music note
    pub secondary_attack: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Nothing moves once the run is decided
    if state.is_over() {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    update_player(state, input);
    update_enemies(state);

    projectile::advance(&mut state.projectiles);
    projectile::sweep(
        &mut state.projectiles,
        &mut state.enemies,
        &mut state.player,
        state.tuning.invincible_ticks,
        &mut state.events,
    );
    projectile::purge_expired(&mut state.projectiles);
    // A projectile hit may have stripped power-ups
    state.player.refresh_overlay();

    evaluate_outcome(state);
    update_camera(state);
}

/// Decide win/loss. Loss is checked first.
pub fn evaluate_outcome(state: &mut GameState) {
    let player = &state.player;
    let lethal_fall = state.settings.fall_policy == FallPolicy::Lethal
        && player.rect.top() > state.settings.viewport_height;

    if player.health == 0 || lethal_fall {
        state.phase = GamePhase::Lost;
        state.events.push(GameEvent::Lost);
        log::info!(
            "Game over at tick {} (health {}, score {})",
            state.time_ticks,
            player.health,
            state.score
        );
    } else if player.rect.left() > state.world_width() {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("Won at tick {} with score {}", state.time_ticks, state.score);
    }
}

/// Recompute the camera from the player and track level changes
pub fn update_camera(state: &mut GameState) {
    state.camera.x = camera_offset(
        state.player.rect.center().x,
        state.settings.viewport_width,
        state.world_width(),
    );

    let level = level_index_at(state.camera.x, state.settings.level_width, state.level_count());
    if level != state.current_level {
        state.current_level = level;
        state.banner_ticks = state.tuning.banner_ticks;
        state.events.push(GameEvent::LevelEntered { index: level });
        log::info!("Entered level {}: {}", level + 1, state.current_level_name().unwrap_or("?"));
    } else {
        state.banner_ticks = state.banner_ticks.saturating_sub(1);
    }
}

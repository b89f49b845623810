//! HUD snapshot
//!
//! Plain data read out of `GameState` after each tick. Formatting and drawing
//! belong to whoever presents it.

use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// End-of-run message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
        }
    }
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub health: u32,
    pub score: u64,
    /// Zero-based index of the level in view
    pub level_index: usize,
    pub level_name: String,
    /// Level banner, present only while it is still on screen
    pub banner: Option<String>,
    pub outcome: Option<Outcome>,
}

impl Hud {
    pub fn capture(state: &GameState) -> Self {
        let level_name = state.current_level_name().unwrap_or_default().to_string();
        let banner = (state.banner_ticks > 0).then(|| level_name.clone());
        let outcome = match state.phase {
            GamePhase::Playing => None,
            GamePhase::Won => Some(Outcome::Win),
            GamePhase::Lost => Some(Outcome::Loss),
        };

        Self {
            health: state.player.health,
            score: state.score,
            level_index: state.current_level,
            level_name,
            banner,
            outcome,
        }
    }
}

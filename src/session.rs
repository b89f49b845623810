//! Outer game loop
//!
//! One iteration = poll input, check for quit, run one tick, hand events to
//! the caller, draw. The run stops on quit, on win/loss, or at an optional
//! tick limit.

use crate::platform::{Action, InputSource, sample_input};
use crate::renderer::{Renderer, present};
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Won,
    Lost,
    Quit,
    TickLimit,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Won => "won",
            StopReason::Lost => "lost",
            StopReason::Quit => "quit",
            StopReason::TickLimit => "tick limit",
        }
    }
}

/// Run a single tick. Returns the stop reason if the run is over.
pub fn step(state: &mut GameState, input: &mut dyn InputSource) -> Option<StopReason> {
    input.poll();
    if input.is_action_pressed(Action::Quit) {
        return Some(StopReason::Quit);
    }

    tick(state, &sample_input(input));

    match state.phase {
        GamePhase::Playing => None,
        GamePhase::Won => Some(StopReason::Won),
        GamePhase::Lost => Some(StopReason::Lost),
    }
}

/// Run until the game ends, the player quits, or `max_ticks` elapse
pub fn run_session(
    state: &mut GameState,
    input: &mut dyn InputSource,
    renderer: &mut dyn Renderer,
    max_ticks: Option<u64>,
    mut on_event: impl FnMut(&GameEvent),
) -> StopReason {
    let start = state.time_ticks;
    let reason = loop {
        if max_ticks.is_some_and(|limit| state.time_ticks - start >= limit) {
            break StopReason::TickLimit;
        }

        let stop = step(state, input);
        for event in &state.events {
            on_event(event);
        }
        present(state, renderer);

        if let Some(reason) = stop {
            break reason;
        }
    };

    log::info!(
        "Session ended after {} ticks: {}",
        state.time_ticks - start,
        reason.as_str()
    );
    reason
}

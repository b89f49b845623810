//! Platform abstraction layer
//!
//! Handles the outside world for the simulation:
//! - Input sources (held keys, seeded autopilot)
//! - Frame pacing (wall-clock time to fixed ticks)

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::TickInput;

/// Logical input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Hockey puck
    PrimaryAttack,
    /// Music note
    SecondaryAttack,
    Quit,
}

/// Anything that can answer "is this action held right now?"
pub trait InputSource {
    /// Refresh held state; called once at the start of every tick
    fn poll(&mut self) {}

    fn is_action_pressed(&self, action: Action) -> bool;
}

/// Sample the held actions into this tick's input
pub fn sample_input(source: &dyn InputSource) -> TickInput {
    TickInput {
        left: source.is_action_pressed(Action::MoveLeft),
        right: source.is_action_pressed(Action::MoveRight),
        jump: source.is_action_pressed(Action::Jump),
        primary_attack: source.is_action_pressed(Action::PrimaryAttack),
        secondary_attack: source.is_action_pressed(Action::SecondaryAttack),
    }
}

/// Keyboard-style held state, fed by key down/up events
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Action>,
}

impl HeldKeys {
    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl InputSource for HeldKeys {
    fn is_action_pressed(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

/// Seeded demo player: runs right, hops now and then, fires whenever it can
#[derive(Debug, Clone)]
pub struct AutoPilot {
    rng: Pcg32,
    keys: HeldKeys,
    /// Ticks left holding jump
    jump_hold: u32,
    /// Ticks left backing up
    retreat: u32,
}

impl AutoPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            keys: HeldKeys::default(),
            jump_hold: 0,
            retreat: 0,
        }
    }
}

impl InputSource for AutoPilot {
    fn poll(&mut self) {
        self.keys.release_all();

        if self.jump_hold == 0 && self.rng.random_bool(1.0 / 25.0) {
            self.jump_hold = self.rng.random_range(8..20);
        }
        if self.retreat == 0 && self.rng.random_bool(1.0 / 240.0) {
            self.retreat = self.rng.random_range(10..30);
        }

        if self.retreat > 0 {
            self.retreat -= 1;
            self.keys.press(Action::MoveLeft);
        } else {
            self.keys.press(Action::MoveRight);
        }
        if self.jump_hold > 0 {
            self.jump_hold -= 1;
            self.keys.press(Action::Jump);
        }
        if self.rng.random_bool(0.2) {
            self.keys.press(Action::PrimaryAttack);
        }
        if self.rng.random_bool(0.2) {
            self.keys.press(Action::SecondaryAttack);
        }
    }

    fn is_action_pressed(&self, action: Action) -> bool {
        self.keys.is_action_pressed(action)
    }
}

/// Converts wall-clock frame time into a whole number of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FramePacer {
    accumulator: f32,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks to run for a frame that took `dt` seconds
    pub fn advance(&mut self, dt: f32) -> u32 {
        // Long stalls (tab switch, debugger) are not caught up
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Drop any leftover time (after a pause or focus loss)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

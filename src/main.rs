//! Campus Run - headless native runner
//!
//! Builds the world from the built-in campaign (or a JSON level file) and
//! plays it with the seeded autopilot, logging gameplay events.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use glam::Vec2;

use campus_run::assets::{NoAssets, SpriteAtlas, SpriteId};
use campus_run::consts::SIM_DT;
use campus_run::platform::{AutoPilot, FramePacer};
use campus_run::renderer::{Renderer, SpriteInstance, sprite_instances};
use campus_run::session::{StopReason, run_session, step};
use campus_run::sim::{GameEvent, GameState, build_world};
use campus_run::{FallPolicy, Hud, Settings, Tuning, levels};

#[derive(Parser, Debug)]
#[command(author, version, about = "Side-scrolling campus platformer (headless autopilot run)")]
struct Args {
    /// JSON level table; defaults to the built-in campaign
    #[arg(long, value_name = "PATH")]
    levels: Option<PathBuf>,
    /// JSON rules file (fall policy, starting health, viewport)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// JSON balance file (physics, weapons, timers)
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,
    /// Stop after this many ticks
    #[arg(long, value_name = "COUNT", default_value_t = 60 * 60 * 5)]
    ticks: u64,
    /// Autopilot seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Falling off the bottom of the screen ends the run
    #[arg(long)]
    lethal_falls: bool,
    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
}

/// Renderer that only checks every draw has a sprite behind it
struct AtlasCheck {
    atlas: SpriteAtlas,
    draws: u64,
    missing: u64,
    /// Instance data that would have gone to the GPU
    instance_bytes: usize,
}

impl AtlasCheck {
    /// Batched path: one instance buffer per frame
    fn upload(&mut self, instances: &[SpriteInstance]) {
        self.draws += instances.len() as u64;
        self.instance_bytes += bytemuck::cast_slice::<SpriteInstance, u8>(instances).len();
    }
}

impl Renderer for AtlasCheck {
    fn draw(&mut self, sprite: SpriteId, _screen_x: f32, _screen_y: f32, _size: Vec2) {
        self.draws += 1;
        if self.atlas.get(sprite).is_none() {
            self.missing += 1;
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PlayerDamaged { health } => log::info!("Player hit, health {health}"),
        GameEvent::PlayerRespawned => log::info!("Player respawned"),
        GameEvent::PowerUpCollected { kind } => log::info!("Picked up {kind:?}"),
        GameEvent::LevelEntered { .. } | GameEvent::Won | GameEvent::Lost => {}
        other => log::debug!("{other:?}"),
    }
}

fn run_realtime(
    state: &mut GameState,
    input: &mut AutoPilot,
    renderer: &mut AtlasCheck,
    max_ticks: u64,
) -> StopReason {
    let mut pacer = FramePacer::new();
    let mut last = Instant::now();
    let frame = Duration::from_secs_f32(SIM_DT);

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        for _ in 0..pacer.advance(dt) {
            if state.time_ticks >= max_ticks {
                return StopReason::TickLimit;
            }
            let stop = step(state, input);
            state.events.iter().for_each(log_event);
            if let Some(reason) = stop {
                return reason;
            }
        }
        renderer.upload(&sprite_instances(state));
        std::thread::sleep(frame.saturating_sub(now.elapsed()));
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Campus Run (native) starting...");

    let tuning = args
        .tuning
        .as_deref()
        .map(Tuning::load_from)
        .unwrap_or_default();
    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load_from)
        .unwrap_or_default();
    if args.lethal_falls {
        settings.fall_policy = FallPolicy::Lethal;
    }
    log::info!("Fall policy: {}", settings.fall_policy.as_str());

    let level_table = match &args.levels {
        Some(path) => levels::load_from(path),
        None => Ok(levels::campaign()),
    };
    let mut state = match level_table.and_then(|table| build_world(&table, tuning, settings)) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot build world: {e}");
            return ExitCode::FAILURE;
        }
    };

    let viewport = Vec2::new(state.settings.viewport_width, state.settings.viewport_height);
    let atlas = SpriteAtlas::load(&mut NoAssets, &state.levels, &state.tuning, viewport);
    let mut renderer = AtlasCheck {
        atlas,
        draws: 0,
        missing: 0,
        instance_bytes: 0,
    };
    let mut pilot = AutoPilot::new(args.seed);
    log::info!("Autopilot seed: {}", args.seed);

    let reason = if args.realtime {
        run_realtime(&mut state, &mut pilot, &mut renderer, args.ticks)
    } else {
        run_session(
            &mut state,
            &mut pilot,
            &mut renderer,
            Some(args.ticks),
            log_event,
        )
    };

    let hud = Hud::capture(&state);
    log::info!(
        "Finished ({}): level {} ({}), health {}, score {}, {} draws",
        reason.as_str(),
        hud.level_index + 1,
        hud.level_name,
        hud.health,
        hud.score,
        renderer.draws
    );
    if renderer.instance_bytes > 0 {
        log::info!("Uploaded {} bytes of sprite instances", renderer.instance_bytes);
    }
    if renderer.missing > 0 {
        log::warn!("{} draws had no sprite", renderer.missing);
    }
    if let Some(outcome) = hud.outcome {
        println!("{}", outcome.as_str());
    }

    ExitCode::SUCCESS
}

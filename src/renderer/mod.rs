//! Draw list construction
//!
//! Turns a `GameState` into camera-relative sprite draws in a fixed layering
//! order: background, platforms, enemies, projectiles, power-ups,
//! collectibles, player, player overlays. Anything entirely outside the
//! viewport is culled. The actual blitting is behind the `Renderer` trait.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::assets::SpriteId;
use crate::sim::{Aabb, GameState};

/// Blink period while invincible, in ticks
const FLASH_PERIOD: u32 = 8;

/// One sprite draw in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCmd {
    pub sprite: SpriteId,
    /// Top-left corner on screen
    pub screen: Vec2,
    pub size: Vec2,
}

impl DrawCmd {
    pub fn instance(&self) -> SpriteInstance {
        SpriteInstance {
            pos: self.screen.to_array(),
            size: self.size.to_array(),
            sprite: self.sprite.code(),
            _pad: 0,
        }
    }
}

/// GPU instance record for a sprite batch
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SpriteInstance {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub sprite: u32,
    _pad: u32,
}

/// Draw target
pub trait Renderer {
    /// Called once per visible sprite per frame, in layering order
    fn draw(&mut self, sprite: SpriteId, screen_x: f32, screen_y: f32, size: Vec2);
}

struct DrawList<'a> {
    state: &'a GameState,
    cmds: Vec<DrawCmd>,
}

impl DrawList<'_> {
    fn push(&mut self, sprite: SpriteId, rect: &Aabb) {
        let state = self.state;
        let camera = &state.camera;
        if !camera.sees(rect.left(), rect.right(), state.settings.viewport_width) {
            return;
        }
        self.cmds.push(DrawCmd {
            sprite,
            screen: Vec2::new(camera.to_screen_x(rect.left()), rect.top()),
            size: rect.size,
        });
    }
}

/// Build this frame's draw list
pub fn build_draw_list(state: &GameState) -> Vec<DrawCmd> {
    let mut list = DrawList {
        state,
        cmds: Vec::new(),
    };
    let viewport = Vec2::new(state.settings.viewport_width, state.settings.viewport_height);

    // Background is fixed to the screen, not the world
    if !state.levels.is_empty() {
        list.cmds.push(DrawCmd {
            sprite: SpriteId::Background(state.current_level),
            screen: Vec2::ZERO,
            size: viewport,
        });
    }

    for p in &state.platforms {
        list.push(SpriteId::Platform, &p.rect);
    }
    for e in &state.enemies {
        list.push(SpriteId::Enemy(e.kind), &e.rect);
    }
    for p in &state.projectiles {
        list.push(SpriteId::Projectile(p.kind), &p.rect);
    }
    for p in &state.powerups {
        list.push(SpriteId::PowerUp(p.kind), &p.rect);
    }
    for c in &state.collectibles {
        list.push(SpriteId::Collectible(c.kind), &c.rect);
    }

    let player = &state.player;
    let overlay = player.overlay;
    let blink_off = overlay.flashing && (player.invincible_ticks / (FLASH_PERIOD / 2)) % 2 == 1;
    if !blink_off {
        list.push(SpriteId::Player, &player.rect);
        if overlay.helmet {
            list.push(SpriteId::Helmet, &player.rect);
        }
        if overlay.guitar {
            list.push(SpriteId::GuitarOverlay, &player.rect);
        }
        if overlay.laptop {
            list.push(SpriteId::LaptopOverlay, &player.rect);
        }
    }

    list.cmds
}

/// Draw the current frame
pub fn present(state: &GameState, renderer: &mut dyn Renderer) {
    for cmd in build_draw_list(state) {
        renderer.draw(cmd.sprite, cmd.screen.x, cmd.screen.y, cmd.size);
    }
}

/// GPU-ready instance data for the current frame
pub fn sprite_instances(state: &GameState) -> Vec<SpriteInstance> {
    build_draw_list(state).iter().map(DrawCmd::instance).collect()
}

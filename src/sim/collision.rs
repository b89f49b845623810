//! Collision detection and response against static platforms
//!
//! Axis-separated resolution: horizontal motion is applied and resolved
//! before vertical motion, so a diagonal step can never tunnel through a
//! corner. When several platforms overlap at once, each is resolved in turn
//! in the order the platforms are stored (no nearest-surface search). Only
//! `depenetrate`, for bodies that change size or teleport, looks for the
//! nearest clear spot.

use glam::Vec2;

use super::aabb::Aabb;
use super::state::Platform;

/// Result of moving a body through the level geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionResult {
    /// Bottom edge rests on a platform top
    pub grounded: bool,
    /// Horizontal motion was stopped by a wall
    pub blocked_x: bool,
    /// Upward motion was stopped by a ceiling
    pub hit_ceiling: bool,
}

/// Apply horizontal displacement and push the body out of any wall it entered.
///
/// Horizontal velocity is left untouched; only the position is corrected.
/// Returns true if any platform blocked the motion.
pub fn resolve_horizontal(rect: &mut Aabb, vel_x: f32, platforms: &[Platform]) -> bool {
    rect.pos.x += vel_x;

    let mut blocked = false;
    for platform in platforms {
        if !rect.intersects(&platform.rect) {
            continue;
        }
        if vel_x > 0.0 {
            rect.set_right(platform.rect.left());
            blocked = true;
        } else if vel_x < 0.0 {
            rect.set_left(platform.rect.right());
            blocked = true;
        }
    }
    blocked
}

/// Apply vertical displacement and resolve floors/ceilings.
///
/// Landing snaps the bottom edge onto the platform top, zeroes vertical
/// velocity and reports grounded. Bumping a ceiling snaps the top edge to the
/// platform bottom and zeroes vertical velocity.
pub fn resolve_vertical(
    rect: &mut Aabb,
    vel: &mut Vec2,
    platforms: &[Platform],
) -> CollisionResult {
    rect.pos.y += vel.y;

    let mut result = CollisionResult::default();
    for platform in platforms {
        if !rect.intersects(&platform.rect) {
            continue;
        }
        if vel.y > 0.0 {
            rect.set_bottom(platform.rect.top());
            vel.y = 0.0;
            result.grounded = true;
        } else if vel.y < 0.0 {
            rect.set_top(platform.rect.bottom());
            vel.y = 0.0;
            result.hit_ceiling = true;
        }
    }
    result
}

/// One full physics step: horizontal move, gravity, vertical move.
pub fn move_and_collide(
    rect: &mut Aabb,
    vel: &mut Vec2,
    platforms: &[Platform],
    gravity: f32,
    terminal_velocity: f32,
) -> CollisionResult {
    let blocked_x = resolve_horizontal(rect, vel.x, platforms);

    vel.y = (vel.y + gravity).min(terminal_velocity);

    let mut result = resolve_vertical(rect, vel, platforms);
    result.blocked_x = blocked_x;
    result
}

fn is_clear(rect: &Aabb, platforms: &[Platform]) -> bool {
    platforms.iter().all(|p| !rect.intersects(&p.rect))
}

/// Push a body that appeared inside level geometry (growth, respawn) out to
/// the nearest spot that overlaps no platform.
///
/// Candidates are flush against each edge of every overlapping platform and
/// no farther away than the body's own largest dimension. Ties go to the
/// earlier platform in storage order. Returns the applied offset, or `None`
/// with the body untouched when no candidate is clear.
pub fn depenetrate(rect: &mut Aabb, platforms: &[Platform]) -> Option<Vec2> {
    if is_clear(rect, platforms) {
        return Some(Vec2::ZERO);
    }
    let reach = rect.size.max_element();

    let mut best: Option<Vec2> = None;
    for platform in platforms.iter().filter(|p| rect.intersects(&p.rect)) {
        let other = &platform.rect;
        let candidates = [
            Vec2::new(other.right() - rect.left(), 0.0),
            Vec2::new(other.left() - rect.right(), 0.0),
            Vec2::new(0.0, other.top() - rect.bottom()),
            Vec2::new(0.0, other.bottom() - rect.top()),
        ];
        for offset in candidates {
            let dist = offset.length();
            if dist > reach || best.is_some_and(|b| b.length() <= dist) {
                continue;
            }
            let moved = Aabb {
                pos: rect.pos + offset,
                size: rect.size,
            };
            if is_clear(&moved, platforms) {
                best = Some(offset);
            }
        }
    }

    if let Some(offset) = best {
        rect.pos += offset;
    }
    best
}

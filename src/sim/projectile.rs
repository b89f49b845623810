//! Projectile lifecycle: spawn, flight, hits, expiry
//!
//! Projectiles fly in a straight horizontal line, ignore gravity and pass
//! through platforms. A projectile is removed when its lifetime reaches zero
//! or on its first contact with the opposing faction.

use glam::Vec2;

use super::aabb::Aabb;
use super::state::{Direction, Enemy, Faction, GameEvent, Player, Projectile, ProjectileKind};
use crate::tuning::WeaponTuning;

/// Create a projectile centered on `origin`, heading `direction`
pub fn spawn(
    projectiles: &mut Vec<Projectile>,
    id: u32,
    kind: ProjectileKind,
    faction: Faction,
    origin: Vec2,
    direction: Direction,
    weapon: &WeaponTuning,
) {
    projectiles.push(Projectile {
        id,
        kind,
        faction,
        rect: Aabb::from_center(origin, Vec2::splat(weapon.size)),
        vel_x: weapon.speed * direction.sign(),
        lifetime_ticks: weapon.lifetime,
    });
}

/// Move every projectile and count down its lifetime
pub fn advance(projectiles: &mut [Projectile]) {
    for p in projectiles.iter_mut() {
        p.rect.pos.x += p.vel_x;
        p.lifetime_ticks = p.lifetime_ticks.saturating_sub(1);
    }
}

/// Resolve projectile contacts against the opposing faction.
///
/// Runs after `advance` and before `purge_expired`, so a projectile on its
/// last tick of life still gets this tick's hit test. Player projectiles
/// destroy the first enemy they touch (in storage order); enemy projectiles
/// go through the player's damage path. Either way the projectile is spent.
pub fn sweep(
    projectiles: &mut [Projectile],
    enemies: &mut Vec<Enemy>,
    player: &mut Player,
    invincible_ticks: u32,
    events: &mut Vec<GameEvent>,
) {
    for p in projectiles.iter_mut() {
        match p.faction {
            Faction::Player => {
                let Some(index) = enemies.iter().position(|e| e.rect.intersects(&p.rect)) else {
                    continue;
                };
                let enemy = enemies.remove(index);
                log::debug!("{:?} {} hit enemy {}", p.kind, p.id, enemy.id);
                events.push(GameEvent::EnemyShot {
                    enemy_id: enemy.id,
                    by: p.kind,
                });
                p.lifetime_ticks = 0;
            }
            Faction::Enemy => {
                if !p.rect.intersects(&player.rect) {
                    continue;
                }
                if player.take_hit(invincible_ticks) {
                    log::debug!("Enemy {:?} {} hit player", p.kind, p.id);
                    events.push(GameEvent::PlayerDamaged {
                        health: player.health,
                    });
                }
                p.lifetime_ticks = 0;
            }
        }
    }
}

/// Drop spent and expired projectiles
pub fn purge_expired(projectiles: &mut Vec<Projectile>) {
    projectiles.retain(|p| p.lifetime_ticks > 0);
}

//! Enemy behavior: patrol and ranged attack
//!
//! Every enemy patrols; shooters additionally carry a `Turret`. Neither
//! behavior looks at the player.

use glam::Vec2;

use super::projectile;
use super::state::{Direction, Enemy, Faction, GameEvent, GameState, Patrol, ProjectileKind};

impl Patrol {
    pub fn new(start_x: f32, range: f32, speed: f32) -> Self {
        Self {
            start_x,
            range,
            speed,
            direction: Direction::Right,
        }
    }

    #[inline]
    pub fn end_x(&self) -> f32 {
        self.start_x + self.range
    }

    /// Advance one tick from `x`, returning the new x.
    ///
    /// The result is clamped into `[start_x, end_x]` and the heading flips on
    /// reaching either bound.
    pub fn step(&mut self, x: f32) -> f32 {
        let mut next = x + self.speed * self.direction.sign();
        if next <= self.start_x {
            next = self.start_x;
            self.direction = Direction::Right;
        } else if next >= self.end_x() {
            next = self.end_x();
            self.direction = Direction::Left;
        }
        next
    }
}

/// Result of one enemy update
struct Shot {
    kind: ProjectileKind,
    origin: Vec2,
    direction: Direction,
}

fn update_enemy(enemy: &mut Enemy) -> Option<Shot> {
    let x = enemy.patrol.step(enemy.rect.left());
    enemy.rect.set_left(x);

    let turret = enemy.turret.as_mut()?;
    turret.cooldown = turret.cooldown.saturating_sub(1);
    if turret.cooldown > 0 {
        return None;
    }
    turret.cooldown = turret.period;
    Some(Shot {
        kind: turret.kind,
        origin: enemy.rect.center(),
        direction: enemy.patrol.direction,
    })
}

/// Move every enemy along its patrol and fire ready turrets
pub fn update_enemies(state: &mut GameState) {
    let shots: Vec<Shot> = state.enemies.iter_mut().filter_map(update_enemy).collect();

    for shot in shots {
        let kind = shot.kind;
        let id = state.next_entity_id();
        projectile::spawn(
            &mut state.projectiles,
            id,
            kind,
            Faction::Enemy,
            shot.origin,
            shot.direction,
            state.tuning.weapon(kind),
        );
        state.events.push(GameEvent::ProjectileFired {
            kind,
            faction: Faction::Enemy,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aabb::Aabb;
    use crate::sim::state::{EnemyKind, Turret};
    use proptest::prelude::*;

    fn enemy(x: f32, range: f32, speed: f32, turret: Option<Turret>) -> Enemy {
        Enemy {
            id: 1,
            kind: if turret.is_some() { EnemyKind::Shooter } else { EnemyKind::Walker },
            rect: Aabb::new(x, 520.0, 40.0, 40.0),
            patrol: Patrol::new(x, range, speed),
            turret,
        }
    }

    #[test]
    fn test_patrol_reverses_only_at_bounds() {
        let mut e = enemy(500.0, 150.0, 2.0, None);
        let mut flips = Vec::new();
        let mut last = e.patrol.direction;

        for _ in 0..400 {
            update_enemy(&mut e);
            let x = e.rect.left();
            assert!((500.0..=650.0).contains(&x), "x out of range: {x}");
            if e.patrol.direction != last {
                flips.push(x);
                last = e.patrol.direction;
            }
        }

        assert!(!flips.is_empty());
        for x in flips {
            assert!(x == 500.0 || x == 650.0, "flipped at {x}");
        }
    }

    #[test]
    fn test_patrol_reaches_far_bound_after_range_over_speed_ticks() {
        let mut e = enemy(500.0, 150.0, 2.0, None);
        for _ in 0..74 {
            update_enemy(&mut e);
        }
        assert_eq!(e.rect.left(), 648.0);
        assert_eq!(e.patrol.direction, Direction::Right);
        update_enemy(&mut e);
        assert_eq!(e.rect.left(), 650.0);
        assert_eq!(e.patrol.direction, Direction::Left);
        update_enemy(&mut e);
        assert_eq!(e.rect.left(), 648.0);
    }

    #[test]
    fn test_turret_fires_on_period() {
        let turret = Turret {
            kind: ProjectileKind::Puck,
            cooldown: 3,
            period: 3,
        };
        let mut e = enemy(100.0, 100.0, 1.0, Some(turret));
        assert!(update_enemy(&mut e).is_none());
        assert!(update_enemy(&mut e).is_none());
        let shot = update_enemy(&mut e).expect("third tick fires");
        assert_eq!(shot.kind, ProjectileKind::Puck);
        assert_eq!(shot.direction, Direction::Right);
        assert_eq!(shot.origin, e.rect.center());
        assert_eq!(e.turret.unwrap().cooldown, 3);
    }

    #[test]
    fn test_walker_never_fires() {
        let mut e = enemy(100.0, 100.0, 1.0, None);
        for _ in 0..500 {
            assert!(update_enemy(&mut e).is_none());
        }
    }

    proptest! {
        #[test]
        fn prop_patrol_stays_in_range(
            start in -1000.0f32..6000.0,
            range in 0.0f32..400.0,
            speed in 0.1f32..8.0,
            ticks in 1usize..600,
        ) {
            let mut patrol = Patrol::new(start, range, speed);
            let mut x = start;
            for _ in 0..ticks {
                x = patrol.step(x);
                prop_assert!(x >= start && x <= start + range);
            }
        }
    }
}

//! Bullet hit resolution: walls first, then the opposing side.

use crate::config::SimulationConfig;
use crate::entities::{Actor, BulletOwner, BulletPool};
use crate::map::GridMap;
use crate::physics::sphere_intersects_box;

use super::projectiles::hits_map;

/// What happened during one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub wall_hits: u32,
    /// Damage that landed on the player.
    pub player_hits: u32,
    /// Damage that landed on enemies.
    pub enemy_hits: u32,
    pub kills: u32,
}

/// Resolve every active bullet against the map and its valid targets.
///
/// Each bullet affects at most one target. Targets inside their hit window
/// still stop the bullet but take no damage.
pub fn resolve(
    bullets: &mut BulletPool,
    player: &mut Actor,
    enemies: &mut [Actor],
    map: &GridMap,
    config: &SimulationConfig,
) -> CombatReport {
    let mut report = CombatReport::default();
    let damage = config.projectile.damage;

    for bullet in bullets.bullets_mut().iter_mut().filter(|b| b.active) {
        if hits_map(bullet, map) {
            bullet.active = false;
            report.wall_hits += 1;
            continue;
        }

        match bullet.owner {
            BulletOwner::Enemy => {
                if sphere_intersects_box(bullet.position, bullet.radius, &player.bounds()) {
                    if player.apply_damage(damage, config.player.hit_window) {
                        report.player_hits += 1;
                        tracing::debug!("Player hit, health {}", player.health);
                    }
                    bullet.active = false;
                }
            }
            BulletOwner::Player => {
                let target = enemies.iter_mut().enumerate().find(|(_, e)| {
                    e.active && sphere_intersects_box(bullet.position, bullet.radius, &e.bounds())
                });
                if let Some((slot, enemy)) = target {
                    if enemy.apply_damage(damage, config.enemy.hit_window) {
                        report.enemy_hits += 1;
                        if enemy.health <= 0 {
                            enemy.active = false;
                            report.kills += 1;
                            tracing::debug!("Enemy {} killed", slot);
                        }
                    }
                    bullet.active = false;
                }
            }
        }
    }

    report
}

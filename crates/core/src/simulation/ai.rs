//! Enemy behaviour: close in on the player, keep a standoff, fire on a timer.

use glam::Vec3;

use crate::config::SimulationConfig;
use crate::entities::{Actor, BulletOwner, BulletPool};
use crate::map::GridMap;
use crate::random::SeededRandom;

use super::movement::{slide, GroundRules};
use super::projectiles::horizontal_aim;

/// Run one AI tick for every active enemy, in slot order.
///
/// Also decays each enemy's hit window. Returns the number of shots fired.
pub fn update_enemies(
    enemies: &mut [Actor],
    player: &Actor,
    bullets: &mut BulletPool,
    map: &GridMap,
    rng: &mut SeededRandom,
    config: &SimulationConfig,
    dt: f32,
) -> u32 {
    let enemy_cfg = &config.enemy;
    let rules = GroundRules::from(&config.player);
    let target = player.position + Vec3::Y * config.player.muzzle_height;
    let mut shots = 0;

    for enemy in enemies.iter_mut().filter(|e| e.active) {
        enemy.decay_hit(dt);

        let to_player = player.position - enemy.position;
        let distance = to_player.length();

        if distance > enemy_cfg.standoff {
            let step = to_player.normalize_or_zero() * enemy.speed;
            slide(enemy, Vec3::new(step.x, 0.0, step.z), map, rules);
        }

        enemy.shoot_timer -= dt;
        if enemy.shoot_timer <= 0.0 && distance < enemy_cfg.shoot_range {
            let muzzle = enemy.position + Vec3::Y * enemy_cfg.muzzle_height;
            // Standing on the player leaves nothing to aim at; try next tick.
            let Some(direction) = horizontal_aim(target - muzzle) else {
                continue;
            };
            if bullets
                .fire(muzzle, direction, BulletOwner::Enemy, &config.projectile)
                .is_some()
            {
                shots += 1;
            }
            enemy.shoot_timer = enemy_cfg.shoot_cooldown + rng.jitter(enemy_cfg.shoot_jitter);
        }
    }

    shots
}

//! Bullet spawning, flight and map hits.

use glam::Vec3;

use crate::entities::{Bullet, BulletPool};
use crate::map::GridMap;
use crate::physics::sphere_intersects_box;

/// Flatten an aim vector onto the horizontal plane.
///
/// Returns `None` for aims with no horizontal component.
pub fn horizontal_aim(aim: Vec3) -> Option<Vec3> {
    let dir = Vec3::new(aim.x, 0.0, aim.z).normalize_or_zero();
    (dir != Vec3::ZERO).then_some(dir)
}

/// Move every active bullet one tick and retire the runaways.
///
/// Range is measured from the world origin, not from the firing point.
pub fn advance(pool: &mut BulletPool, max_range: f32) {
    for bullet in pool.bullets_mut().iter_mut().filter(|b| b.active) {
        bullet.position += bullet.direction * bullet.speed;
        if bullet.position.length() > max_range {
            bullet.active = false;
        }
    }
}

/// Whether a bullet has struck a wall or left the map volume.
pub fn hits_map(bullet: &Bullet, map: &GridMap) -> bool {
    if !sphere_intersects_box(bullet.position, bullet.radius, &map.bounds()) {
        return true;
    }
    map.solid_neighbors(bullet.position)
        .any(|(x, z)| sphere_intersects_box(bullet.position, bullet.radius, &map.cell_bounds(x, z)))
}

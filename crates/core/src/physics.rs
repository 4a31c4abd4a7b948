//! Geometry and collision primitives.
//!
//! Everything here is axis-aligned: actors, map cells and the map itself are
//! boxes, bullets are spheres. No external physics engine needed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Closest point inside the box to `point`.
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }
}

/// Bounds of an actor standing at `position`.
///
/// The vertical origin is the actor's base: the box spans
/// `[y, y + size.y]`, while X and Z are centered on the position.
#[inline]
pub fn actor_bounds(position: Vec3, size: Vec3) -> Aabb {
    Aabb {
        min: Vec3::new(
            position.x - size.x / 2.0,
            position.y,
            position.z - size.z / 2.0,
        ),
        max: Vec3::new(
            position.x + size.x / 2.0,
            position.y + size.y,
            position.z + size.z / 2.0,
        ),
    }
}

/// Unit box of map cell `(cell_x, cell_z)`.
///
/// Cell indices address box centers: cell `x` spans `[x - 0.5, x + 0.5]` in
/// map-local X, translated by the map origin. Vertically the cell sits on
/// the origin plane and is one unit tall.
#[inline]
pub fn cell_bounds(cell_x: i32, cell_z: i32, map_origin: Vec3) -> Aabb {
    let x = cell_x as f32 - 0.5;
    let z = cell_z as f32 - 0.5;
    Aabb {
        min: Vec3::new(map_origin.x + x, map_origin.y, map_origin.z + z),
        max: Vec3::new(
            map_origin.x + x + 1.0,
            map_origin.y + 1.0,
            map_origin.z + z + 1.0,
        ),
    }
}

/// Box-box overlap test (AABB). Touching faces count as overlap.
#[inline]
pub fn boxes_intersect(a: &Aabb, b: &Aabb) -> bool {
    a.max.x >= b.min.x
        && a.min.x <= b.max.x
        && a.max.y >= b.min.y
        && a.min.y <= b.max.y
        && a.max.z >= b.min.z
        && a.min.z <= b.max.z
}

/// Sphere-box overlap test.
///
/// Collides iff the squared distance from `center` to the closest point of
/// the box is strictly less than `radius²`; a sphere exactly touching the box
/// does not collide.
#[inline]
pub fn sphere_intersects_box(center: Vec3, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    center.distance_squared(closest) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_bounds_rest_on_base() {
        let b = actor_bounds(Vec3::new(1.0, 0.5, -2.0), Vec3::splat(0.5));
        assert_eq!(b.min, Vec3::new(0.75, 0.5, -2.25));
        assert_eq!(b.max, Vec3::new(1.25, 1.0, -1.75));
    }

    #[test]
    fn test_cell_bounds_use_half_offset() {
        let b = cell_bounds(3, 2, Vec3::new(-16.0, 0.0, -8.0));
        assert_eq!(b.min, Vec3::new(-13.5, 0.0, -6.5));
        assert_eq!(b.max, Vec3::new(-12.5, 1.0, -5.5));
    }

    #[test]
    fn test_box_overlap_is_inclusive() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let touching = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let apart = Aabb::new(Vec3::new(1.01, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(boxes_intersect(&a, &touching));
        assert!(!boxes_intersect(&a, &apart));
    }

    #[test]
    fn test_box_overlap_needs_all_axes() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let above = Aabb::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 3.0, 1.0));
        assert!(!boxes_intersect(&a, &above));
    }

    #[test]
    fn test_sphere_box_boundary_does_not_collide() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        // Distance to the face is exactly the radius.
        assert!(!sphere_intersects_box(Vec3::new(1.5, 0.5, 0.5), 0.5, &b));
        assert!(sphere_intersects_box(Vec3::new(1.49, 0.5, 0.5), 0.5, &b));
    }

    #[test]
    fn test_sphere_inside_box_collides() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(sphere_intersects_box(Vec3::splat(0.5), 0.01, &b));
    }

    #[test]
    fn test_sphere_near_corner_uses_squared_distance() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        // Corner distance is sqrt(0.02) ~= 0.141
        let c = Vec3::new(1.1, 1.1, 0.5);
        assert!(sphere_intersects_box(c, 0.15, &b));
        assert!(!sphere_intersects_box(c, 0.14, &b));
    }
}

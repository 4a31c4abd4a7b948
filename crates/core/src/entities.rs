//! Entity types and slot storage for the simulation.
//!
//! Enemies and bullets live in fixed-capacity `Vec`s indexed by slot. A slot
//! index never changes for the life of the entity it holds; the `active` flag
//! decides whether the entity takes part in a tick and whether the slot can
//! be reused.

use bincode::{Decode, Encode};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{EnemyConfig, Exhaustion, PlayerConfig, ProjectileConfig};
use crate::physics::{actor_bounds, Aabb};

/// Distinguishes the player's policy from an enemy's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum ActorKind {
    /// Has vertical physics and can stand on top of walls.
    Player,
    /// Kinematic, always at a fixed height.
    Enemy,
}

impl ActorKind {
    /// Whether touching a wall's top face counts as ground instead of a block.
    pub const fn is_vertical_sensitive(self) -> bool {
        matches!(self, ActorKind::Player)
    }
}

/// Sprite orientation, in sprite-sheet row order. Presentation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum Facing {
    #[default]
    Down,
    Right,
    Up,
    Left,
}

/// A player or enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Actor {
    pub kind: ActorKind,
    /// Base of the actor (bottom face center).
    #[bincode(with_serde)]
    pub position: Vec3,
    #[bincode(with_serde)]
    pub size: Vec3,
    /// Only `y` is used, and only by the player.
    #[bincode(with_serde)]
    pub velocity: Vec3,
    pub grounded: bool,
    pub health: i32,
    pub max_health: i32,
    pub hit: bool,
    pub hit_timer: f32,
    pub active: bool,
    pub facing: Facing,
    /// Seconds until the actor may fire again.
    pub shoot_timer: f32,
    /// Horizontal displacement per tick.
    pub speed: f32,
}

impl Actor {
    pub fn player(config: &PlayerConfig) -> Self {
        Self {
            kind: ActorKind::Player,
            position: config.spawn,
            size: config.size,
            velocity: Vec3::ZERO,
            grounded: true,
            health: config.max_health,
            max_health: config.max_health,
            hit: false,
            hit_timer: 0.0,
            active: true,
            facing: Facing::Down,
            shoot_timer: 0.0,
            speed: config.speed,
        }
    }

    pub fn enemy(position: Vec3, shoot_timer: f32, config: &EnemyConfig) -> Self {
        Self {
            kind: ActorKind::Enemy,
            position,
            size: config.size,
            velocity: Vec3::ZERO,
            grounded: true,
            health: config.max_health,
            max_health: config.max_health,
            hit: false,
            hit_timer: 0.0,
            active: true,
            facing: Facing::Down,
            shoot_timer,
            speed: config.speed,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        actor_bounds(self.position, self.size)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Health as a 0..=1 fraction for health bars. Negative health reads as 0.
    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    /// Count the hit window down. Clears the hit flag once it reaches 0.
    pub fn decay_hit(&mut self, dt: f32) {
        if !self.hit {
            return;
        }
        self.hit_timer -= dt;
        if self.hit_timer <= 0.0 {
            self.hit_timer = 0.0;
            self.hit = false;
        }
    }

    /// Apply damage unless inside the hit window. Returns whether it landed.
    pub fn apply_damage(&mut self, amount: i32, window: f32) -> bool {
        if self.hit {
            return false;
        }
        self.health -= amount;
        self.hit = true;
        self.hit_timer = window;
        true
    }
}

/// Who fired a bullet. Decides valid targets and draw color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum BulletOwner {
    Player,
    Enemy,
}

impl BulletOwner {
    /// RGBA draw color: yellow for the player, red for enemies.
    pub const fn color(self) -> [u8; 4] {
        match self {
            BulletOwner::Player => [253, 249, 0, 255],
            BulletOwner::Enemy => [230, 41, 55, 255],
        }
    }
}

/// A pooled projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Bullet {
    #[bincode(with_serde)]
    pub position: Vec3,
    /// Unit length, horizontal.
    #[bincode(with_serde)]
    pub direction: Vec3,
    /// Displacement per tick.
    pub speed: f32,
    pub radius: f32,
    pub active: bool,
    pub owner: BulletOwner,
}

impl Bullet {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Fixed-capacity bullet storage.
///
/// Slots are allocated lazily up to `capacity` and reused once inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct BulletPool {
    slots: Vec<Bullet>,
    capacity: usize,
    fire_count: u64,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            fire_count: 0,
        }
    }

    /// Spawn a bullet and return its slot.
    ///
    /// Takes the lowest inactive slot, growing the pool while below capacity.
    /// When every slot is active, `config.on_exhausted` decides: `Reject`
    /// drops the shot, `RecycleOldest` overwrites slot `fire_count % capacity`.
    pub fn fire(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        owner: BulletOwner,
        config: &ProjectileConfig,
    ) -> Option<usize> {
        if self.capacity == 0 {
            return None;
        }
        let bullet = Bullet {
            position: origin,
            direction,
            speed: config.speed,
            radius: config.radius,
            active: true,
            owner,
        };

        let index = match self.slots.iter().position(|b| !b.active) {
            Some(i) => i,
            None if self.slots.len() < self.capacity => {
                self.slots.push(bullet);
                self.slots.len() - 1
            }
            None => match config.on_exhausted {
                Exhaustion::Reject => {
                    tracing::trace!("Bullet pool full ({}), shot dropped", self.capacity);
                    return None;
                }
                Exhaustion::RecycleOldest => {
                    let i = (self.fire_count % self.capacity as u64) as usize;
                    tracing::trace!("Bullet pool full, recycling slot {}", i);
                    i
                }
            },
        };

        self.slots[index] = bullet;
        self.fire_count += 1;
        Some(index)
    }

    /// All slots, active or not, in slot order.
    pub fn bullets(&self) -> &[Bullet] {
        &self.slots
    }

    pub fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.slots
    }

    pub fn active(&self) -> impl Iterator<Item = &Bullet> {
        self.slots.iter().filter(|b| b.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Accepted shots since creation.
    pub fn fire_count(&self) -> u64 {
        self.fire_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectiles(capacity: usize, on_exhausted: Exhaustion) -> ProjectileConfig {
        ProjectileConfig {
            capacity,
            on_exhausted,
            ..ProjectileConfig::default()
        }
    }

    #[test]
    fn test_hit_timer_decays_to_exactly_zero() {
        let mut actor = Actor::enemy(Vec3::ZERO, 0.0, &EnemyConfig::default());
        assert!(actor.apply_damage(10, 0.2));
        assert_eq!(actor.health, 20);

        actor.decay_hit(0.15);
        assert!(actor.is_hit());
        assert!(actor.hit_timer > 0.0);

        actor.decay_hit(0.15);
        assert!(!actor.is_hit());
        assert_eq!(actor.hit_timer, 0.0);
    }

    #[test]
    fn test_damage_ignored_inside_hit_window() {
        let mut actor = Actor::player(&PlayerConfig::default());
        assert!(actor.apply_damage(10, 0.5));
        assert!(!actor.apply_damage(10, 0.5));
        assert_eq!(actor.health, 90);

        actor.decay_hit(0.5);
        assert!(actor.apply_damage(10, 0.5));
        assert_eq!(actor.health, 80);
    }

    #[test]
    fn test_health_fraction_clamps() {
        let mut actor = Actor::enemy(Vec3::ZERO, 0.0, &EnemyConfig::default());
        actor.health = -10;
        assert_eq!(actor.health_fraction(), 0.0);
        actor.health = 15;
        assert!((actor.health_fraction() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fire_prefers_lowest_inactive_slot() {
        let config = projectiles(4, Exhaustion::Reject);
        let mut pool = BulletPool::new(4);
        for i in 0..3 {
            assert_eq!(pool.fire(Vec3::ZERO, Vec3::X, BulletOwner::Player, &config), Some(i));
        }
        pool.bullets_mut()[1].active = false;
        assert_eq!(pool.fire(Vec3::ONE, Vec3::Z, BulletOwner::Enemy, &config), Some(1));
        assert_eq!(pool.bullets()[1].owner, BulletOwner::Enemy);
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_full_pool_rejects_by_default() {
        let config = projectiles(2, Exhaustion::Reject);
        let mut pool = BulletPool::new(2);
        pool.fire(Vec3::ZERO, Vec3::X, BulletOwner::Player, &config);
        pool.fire(Vec3::ZERO, Vec3::X, BulletOwner::Player, &config);
        assert_eq!(pool.fire(Vec3::ZERO, Vec3::X, BulletOwner::Player, &config), None);
        assert_eq!(pool.fire_count(), 2);
        assert_eq!(pool.bullets().len(), 2);
    }

    #[test]
    fn test_full_pool_recycles_fire_count_mod_capacity() {
        let config = projectiles(3, Exhaustion::RecycleOldest);
        let mut pool = BulletPool::new(3);
        for _ in 0..3 {
            pool.fire(Vec3::ZERO, Vec3::X, BulletOwner::Player, &config);
        }
        // fire_count = 3 -> slot 0, then 4 -> slot 1
        assert_eq!(pool.fire(Vec3::ONE, Vec3::Z, BulletOwner::Enemy, &config), Some(0));
        assert_eq!(pool.fire(Vec3::ONE, Vec3::Z, BulletOwner::Enemy, &config), Some(1));
        assert_eq!(pool.bullets().len(), 3);
        assert_eq!(pool.bullets()[0].position, Vec3::ONE);
    }

    #[test]
    fn test_zero_capacity_pool_absorbs_every_shot() {
        for policy in [Exhaustion::Reject, Exhaustion::RecycleOldest] {
            let config = projectiles(0, policy);
            let mut pool = BulletPool::new(0);
            assert_eq!(pool.fire(Vec3::ZERO, Vec3::X, BulletOwner::Player, &config), None);
            assert!(pool.bullets().is_empty());
            assert_eq!(pool.fire_count(), 0);
        }
    }

    #[test]
    fn test_owner_colors_differ() {
        assert_ne!(BulletOwner::Player.color(), BulletOwner::Enemy.color());
    }
}

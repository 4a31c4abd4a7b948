//! Simulation tuning.
//!
//! Displacements (speeds, gravity, jump impulse) are per-tick constants tuned
//! for a 60 Hz step. Durations (hit windows, cooldowns) are in seconds and
//! are decayed by the measured frame delta.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub projectile: ProjectileConfig,
    pub map: MapConfig,
}

impl SimulationConfig {
    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projectile.capacity == 0 {
            return Err(ConfigError::Invalid("projectile.capacity must be > 0"));
        }
        if self.enemy.capacity == 0 {
            return Err(ConfigError::Invalid("enemy.capacity must be > 0"));
        }
        if self.enemy.initial_count > self.enemy.capacity {
            return Err(ConfigError::Invalid("enemy.initial_count exceeds enemy.capacity"));
        }
        if self.player.size.min_element() <= 0.0 || self.enemy.size.min_element() <= 0.0 {
            return Err(ConfigError::Invalid("actor sizes must be positive"));
        }
        if self.projectile.radius <= 0.0 {
            return Err(ConfigError::Invalid("projectile.radius must be positive"));
        }
        if self.player.max_health <= 0 || self.enemy.max_health <= 0 {
            return Err(ConfigError::Invalid("max_health must be positive"));
        }
        if self.player.hit_window <= 0.0 || self.enemy.hit_window <= 0.0 {
            return Err(ConfigError::Invalid("hit_window must be positive"));
        }
        Ok(())
    }
}

/// Player tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: Vec3,
    pub size: Vec3,

    /// Horizontal displacement per tick.
    pub speed: f32,

    /// Vertical velocity set by a jump (units/tick).
    pub jump_impulse: f32,

    /// Subtracted from vertical velocity every airborne tick.
    pub gravity: f32,

    /// Hard floor for the actor's base.
    pub ground_level: f32,

    /// How far below a cell top the base may sink and still land on it.
    pub landing_tolerance: f32,

    pub max_health: i32,

    /// Invulnerability after taking damage (seconds).
    pub hit_window: f32,

    /// Minimum time between shots (seconds).
    pub fire_cooldown: f32,

    /// Height above the base that bullets spawn from.
    pub muzzle_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(0.0, 0.5, -2.0),
            size: Vec3::splat(0.5),
            speed: 0.25,
            jump_impulse: 0.2,
            gravity: 0.01,
            ground_level: 0.5,
            landing_tolerance: 0.1,
            max_health: 100,
            hit_window: 0.5,
            fire_cooldown: 0.5,
            muzzle_height: 0.5,
        }
    }
}

/// Enemy tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: Vec3,

    /// Displacement per tick while closing in.
    pub speed: f32,

    pub max_health: i32,
    pub hit_window: f32,

    /// Enemies stop approaching once this close to the player.
    pub standoff: f32,

    /// Enemies only fire when the player is closer than this.
    pub shoot_range: f32,

    /// Base delay between shots (seconds).
    pub shoot_cooldown: f32,

    /// Maximum random offset added to each cooldown reset, drawn in 0.01 steps.
    pub shoot_jitter: f32,

    pub capacity: usize,
    pub initial_count: usize,

    /// Enemies spawn on cells `0..=spawn_extent` of both axes.
    pub spawn_extent: u32,

    /// Fixed height enemies move at.
    pub height: f32,

    pub muzzle_height: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            size: Vec3::splat(0.5),
            speed: 0.13,
            max_health: 30,
            hit_window: 0.2,
            standoff: 3.0,
            shoot_range: 10.0,
            shoot_cooldown: 2.0,
            shoot_jitter: 0.5,
            capacity: 100,
            initial_count: 10,
            spawn_extent: 10,
            height: 0.5,
            muzzle_height: 0.5,
        }
    }
}

/// What [`BulletPool::fire`](crate::entities::BulletPool::fire) does when
/// every slot is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exhaustion {
    /// Drop the new shot.
    #[default]
    Reject,
    /// Overwrite slot `fire_count % capacity`.
    RecycleOldest,
}

/// Bullet tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Displacement per tick along the bullet's direction.
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,

    /// Bullets farther than this from the world origin are retired.
    pub max_range: f32,

    pub capacity: usize,
    pub on_exhausted: Exhaustion,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 0.3,
            radius: 0.15,
            damage: 10,
            max_range: 50.0,
            capacity: 500,
            on_exhausted: Exhaustion::Reject,
        }
    }
}

/// Map construction thresholds and placement.
///
/// `wall_threshold` decides physics; `debug_threshold` only decides which
/// cells a debug view draws as wireframes. They are independent on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub origin: Vec3,
    pub wall_threshold: u8,
    pub debug_threshold: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::new(-16.0, 0.0, -8.0),
            wall_threshold: 50,
            debug_threshold: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.enemy.max_health, 30);
        assert_eq!(config.projectile.capacity, 500);
        assert_ne!(config.map.wall_threshold, config.map.debug_threshold);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json_str(
            r#"{ "enemy": { "initial_count": 2 }, "projectile": { "on_exhausted": "RecycleOldest" } }"#,
        )
        .unwrap();
        assert_eq!(config.enemy.initial_count, 2);
        assert_eq!(config.enemy.speed, EnemyConfig::default().speed);
        assert_eq!(config.projectile.on_exhausted, Exhaustion::RecycleOldest);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_invalid_capacity_rejected() {
        let err = SimulationConfig::from_json_str(r#"{ "projectile": { "capacity": 0 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = SimulationConfig::from_json_str("{ not json");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimulationConfig::default();
        let json = config.to_json_string().unwrap();
        assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
    }
}

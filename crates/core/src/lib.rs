//! Cubicrogue Core - Top-down Action Simulation
//!
//! Movement, gravity, tile-map collision, bullets and combat for a small
//! top-down shooter. Rendering, input devices and asset loading live outside
//! this crate: a frontend packs a [`PlayerInput`] each frame, calls
//! [`Simulation::tick`], and draws what the read-only accessors return.
//!
//! # Determinism Rules
//!
//! 1. No `rand::thread_rng()` - Use `SeededRandom` only
//! 2. No system time - timers only advance by the `dt` passed to `tick`
//! 3. Ordered iteration - slot `Vec`s, scanned by index

pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod map;
pub mod physics;
pub mod random;
pub mod simulation;

pub use config::{Exhaustion, SimulationConfig};
pub use entities::{Actor, ActorKind, Bullet, BulletOwner, BulletPool, Facing};
pub use error::{ConfigError, MapError, SnapshotError};
pub use input::{aim_from_screen_ray, PlayerInput};
pub use map::GridMap;
pub use physics::Aabb;
pub use random::SeededRandom;
pub use simulation::{step_simulation, GameState, GameStatus, Simulation};

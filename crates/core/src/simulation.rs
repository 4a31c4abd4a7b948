//! Core game simulation.
//!
//! [`step_simulation`] advances a [`GameState`] by one tick against an
//! immutable [`GridMap`]. [`Simulation`] owns all three pieces and is what a
//! presentation layer drives once per rendered frame.
//!
//! Tick order: player (hit decay, move, jump, fire, gravity), enemy AI,
//! bullet flight, bullet hits.

pub mod ai;
pub mod combat;
pub mod movement;
pub mod projectiles;

use bincode::{Decode, Encode};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{EnemyConfig, SimulationConfig};
use crate::entities::{Actor, Bullet, BulletOwner, BulletPool};
use crate::error::SnapshotError;
use crate::input::PlayerInput;
use crate::map::GridMap;
use crate::random::SeededRandom;

use self::movement::GroundRules;

/// Whether the simulation advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum GameStatus {
    #[default]
    Playing,
    Paused,
    /// The player ran out of health. Terminal.
    GameOver,
}

/// Everything that changes from tick to tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct GameState {
    pub frame: u32,
    pub status: GameStatus,
    pub player: Actor,
    /// Enemy slots. Indices are stable; inactive slots are reused by spawns.
    pub enemies: Vec<Actor>,
    pub bullets: BulletPool,
    pub rng: SeededRandom,
}

impl GameState {
    /// Fresh state with the player at its spawn and `initial_count` enemies
    /// scattered over the first cells of the map.
    pub fn new(seed: u32, config: &SimulationConfig) -> Self {
        let mut state = Self {
            frame: 0,
            status: GameStatus::Playing,
            player: Actor::player(&config.player),
            enemies: Vec::with_capacity(config.enemy.capacity),
            bullets: BulletPool::new(config.projectile.capacity),
            rng: SeededRandom::new(seed),
        };

        let extent = config.enemy.spawn_extent as i32;
        for _ in 0..config.enemy.initial_count {
            let x = state.rng.next_inclusive(0, extent) as f32 + 0.5;
            let z = state.rng.next_inclusive(0, extent) as f32 + 0.5;
            state.spawn_enemy(Vec3::new(x, config.enemy.height, z), &config.enemy);
        }

        state
    }

    /// Place an enemy in the first free slot. Returns the slot, or `None`
    /// when every slot up to capacity is taken.
    pub fn spawn_enemy(&mut self, position: Vec3, config: &EnemyConfig) -> Option<usize> {
        let slot = match self.enemies.iter().position(|e| !e.active) {
            Some(slot) => slot,
            None if self.enemies.len() < config.capacity => self.enemies.len(),
            None => {
                tracing::trace!("Enemy slots full ({}), spawn dropped", config.capacity);
                return None;
            }
        };

        let shoot_timer = self.rng.next_inclusive(0, 100) as f32 / 100.0 * config.shoot_cooldown;
        let enemy = Actor::enemy(position, shoot_timer, config);
        if slot == self.enemies.len() {
            self.enemies.push(enemy);
        } else {
            self.enemies[slot] = enemy;
        }
        Some(slot)
    }

    pub fn active_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.active).count()
    }
}

/// Advance `state` by one tick. Does nothing unless the game is playing.
///
/// Displacements (movement, gravity, bullets) are fixed per tick; only the
/// timers (hit windows, fire cooldowns) consume `dt`.
pub fn step_simulation(
    state: &mut GameState,
    map: &GridMap,
    config: &SimulationConfig,
    input: &PlayerInput,
    dt: f32,
) {
    if state.status != GameStatus::Playing {
        return;
    }
    state.frame += 1;

    update_player(state, map, config, input, dt);

    let GameState {
        player,
        enemies,
        bullets,
        rng,
        ..
    } = &mut *state;

    let shots = ai::update_enemies(enemies, player, bullets, map, rng, config, dt);
    projectiles::advance(bullets, config.projectile.max_range);
    let report = combat::resolve(bullets, player, enemies, map, config);

    tracing::trace!(
        frame = state.frame,
        enemy_shots = shots,
        wall_hits = report.wall_hits,
        player_hits = report.player_hits,
        enemy_hits = report.enemy_hits,
        kills = report.kills,
        "tick"
    );

    if !state.player.is_alive() {
        state.status = GameStatus::GameOver;
        tracing::debug!("Player died on frame {}", state.frame);
    }
}

fn update_player(
    state: &mut GameState,
    map: &GridMap,
    config: &SimulationConfig,
    input: &PlayerInput,
    dt: f32,
) {
    let cfg = &config.player;
    let rules = GroundRules::from(cfg);
    let player = &mut state.player;

    player.decay_hit(dt);

    let (h, v) = (input.horizontal(), input.vertical());
    let delta = Vec3::new(h as f32, 0.0, v as f32) * player.speed;
    movement::slide(player, delta, map, rules);
    movement::update_facing(player, h, v);

    if input.jump() {
        movement::jump(player, cfg.jump_impulse);
    }

    if player.shoot_timer > 0.0 {
        player.shoot_timer -= dt;
    }
    if input.fire() && player.shoot_timer <= 0.0 {
        let muzzle = player.position + Vec3::Y * cfg.muzzle_height;
        if let Some(direction) = projectiles::horizontal_aim(input.aim) {
            state
                .bullets
                .fire(muzzle, direction, BulletOwner::Player, &config.projectile);
            player.shoot_timer = cfg.fire_cooldown;
        }
    }

    movement::integrate_vertical(player, map, rules, cfg.gravity);
}

/// The main simulation engine.
pub struct Simulation {
    pub config: SimulationConfig,
    map: GridMap,
    pub state: GameState,
}

impl Simulation {
    /// The config is taken as given; run [`SimulationConfig::validate`]
    /// first when it comes from outside. Degenerate values such as a zero
    /// bullet capacity are absorbed, never fatal.
    pub fn new(config: SimulationConfig, map: GridMap, seed: u32) -> Self {
        let state = GameState::new(seed, &config);
        tracing::info!(
            "Simulation started: seed {}, {} enemies",
            seed,
            state.active_enemies()
        );
        Self { config, map, state }
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self, input: &PlayerInput, dt: f32) {
        step_simulation(&mut self.state, &self.map, &self.config, input, dt);
    }

    /// Flip between playing and paused. Game over is left alone.
    pub fn toggle_pause(&mut self) -> GameStatus {
        self.state.status = match self.state.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::GameOver => GameStatus::GameOver,
        };
        self.state.status
    }

    pub fn spawn_enemy(&mut self, position: Vec3) -> Option<usize> {
        self.state.spawn_enemy(position, &self.config.enemy)
    }

    pub fn player(&self) -> &Actor {
        &self.state.player
    }

    pub fn enemies(&self) -> &[Actor] {
        &self.state.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        self.state.bullets.bullets()
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Get the current frame number.
    pub fn frame(&self) -> u32 {
        self.state.frame
    }

    /// Encode the current state for rollback or replay.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::encode_to_vec(&self.state, bincode::config::standard())?)
    }

    /// Replace the current state with a snapshot.
    pub fn restore(&mut self, data: &[u8]) -> Result<(), SnapshotError> {
        let (state, _): (GameState, _) =
            bincode::decode_from_slice(data, bincode::config::standard())?;
        self.state = state;
        Ok(())
    }
}

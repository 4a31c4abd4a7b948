//! Scripted stand-in for a human player.

use cubicrogue_core::{PlayerInput, Simulation};
use glam::Vec3;

/// Frames spent walking in one direction before turning.
const LEG_FRAMES: u32 = 45;

/// Strafes in a square, hops now and then, and shoots at the nearest enemy.
#[derive(Debug, Default)]
pub struct Autopilot {
    frame: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_input(&mut self, sim: &Simulation) -> PlayerInput {
        let leg = (self.frame / LEG_FRAMES) % 4;
        let mut bits = match leg {
            0 => PlayerInput::RIGHT,
            1 => PlayerInput::DOWN,
            2 => PlayerInput::LEFT,
            _ => PlayerInput::UP,
        };
        if self.frame % 90 == 30 {
            bits |= PlayerInput::JUMP;
        }

        let mut input = PlayerInput::from_bits(bits);
        if let Some(target) = nearest_enemy(sim) {
            input.aim = target - sim.player().position;
            input.set(PlayerInput::FIRE, true);
        }

        self.frame += 1;
        input
    }
}

fn nearest_enemy(sim: &Simulation) -> Option<Vec3> {
    let from = sim.player().position;
    sim.enemies()
        .iter()
        .filter(|e| e.is_active())
        .map(|e| e.position)
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

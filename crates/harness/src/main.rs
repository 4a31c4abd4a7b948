//! Cubicrogue Harness
//!
//! Headless driver for the simulation: builds a map, runs an autopilot at a
//! fixed 60 Hz step and logs a summary. Stands in for the game's frontend.

mod arena;
mod bot;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cubicrogue_core::{GameStatus, GridMap, Simulation, SimulationConfig};

use crate::arena::{parse_layout, DEFAULT_ARENA};
use crate::bot::Autopilot;

const TICK_RATE: f32 = 60.0;

#[derive(Parser, Debug)]
#[clap(name = "cubicrogue-harness", about = "Run the simulation headless")]
pub struct Opt {
    /// Number of ticks to simulate.
    #[clap(short, long, default_value_t = 3600)]
    pub ticks: u32,
    /// RNG seed for enemy placement and fire jitter.
    #[clap(short, long, default_value_t = 1)]
    pub seed: u32,
    /// JSON tuning file. Missing fields keep their defaults.
    #[clap(short, long)]
    pub config: Option<PathBuf>,
    /// Text map (`#` wall, `.` floor). Defaults to the built-in arena.
    #[clap(short, long)]
    pub map: Option<PathBuf>,
    /// Print the effective config as JSON and exit.
    #[clap(long)]
    pub dump_config: bool,
    /// Log every N ticks (0 disables progress lines).
    #[clap(long, default_value_t = 600)]
    pub report_every: u32,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SimulationConfig::from_json_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))
}

fn load_map(path: Option<&PathBuf>, config: &SimulationConfig) -> anyhow::Result<GridMap> {
    let map = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading map {}", path.display()))?;
            GridMap::from_ascii(&parse_layout(&text), &config.map)
                .with_context(|| format!("building map {}", path.display()))?
        }
        None => GridMap::from_ascii(&DEFAULT_ARENA, &config.map)?,
    };
    Ok(map)
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("cubicrogue=info".parse()?))
        .init();

    let opt = Opt::parse();
    let config = load_config(opt.config.as_ref())?;

    if opt.dump_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let map = load_map(opt.map.as_ref(), &config)?;
    let mut sim = Simulation::new(config, map, opt.seed);
    let mut bot = Autopilot::new();
    let dt = 1.0 / TICK_RATE;

    tracing::info!("Running {} ticks (seed {})", opt.ticks, opt.seed);

    for _ in 0..opt.ticks {
        let input = bot.next_input(&sim);
        sim.tick(&input, dt);

        if opt.report_every > 0 && sim.frame() % opt.report_every == 0 {
            tracing::info!(
                frame = sim.frame(),
                health = sim.player().health,
                enemies = sim.state.active_enemies(),
                bullets = sim.state.bullets.active_count(),
                "progress"
            );
        }
        if sim.status() == GameStatus::GameOver {
            break;
        }
    }

    let snapshot = sim.snapshot()?;
    let initial = sim.config.enemy.initial_count;
    tracing::info!(
        frames = sim.frame(),
        status = ?sim.status(),
        player_health = sim.player().health,
        enemies_left = sim.state.active_enemies(),
        enemies_killed = initial.saturating_sub(sim.state.active_enemies()),
        shots_fired = sim.state.bullets.fire_count(),
        snapshot_bytes = snapshot.len(),
        "Run finished"
    );

    Ok(())
}

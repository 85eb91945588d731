/*
 * Headless Runner
 *
 * Runs the flocking engine without a window for a fixed number of ticks and
 * reports what the flock looked like at the end. Useful for profiling and
 * for checking a parameter file before opening the viewer.
 */

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use toroidal_boids::{
    FlockWeights, Simulation, SimulationParams, DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH,
};

#[derive(Debug, Parser)]
#[command(name = "boids-headless", about = "Run the boid simulation without a window")]
struct Args {
    /// Number of flock members (defaults to the config's num_boids)
    #[arg(short, long)]
    agents: Option<usize>,

    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    #[arg(long, default_value_t = DEFAULT_WORLD_WIDTH)]
    width: f32,

    #[arg(long, default_value_t = DEFAULT_WORLD_HEIGHT)]
    height: f32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    #[arg(long, default_value_t = 1.0)]
    alignment: f32,

    #[arg(long, default_value_t = 1.0)]
    cohesion: f32,

    #[arg(long, default_value_t = 1.0)]
    separation: f32,

    /// JSON file overriding simulation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable the parallel force phase
    #[arg(long)]
    sequential: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    agents: usize,
    ticks: u64,
    elapsed_ms: f64,
    mean_tick_us: f64,
    max_interactions: u32,
    mean_speed: f32,
    mean_interactions: f32,
    predated: usize,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => SimulationParams::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationParams::default(),
    };
    if args.sequential {
        params.enable_parallel = false;
    }
    let agents = args.agents.unwrap_or(params.num_boids);
    let weights = FlockWeights::new(args.alignment, args.cohesion, args.separation);

    let mut sim = Simulation::seeded(params, args.width, args.height, agents, args.seed)
        .context("building simulation")?;

    let started = Instant::now();
    for tick in 0..args.ticks {
        sim.tick(args.dt, weights);
        if (tick + 1) % 100 == 0 {
            info!(
                tick = tick + 1,
                max_interactions = sim.debug_info().max_interactions(),
                last_tick_us = sim.debug_info().last_tick.as_micros() as u64,
                "progress"
            );
        }
    }
    let elapsed = started.elapsed();

    let summary = summarize(&sim, args.ticks, elapsed.as_secs_f64());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} boids, {} ticks in {:.1} ms ({:.1} us/tick)",
            summary.agents, summary.ticks, summary.elapsed_ms, summary.mean_tick_us
        );
        println!(
            "mean speed {:.3}, mean interactions {:.2}, max interactions {}, predated {}",
            summary.mean_speed, summary.mean_interactions, summary.max_interactions, summary.predated
        );
    }
    Ok(())
}

fn summarize(sim: &Simulation, ticks: u64, elapsed_secs: f64) -> RunSummary {
    let flock = sim.flock();
    let n = flock.len().max(1) as f32;
    RunSummary {
        agents: flock.len(),
        ticks,
        elapsed_ms: elapsed_secs * 1000.0,
        mean_tick_us: if ticks > 0 { elapsed_secs * 1e6 / ticks as f64 } else { 0.0 },
        max_interactions: sim.debug_info().max_interactions(),
        mean_speed: flock.iter().map(|b| b.velocity.length()).sum::<f32>() / n,
        mean_interactions: flock.iter().map(|b| b.interactions() as f32).sum::<f32>() / n,
        predated: flock.iter().filter(|b| b.is_predated).count(),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

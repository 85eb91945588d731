/*
 * Physics Module
 *
 * This module owns the simulation state and advances it one tick at a time.
 * Every tick runs in two phases:
 *
 * 1. Parallel phase: each flock member's next state is computed from the
 *    committed state only and written into its own BoidUpdate slot. The
 *    predator's steering is computed alongside from the same snapshot, so it
 *    sees the flock's pre-commit positions, one tick behind the flock.
 * 2. Commit phase (serial): updates are copied into the boids, the predator
 *    moves, and the spatial grid is rebuilt from the new positions.
 *
 * Because no boid ever reads another boid's update, the result of a tick does
 * not depend on how the flock was split across worker threads.
 */

use std::time::Instant;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::boid::{clamp_speed, Boid, BoidUpdate, Pointer};
use crate::debug::DebugInfo;
use crate::error::SimError;
use crate::forces::{self, compute_flock_forces, pointer_pull, predator_avoidance};
use crate::params::{FlockWeights, SimulationParams};
use crate::random::{random_normal, random_unit_vector};
use crate::spatial_grid::SpatialGrid;
use crate::torus::Torus;

/// Frame rate the gains and speeds are tuned for. A tick of `dt = 1/60 s`
/// moves a boid by exactly its velocity.
pub const REFERENCE_FPS: f32 = 60.0;

pub struct Simulation {
    params: SimulationParams,
    torus: Torus,
    // Flock members first, the predator last
    boids: Vec<Boid>,
    updates: Vec<BoidUpdate>,
    predator_steer: Vec2,
    pending_step: Option<f32>,
    pointer: Pointer,
    grid: SpatialGrid,
    debug_info: DebugInfo,
    paused: bool,
}

impl Simulation {
    /// Scatter `agent_count` boids uniformly over the world with random
    /// headings and normally distributed speeds, and put the predator in the
    /// middle.
    pub fn new<R: Rng + ?Sized>(
        params: SimulationParams,
        width: f32,
        height: f32,
        agent_count: usize,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        params.validate()?;
        let torus = Torus::new(width, height)?;

        let mut flock = Vec::with_capacity(agent_count + 1);
        for _ in 0..agent_count {
            let position = Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
            let speed = random_normal(rng, params.initial_speed_mean, params.initial_speed_std_dev);
            flock.push(Boid::new(position, random_unit_vector(rng) * speed));
        }

        let predator = Boid::predator(
            torus.center(),
            Vec2::ONE.normalize() * params.predator_max_speed,
        );

        Self::assemble(params, torus, flock, predator)
    }

    // Same as `new` with a reproducible generator
    pub fn seeded(
        params: SimulationParams,
        width: f32,
        height: f32,
        agent_count: usize,
        seed: u64,
    ) -> Result<Self, SimError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::new(params, width, height, agent_count, &mut rng)
    }

    /// Build a simulation from explicit boids, e.g. for scripted scenarios.
    pub fn from_boids(
        params: SimulationParams,
        width: f32,
        height: f32,
        flock: Vec<Boid>,
        predator: Boid,
    ) -> Result<Self, SimError> {
        params.validate()?;
        let torus = Torus::new(width, height)?;
        Self::assemble(params, torus, flock, predator)
    }

    fn assemble(
        params: SimulationParams,
        torus: Torus,
        flock: Vec<Boid>,
        predator: Boid,
    ) -> Result<Self, SimError> {
        let grid = SpatialGrid::new(
            torus.width(),
            torus.height(),
            params.cell_size,
            params.hash_table_size,
            params.initial_cell_capacity,
        )?;

        let mut boids = flock;
        for boid in &mut boids {
            boid.position = torus.wrap(boid.position);
            boid.is_predator = false;
        }
        boids.push(Boid {
            position: torus.wrap(predator.position),
            is_predator: true,
            ..predator
        });

        let updates = boids[..boids.len() - 1].iter().map(BoidUpdate::seed).collect();

        let mut sim = Self {
            params,
            torus,
            boids,
            updates,
            predator_steer: Vec2::ZERO,
            pending_step: None,
            pointer: Pointer::default(),
            grid,
            debug_info: DebugInfo::default(),
            paused: false,
        };
        sim.rebuild_grid();

        info!(
            boids = sim.flock().len(),
            width = sim.torus.width(),
            height = sim.torus.height(),
            cells_x = sim.grid.cells_x(),
            cells_y = sim.grid.cells_y(),
            buckets = sim.grid.table_size(),
            "simulation initialized"
        );
        Ok(sim)
    }

    #[inline]
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    #[inline]
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    // Every committed boid, the predator included as the last entry
    #[inline]
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    #[inline]
    pub fn flock(&self) -> &[Boid] {
        &self.boids[..self.predator_index()]
    }

    #[inline]
    pub fn predator(&self) -> &Boid {
        &self.boids[self.predator_index()]
    }

    #[inline]
    pub fn predator_index(&self) -> usize {
        self.boids.len() - 1
    }

    #[inline]
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    // Shadow state from the most recent parallel phase
    #[inline]
    pub fn updates(&self) -> &[BoidUpdate] {
        &self.updates
    }

    #[inline]
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    #[inline]
    pub fn debug_info(&self) -> &DebugInfo {
        &self.debug_info
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // Takes effect at the next tick boundary
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "pause toggled");
        }
        self.paused = paused;
    }

    /// Engage the pointer at a world position, or park it with `None`.
    pub fn set_pointer(&mut self, position: Option<Vec2>) {
        match position {
            Some(p) => self.pointer.engage(self.torus.wrap(p)),
            None => self.pointer.release(),
        }
    }

    /// Run one full tick. Returns `false` without touching any state while
    /// paused.
    pub fn tick(&mut self, dt: f32, weights: FlockWeights) -> bool {
        if self.paused {
            return false;
        }
        let started = Instant::now();

        self.compute_updates(dt, weights);
        self.commit();

        self.debug_info.last_tick = started.elapsed();
        trace!(
            tick = self.debug_info.ticks,
            micros = self.debug_info.last_tick.as_micros() as u64,
            "tick complete"
        );
        true
    }

    /// Parallel phase: fill the shadow buffer from committed state.
    ///
    /// Nothing visible through `boids()` changes until the commit that
    /// `tick` runs afterwards.
    pub fn compute_updates(&mut self, dt: f32, weights: FlockWeights) -> &[BoidUpdate] {
        let step = if dt.is_finite() { dt.max(0.0) * REFERENCE_FPS } else { 0.0 };

        let Self {
            params,
            torus,
            boids,
            updates,
            predator_steer,
            pointer,
            grid,
            debug_info,
            ..
        } = self;

        let predator_index = boids.len() - 1;
        let ctx = TickContext {
            boids: boids.as_slice(),
            predator: &boids[predator_index],
            grid,
            torus,
            params,
            pointer,
            weights: weights.clamped(),
            step,
        };

        if ctx.params.enable_parallel && !updates.is_empty() {
            // Static partition, one contiguous chunk per worker
            let chunk_size = (updates.len() / rayon::current_num_threads()).max(1);
            debug_info.chunk_size = chunk_size;

            let ((), steer) = rayon::join(
                || {
                    updates
                        .par_chunks_mut(chunk_size)
                        .enumerate()
                        .for_each(|(chunk_index, chunk)| ctx.step_chunk(chunk_index * chunk_size, chunk));
                },
                || forces::predator_adjustment(predator_index, ctx.boids, ctx.grid, ctx.torus, ctx.params),
            );
            *predator_steer = steer;
        } else {
            debug_info.chunk_size = updates.len();
            ctx.step_chunk(0, updates);
            *predator_steer =
                forces::predator_adjustment(predator_index, ctx.boids, ctx.grid, ctx.torus, ctx.params);
        }

        self.pending_step = Some(step);
        &self.updates
    }

    // Serial phase: publish the updates and rebuild the grid
    fn commit(&mut self) {
        let Some(step) = self.pending_step.take() else {
            return;
        };

        for (boid, update) in self.boids.iter_mut().zip(&self.updates) {
            boid.apply(update);
            self.debug_info.observe_interactions(boid.interactions());
        }

        let predator_index = self.predator_index();
        let predator = &mut self.boids[predator_index];
        predator.velocity = clamp_speed(
            predator.velocity + self.predator_steer,
            self.params.min_speed,
            self.params.predator_max_speed,
        );
        predator.position = self.torus.wrap(predator.position + predator.velocity * step);

        self.rebuild_grid();
        self.debug_info.ticks += 1;
    }

    fn rebuild_grid(&mut self) {
        self.grid
            .rebuild(self.boids.iter().map(|boid| boid.position).enumerate());
    }
}

// Read-only view of the committed state shared by every worker in a tick
struct TickContext<'a> {
    boids: &'a [Boid],
    predator: &'a Boid,
    grid: &'a SpatialGrid,
    torus: &'a Torus,
    params: &'a SimulationParams,
    pointer: &'a Pointer,
    weights: FlockWeights,
    step: f32,
}

impl TickContext<'_> {
    fn step_chunk(&self, offset: usize, chunk: &mut [BoidUpdate]) {
        for (i, update) in chunk.iter_mut().enumerate() {
            *update = self.step_boid(offset + i);
        }
    }

    fn step_boid(&self, index: usize) -> BoidUpdate {
        let params = self.params;
        let boid = &self.boids[index];
        let mut update = BoidUpdate::seed(boid);

        let forces = compute_flock_forces(index, self.boids, self.grid, self.torus, params);
        update.neighbor_count = forces.neighbor_count;
        update.near_neighbor_count = forces.near_neighbor_count;

        let mut velocity = update.velocity;
        if forces.neighbor_count > 0 {
            velocity += (forces.alignment - boid.velocity) * (params.match_factor * self.weights.alignment);
            velocity += (forces.cohesion - boid.position) * (params.center_factor * self.weights.cohesion);
        }
        velocity += forces.separation * (params.avoid_factor * self.weights.separation);

        if let Some(push) = predator_avoidance(boid.position, self.predator, self.torus, params) {
            velocity += push;
            update.is_predated = true;
        }
        if let Some(pull) = pointer_pull(boid.position, self.pointer, self.torus, params) {
            velocity += pull;
            update.is_predated = true;
        }

        update.velocity = clamp_speed(velocity, params.min_speed, params.max_speed);
        update.position = self.torus.wrap(boid.position + update.velocity * self.step);
        update
    }
}

/*
 * Boid Module
 *
 * This module defines the per-agent records the engine owns:
 * - Boid: committed state, visible to every other agent and to rendering
 * - BoidUpdate: next-tick state written during the parallel phase
 * - Pointer: the cursor pseudo-agent, present only while engaged
 */

use glam::Vec2;

/// Number of colors in the density palette used by rendering.
pub const DENSITY_PALETTE_SIZE: usize = 11;

// Where the pointer waits while nobody is pressing it
pub const POINTER_PARKED: Vec2 = Vec2::new(-1.0, -1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub neighbor_count: u32,
    pub near_neighbor_count: u32,
    pub is_predator: bool,
    pub is_predated: bool,
}

impl Boid {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            neighbor_count: 0,
            near_neighbor_count: 0,
            is_predator: false,
            is_predated: false,
        }
    }

    pub fn predator(position: Vec2, velocity: Vec2) -> Self {
        Self {
            is_predator: true,
            ..Self::new(position, velocity)
        }
    }

    // Agents seen in either band during the last tick
    #[inline]
    pub fn interactions(&self) -> u32 {
        self.neighbor_count + self.near_neighbor_count
    }

    /// Palette slot for this boid's local density: `floor(log2(n))`, capped
    /// at the last palette entry.
    #[inline]
    pub fn density_bucket(&self) -> usize {
        density_bucket(self.interactions())
    }

    // Copy a finished update into the committed fields
    #[inline]
    pub fn apply(&mut self, update: &BoidUpdate) {
        self.position = update.position;
        self.velocity = update.velocity;
        self.neighbor_count = update.neighbor_count;
        self.near_neighbor_count = update.near_neighbor_count;
        self.is_predated = update.is_predated;
    }
}

pub fn density_bucket(count: u32) -> usize {
    if count == 0 {
        return 0;
    }
    (count.ilog2() as usize).min(DENSITY_PALETTE_SIZE - 1)
}

/// Shadow copy of a boid's next state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoidUpdate {
    pub position: Vec2,
    pub velocity: Vec2,
    pub neighbor_count: u32,
    pub near_neighbor_count: u32,
    pub is_predated: bool,
}

impl BoidUpdate {
    // Start from the committed state
    #[inline]
    pub fn seed(boid: &Boid) -> Self {
        Self {
            position: boid.position,
            velocity: boid.velocity,
            neighbor_count: 0,
            near_neighbor_count: 0,
            is_predated: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub engaged: bool,
}

impl Default for Pointer {
    fn default() -> Self {
        Self {
            position: POINTER_PARKED,
            engaged: false,
        }
    }
}

impl Pointer {
    pub fn engage(&mut self, position: Vec2) {
        self.position = position;
        self.engaged = true;
    }

    pub fn release(&mut self) {
        *self = Self::default();
    }
}

/// Scale `v` so its length lies in `[min, max]`. A zero vector stays zero.
#[inline]
pub fn clamp_speed(v: Vec2, min: f32, max: f32) -> Vec2 {
    let speed = v.length();
    if speed > max {
        v * (max / speed)
    } else if speed > 0.0 && speed < min {
        v * (min / speed)
    } else {
        v
    }
}

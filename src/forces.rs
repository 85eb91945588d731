/*
 * Forces Module
 *
 * Pure force computations for the flocking rules. Nothing here mutates state:
 * every function reads committed boids through the spatial grid and returns
 * the contribution, leaving weighting and integration to the engine.
 *
 * - Separation: unnormalized sum of displacement / d^2 inside the protected band
 * - Alignment: mean velocity of flock-band neighbors
 * - Cohesion: mean position of flock-band neighbors, unwrapped next to the boid
 * - Predator avoidance and pointer pull: 1/d scaled terms inside their radii
 * - Predator steering: forward-weighted pull toward the visible flock
 */

use glam::Vec2;

use crate::boid::{Boid, Pointer};
use crate::params::SimulationParams;
use crate::spatial_grid::SpatialGrid;
use crate::torus::Torus;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlockForces {
    pub alignment: Vec2,
    pub cohesion: Vec2,
    pub separation: Vec2,
    pub neighbor_count: u32,
    pub near_neighbor_count: u32,
}

// Compute separation, alignment and cohesion for one boid in a single pass
pub fn compute_flock_forces(
    index: usize,
    boids: &[Boid],
    grid: &SpatialGrid,
    torus: &Torus,
    params: &SimulationParams,
) -> FlockForces {
    let boid = &boids[index];
    let mut forces = FlockForces::default();

    grid.for_each_in_neighborhood(boid.position, |other_index| {
        if other_index == index {
            return;
        }
        let other = &boids[other_index];

        let offset = torus.displacement(boid.position, other.position);
        let d = offset.length();

        if d < params.protected_radius {
            if d > 0.0 {
                forces.separation += offset / (d * d);
            } else {
                forces.separation += offset;
            }
            forces.near_neighbor_count += 1;
        } else if d < params.neighbor_radius {
            forces.alignment += other.velocity;
            // Keep the neighbor on the same side of any seam as this boid
            forces.cohesion += boid.position - offset;
            forces.neighbor_count += 1;
        }
    });

    if forces.neighbor_count > 0 {
        let n = forces.neighbor_count as f32;
        forces.alignment /= n;
        forces.cohesion /= n;
    }

    forces
}

// Push away from the predator when it is close enough
#[inline]
pub fn predator_avoidance(
    position: Vec2,
    predator: &Boid,
    torus: &Torus,
    params: &SimulationParams,
) -> Option<Vec2> {
    let away = torus.displacement(position, predator.position);
    let d = away.length();
    if d >= params.predator_radius {
        return None;
    }
    if d > 0.0 {
        Some(away * (params.predator_avoid_factor / d))
    } else {
        Some(away)
    }
}

/// Pull toward an engaged pointer. A negative attraction factor repels.
#[inline]
pub fn pointer_pull(
    position: Vec2,
    pointer: &Pointer,
    torus: &Torus,
    params: &SimulationParams,
) -> Option<Vec2> {
    if !pointer.engaged {
        return None;
    }
    let away = torus.displacement(position, pointer.position);
    let d = away.length();
    if d >= params.pointer_radius {
        return None;
    }
    if d > 0.0 {
        Some(away * (-params.pointer_attraction_factor / d))
    } else {
        Some(away)
    }
}

/// Steering adjustment for the predator.
///
/// Every flock member within the visual radius pulls the predator toward it,
/// weighted by a smoothstep of how far ahead of the current heading it lies,
/// so boids already passed barely count. The weighted pulls are averaged over
/// all examined boids and scaled by `predator_chase_factor`.
pub fn predator_adjustment(
    predator_index: usize,
    boids: &[Boid],
    grid: &SpatialGrid,
    torus: &Torus,
    params: &SimulationParams,
) -> Vec2 {
    let predator = &boids[predator_index];
    let heading = predator.velocity.normalize_or_zero();
    let radius = params.predator_visual_radius;

    let mut pull = Vec2::ZERO;
    let mut examined = 0u32;

    grid.for_each_within_cells(predator.position, params.predator_cell_reach(), |other_index| {
        let other = &boids[other_index];
        if other_index == predator_index || other.is_predator {
            return;
        }
        let toward = torus.displacement(other.position, predator.position);
        if toward.length_squared() >= radius * radius {
            return;
        }

        let cosine = heading.dot(toward.normalize_or_zero());
        let t = ((cosine + 1.0) / 2.0).clamp(0.0, 1.0);
        let weight = t * t * (3.0 - 2.0 * t);

        pull += toward * weight;
        examined += 1;
    });

    if examined == 0 {
        return Vec2::ZERO;
    }
    pull / examined as f32 * params.predator_chase_factor
}

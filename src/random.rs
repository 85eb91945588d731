/*
 * Random Module
 *
 * Sampling helpers used only when seeding the flock.
 */

use std::f32::consts::TAU;

use glam::Vec2;
use rand::distributions::Open01;
use rand::Rng;

/// Normally distributed sample via the Box-Muller transform.
///
/// Both uniforms come from the open interval (0, 1) so `ln(u1)` is finite.
pub fn random_normal<R: Rng + ?Sized>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    let u1: f32 = rng.sample(Open01);
    let u2: f32 = rng.sample(Open01);
    let z0 = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    z0 * std_dev + mean
}

// Unit vector with a uniformly random heading
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::from_angle(angle)
}

/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable radii, gains and speed limits of the flocking model, and the
 * FlockWeights the input layer adjusts every frame. Parameters can be loaded
 * from a JSON file; any field left out keeps its default value.
 */

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

// Parameters for the simulation that can be adjusted via config or UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,

    // Interaction bands
    pub protected_radius: f32,
    pub neighbor_radius: f32,
    pub predator_radius: f32,
    pub predator_visual_radius: f32,
    pub pointer_radius: f32,

    // Spatial grid layout
    pub cell_size: f32,
    pub hash_table_size: usize,
    pub initial_cell_capacity: usize,

    // Gains applied on top of the user weights
    pub avoid_factor: f32,
    pub match_factor: f32,
    pub center_factor: f32,
    pub predator_avoid_factor: f32,
    pub pointer_attraction_factor: f32,
    pub predator_chase_factor: f32,

    // Speed limits, in world units per reference frame
    pub min_speed: f32,
    pub max_speed: f32,
    pub predator_max_speed: f32,
    pub initial_speed_mean: f32,
    pub initial_speed_std_dev: f32,

    // Performance settings
    pub enable_parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 10_000,
            protected_radius: 10.0,
            neighbor_radius: 40.0,
            predator_radius: 90.0,
            predator_visual_radius: 150.0,
            pointer_radius: 120.0,
            cell_size: 50.0,
            hash_table_size: 10_007,
            initial_cell_capacity: 64,
            avoid_factor: 0.05,
            match_factor: 0.05,
            center_factor: 0.0005,
            predator_avoid_factor: 10.0,
            pointer_attraction_factor: 5.0,
            predator_chase_factor: 0.02,
            min_speed: 1.0,
            max_speed: 3.0,
            predator_max_speed: 3.5,
            initial_speed_mean: 4.0,
            initial_speed_std_dev: 3.0,
            enable_parallel: true,
        }
    }
}

impl SimulationParams {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_str(&raw).map_err(|source| SimError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }

    // Check the constraints the grid and force model rely on
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.protected_radius) || !positive(self.neighbor_radius) {
            return Err(SimError::InvalidConfig("interaction radii must be positive"));
        }
        if self.protected_radius >= self.neighbor_radius {
            return Err(SimError::InvalidConfig(
                "protected_radius must be smaller than neighbor_radius",
            ));
        }
        if !positive(self.cell_size) {
            return Err(SimError::InvalidConfig("cell_size must be positive"));
        }
        // Neighbourhood queries only look one cell out
        if self.neighbor_radius > self.cell_size {
            return Err(SimError::InvalidConfig(
                "neighbor_radius must not exceed cell_size",
            ));
        }
        if !positive(self.predator_radius)
            || !positive(self.predator_visual_radius)
            || !positive(self.pointer_radius)
        {
            return Err(SimError::InvalidConfig(
                "predator and pointer radii must be positive",
            ));
        }
        if self.hash_table_size == 0 {
            return Err(SimError::InvalidConfig("hash_table_size must be non-zero"));
        }
        if !self.min_speed.is_finite() || self.min_speed < 0.0 {
            return Err(SimError::InvalidConfig("min_speed must be non-negative"));
        }
        if !positive(self.max_speed) || self.min_speed > self.max_speed {
            return Err(SimError::InvalidConfig(
                "max_speed must be positive and at least min_speed",
            ));
        }
        if self.predator_max_speed < self.max_speed {
            return Err(SimError::InvalidConfig(
                "predator_max_speed must be at least max_speed",
            ));
        }
        let gains = [
            self.avoid_factor,
            self.match_factor,
            self.center_factor,
            self.predator_avoid_factor,
            self.pointer_attraction_factor,
            self.predator_chase_factor,
            self.initial_speed_mean,
            self.initial_speed_std_dev,
        ];
        if gains.iter().any(|g| !g.is_finite()) {
            return Err(SimError::InvalidConfig("gains must be finite"));
        }
        Ok(())
    }

    // Number of grid cells the predator looks out to in each direction
    pub fn predator_cell_reach(&self) -> usize {
        (self.predator_visual_radius / self.cell_size).ceil().max(1.0) as usize
    }

    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=100_000
    }
}

/// Relative strength of the three flocking rules, set by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockWeights {
    pub alignment: f32,
    pub cohesion: f32,
    pub separation: f32,
}

impl Default for FlockWeights {
    fn default() -> Self {
        Self {
            alignment: 1.0,
            cohesion: 1.0,
            separation: 1.0,
        }
    }
}

impl FlockWeights {
    pub fn new(alignment: f32, cohesion: f32, separation: f32) -> Self {
        Self {
            alignment,
            cohesion,
            separation,
        }
        .clamped()
    }

    // Get parameter range for UI sliders
    pub fn range() -> std::ops::RangeInclusive<f32> {
        0.0..=10.0
    }

    pub fn clamped(self) -> Self {
        let clamp = |w: f32| {
            if w.is_nan() {
                0.0
            } else {
                w.clamp(*Self::range().start(), *Self::range().end())
            }
        };
        Self {
            alignment: clamp(self.alignment),
            cohesion: clamp(self.cohesion),
            separation: clamp(self.separation),
        }
    }
}

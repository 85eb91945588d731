/*
 * Toroidal Boid Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking engine.
 * The core (grid, forces, physics) has no windowing dependencies; the
 * interactive viewer modules are only built with the `viewer` feature.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidUpdate, Pointer, DENSITY_PALETTE_SIZE};
pub use debug::DebugInfo;
pub use error::SimError;
pub use forces::FlockForces;
pub use params::{FlockWeights, SimulationParams};
pub use physics::{Simulation, REFERENCE_FPS};
pub use spatial_grid::SpatialGrid;
pub use torus::Torus;

// Define modules
pub mod boid;
pub mod debug;
pub mod error;
pub mod forces;
pub mod params;
pub mod physics;
pub mod random;
pub mod spatial_grid;
pub mod torus;

#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod input;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod ui;

// Constants
pub const BOID_SIZE: f32 = 2.0;
pub const DEFAULT_WORLD_WIDTH: f32 = 1600.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 900.0;

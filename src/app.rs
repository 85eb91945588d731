/*
 * Application Module
 *
 * This module defines the viewer's model and per-frame update. The window is
 * the world: one world unit is one logical pixel, and the simulation torus is
 * exactly the window rectangle.
 */

use std::time::Duration;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::info;

use crate::input;
use crate::renderer;
use crate::ui::{self, Controls};
use crate::{Simulation, SimulationParams, DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};

// Longest frame fed to the engine, so a stalled window doesn't teleport the flock
const MAX_FRAME_DT: f32 = 0.1;

// Main model for the application
pub struct Model {
    pub sim: Simulation,
    pub controls: Controls,
    pub egui: Egui,
    pub mouse_position: Point2,
    pub pointer_held: bool,
    pub frame_time: Duration,
    pub seed: u64,
}

impl Model {
    // World coordinates grow right and down from the top-left corner
    pub fn world_to_screen(&self, p: ::glam::Vec2) -> Point2 {
        let torus = self.sim.torus();
        pt2(p.x - torus.width() / 2.0, torus.height() / 2.0 - p.y)
    }

    pub fn screen_to_world(&self, p: Point2) -> ::glam::Vec2 {
        let torus = self.sim.torus();
        ::glam::Vec2::new(p.x + torus.width() / 2.0, torus.height() / 2.0 - p.y)
    }

    // Screen-space direction of a world-space vector
    pub fn world_dir_to_screen(&self, v: ::glam::Vec2) -> Vec2 {
        vec2(v.x, -v.y)
    }

    fn reset(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        let params = self.sim.params().clone();
        let torus = *self.sim.torus();
        match Simulation::seeded(params, torus.width(), torus.height(), self.controls.num_boids, self.seed) {
            Ok(sim) => self.sim = sim,
            Err(err) => tracing::warn!(%err, "reset failed, keeping current flock"),
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Boids with Predator Simulation")
        .size(DEFAULT_WORLD_WIDTH as u32, DEFAULT_WORLD_HEIGHT as u32)
        .resizable(false)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to build window");

    let window = app.window(window_id).expect("window vanished after creation");
    let egui = Egui::from_window(&window);

    let params = SimulationParams::default();
    let controls = Controls::new(params.num_boids);
    let seed = 0;
    let sim = Simulation::seeded(
        params,
        DEFAULT_WORLD_WIDTH,
        DEFAULT_WORLD_HEIGHT,
        controls.num_boids,
        seed,
    )
    .expect("default parameters are valid");

    info!(boids = controls.num_boids, "viewer started");

    Model {
        sim,
        controls,
        egui,
        mouse_position: Point2::ZERO,
        pointer_held: false,
        frame_time: Duration::ZERO,
        seed,
    }
}

// Update the model
pub fn update(_app: &App, model: &mut Model, update: Update) {
    model.frame_time = update.since_last;

    let reset_requested = ui::update_ui(
        &mut model.egui,
        &mut model.controls,
        model.sim.debug_info(),
        model.frame_time,
    );
    if reset_requested {
        model.reset();
    }

    let pointer = if model.pointer_held {
        Some(model.screen_to_world(model.mouse_position))
    } else {
        None
    };
    model.sim.set_pointer(pointer);
    model.sim.set_paused(model.controls.paused);

    let dt = update.since_last.as_secs_f32().min(MAX_FRAME_DT);
    model.sim.tick(dt, model.controls.weights);
}

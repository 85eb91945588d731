/*
 * UI Module
 *
 * This module contains the egui control panel: the three flocking weights,
 * pause, display toggles, a reset button and the engine's diagnostics.
 */

use std::time::Duration;

use nannou_egui::{egui, Egui};

use crate::params::{FlockWeights, SimulationParams};
use crate::DebugInfo;

// Everything the panel lets the user change
pub struct Controls {
    pub weights: FlockWeights,
    pub paused: bool,
    pub draw_density: bool,
    pub draw_full_glyph: bool,
    pub show_debug: bool,
    pub num_boids: usize,
}

impl Controls {
    pub fn new(num_boids: usize) -> Self {
        Self {
            weights: FlockWeights::default(),
            paused: false,
            draw_density: true,
            draw_full_glyph: false,
            show_debug: true,
            num_boids,
        }
    }
}

// Draw the panel and return whether the flock should be re-seeded
pub fn update_ui(
    egui: &mut Egui,
    controls: &mut Controls,
    debug_info: &DebugInfo,
    frame_time: Duration,
) -> bool {
    let mut reset = false;
    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut controls.weights.alignment, FlockWeights::range()).text("Alignment"));
                ui.add(egui::Slider::new(&mut controls.weights.cohesion, FlockWeights::range()).text("Cohesion"));
                ui.add(egui::Slider::new(&mut controls.weights.separation, FlockWeights::range()).text("Separation"));
            });

            ui.collapsing("Flock", |ui| {
                ui.add(
                    egui::Slider::new(&mut controls.num_boids, SimulationParams::get_num_boids_range())
                        .text("Number of Boids"),
                );
                if ui.button("Reset Boids").clicked() {
                    reset = true;
                }
            });

            ui.checkbox(&mut controls.paused, "Pause Simulation");
            ui.checkbox(&mut controls.draw_density, "Color by Density");
            ui.checkbox(&mut controls.draw_full_glyph, "Draw Full Glyphs");
            ui.checkbox(&mut controls.show_debug, "Show Debug Info");

            if controls.show_debug {
                ui.separator();
                ui.label(format!("Frame time: {:.2} ms", frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Tick time: {:.2} ms", debug_info.last_tick.as_secs_f64() * 1000.0));
                ui.label(format!("Ticks: {}", debug_info.ticks));
                ui.label(format!("Max interactions: {}", debug_info.max_interactions()));
                ui.label(format!("Chunk size: {}", debug_info.chunk_size));
            }
        });

    reset
}

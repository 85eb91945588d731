/*
 * Renderer Module
 *
 * This module draws the committed simulation state. It only reads from the
 * engine: boids as small squares colored by local density, an optional
 * heading tail and protected-radius ring, the predator with its avoidance and
 * visual radii, and the pointer while it is held.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::boid::{Boid, DENSITY_PALETTE_SIZE};
use crate::BOID_SIZE;

// Deep blue (sparse) through to deep red (crowded)
const DENSITY_PALETTE: [(u8, u8, u8); DENSITY_PALETTE_SIZE] = [
    (0, 40, 82),
    (0, 60, 122),
    (0, 81, 163),
    (40, 122, 204),
    (81, 163, 204),
    (102, 184, 184),
    (122, 204, 163),
    (204, 204, 81),
    (204, 163, 40),
    (204, 81, 40),
    (163, 0, 0),
];

const TAIL_LENGTH: f32 = 20.0;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(rgb(245u8, 245, 245));

    for boid in model.sim.flock() {
        draw_boid(&draw, model, boid);
    }
    draw_predator(&draw, model);

    let pointer = model.sim.pointer();
    if pointer.engaged {
        let p = model.world_to_screen(pointer.position);
        draw.ellipse()
            .xy(p)
            .radius(model.sim.params().pointer_radius)
            .no_fill()
            .stroke(BLUE)
            .stroke_weight(1.0);
        draw.ellipse().xy(p).radius(BOID_SIZE).color(RED);
    }

    if model.controls.show_debug {
        let rect = app.window_rect();
        draw.text("Boids with Predator Simulation")
            .x_y(rect.left() + 140.0, rect.top() - 20.0)
            .color(DARKGRAY)
            .font_size(16);
        draw.text(&format!("Boids: {}", model.sim.flock().len()))
            .x_y(rect.left() + 140.0, rect.top() - 40.0)
            .color(BLUE)
            .font_size(14);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to draw controls");
    }
}

fn draw_boid(draw: &Draw, model: &Model, boid: &Boid) {
    let color = if model.controls.draw_density {
        let (r, g, b) = DENSITY_PALETTE[boid.density_bucket()];
        rgb(r, g, b)
    } else {
        rgb(80u8, 80, 80)
    };
    let p = model.world_to_screen(boid.position);
    draw.rect().xy(p).w_h(BOID_SIZE, BOID_SIZE).color(color);

    if model.controls.draw_full_glyph {
        let accent = if boid.is_predated { rgb(0u8, 228, 48) } else { color };
        let dir = model.world_dir_to_screen(boid.velocity.normalize_or_zero());
        draw.ellipse()
            .xy(p)
            .radius(model.sim.params().protected_radius / 2.0)
            .no_fill()
            .stroke(accent)
            .stroke_weight(1.0);
        draw.line()
            .start(p)
            .end(p - dir * TAIL_LENGTH)
            .color(accent)
            .stroke_weight(1.0);
    }
}

fn draw_predator(draw: &Draw, model: &Model) {
    let predator = model.sim.predator();
    let params = model.sim.params();
    let p = model.world_to_screen(predator.position);
    let dir = model.world_dir_to_screen(predator.velocity.normalize_or_zero());

    draw.ellipse()
        .xy(p)
        .radius(params.predator_visual_radius)
        .no_fill()
        .stroke(BLUE)
        .stroke_weight(1.0);
    draw.ellipse()
        .xy(p)
        .radius(params.predator_radius)
        .no_fill()
        .stroke(RED)
        .stroke_weight(1.0);
    draw.ellipse().xy(p).radius(2.0).color(DARKGRAY);
    draw.line()
        .start(p)
        .end(p - dir * TAIL_LENGTH)
        .color(BLUE)
        .stroke_weight(2.0);
}

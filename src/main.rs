/*
 * Boid Flocking Viewer
 *
 * Interactive window around the flocking engine. Boids follow alignment,
 * cohesion and separation rules on a wrap-around world, flee a predator that
 * hunts the flock ahead of it, and are drawn toward the cursor while the left
 * mouse button is held. Sliders adjust the rule weights in real time.
 */

use toroidal_boids::app;

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    nannou::app(app::model).update(app::update).run();
}

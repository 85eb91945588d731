use glam::Vec2;

use toroidal_boids::boid::clamp_speed;
use toroidal_boids::forces::compute_flock_forces;
use toroidal_boids::{Boid, FlockWeights, Simulation, SimulationParams};

const DT: f32 = 1.0 / 60.0;

fn params() -> SimulationParams {
    SimulationParams {
        hash_table_size: 1009,
        initial_cell_capacity: 8,
        ..SimulationParams::default()
    }
}

// Predator parked far from everything the scenario cares about
fn distant_predator() -> Boid {
    Boid::predator(Vec2::new(100.0, 900.0), Vec2::new(1.0, 0.0))
}

fn scenario(flock: Vec<Boid>) -> Simulation {
    Simulation::from_boids(params(), 1000.0, 1000.0, flock, distant_predator()).unwrap()
}

#[test]
fn close_pair_pushes_apart() {
    let mut sim = scenario(vec![
        Boid::new(Vec2::new(500.0, 500.0), Vec2::ZERO),
        Boid::new(Vec2::new(502.0, 500.0), Vec2::ZERO),
    ]);

    for index in 0..2 {
        let forces = compute_flock_forces(index, sim.boids(), sim.grid(), sim.torus(), sim.params());
        assert_eq!(forces.near_neighbor_count, 1);
        assert_eq!(forces.neighbor_count, 0);
        assert!(forces.separation.length() > 0.0);
    }
    let left = compute_flock_forces(0, sim.boids(), sim.grid(), sim.torus(), sim.params());
    let right = compute_flock_forces(1, sim.boids(), sim.grid(), sim.torus(), sim.params());
    assert!(left.separation.x < 0.0);
    assert!(right.separation.x > 0.0);

    assert!(sim.tick(DT, FlockWeights::default()));
    let flock = sim.flock();
    assert_eq!(flock[0].near_neighbor_count, 1);
    assert_eq!(flock[1].near_neighbor_count, 1);
    assert!(flock[0].velocity.x < 0.0);
    assert!(flock[1].velocity.x > 0.0);
    assert!(flock[1].position.x - flock[0].position.x > 2.0);
}

#[test]
fn lone_boid_only_gets_clamped() {
    let velocity = Vec2::new(5.0, 0.5);
    let mut sim = scenario(vec![Boid::new(Vec2::new(500.0, 500.0), velocity)]);
    let min = sim.params().min_speed;
    let max = sim.params().max_speed;

    let update = sim.compute_updates(DT, FlockWeights::default())[0];
    assert_eq!(update.velocity, clamp_speed(velocity, min, max));
    assert_eq!(update.neighbor_count, 0);
    assert_eq!(update.near_neighbor_count, 0);
    assert!(!update.is_predated);
    assert!((update.position - (Vec2::new(500.0, 500.0) + update.velocity)).length() < 1e-3);
}

#[test]
fn separation_is_measured_across_the_seam() {
    let sim = scenario(vec![
        Boid::new(Vec2::new(0.5, 500.0), Vec2::ZERO),
        Boid::new(Vec2::new(999.5, 500.0), Vec2::ZERO),
    ]);
    let forces = compute_flock_forces(0, sim.boids(), sim.grid(), sim.torus(), sim.params());
    assert_eq!(forces.near_neighbor_count, 1);
    // One unit apart: displacement (1, 0) over a squared distance of 1
    assert!((forces.separation - Vec2::new(1.0, 0.0)).length() < 1e-3);
}

#[test]
fn protected_band_alone_adds_only_separation() {
    let v0 = Vec2::new(1.5, 0.0);
    let mut sim = scenario(vec![
        Boid::new(Vec2::new(500.0, 500.0), v0),
        Boid::new(Vec2::new(500.0, 504.0), Vec2::new(0.0, 2.0)),
    ]);
    let p = sim.params().clone();
    let weights = FlockWeights::new(7.0, 7.0, 2.0);

    let update = sim.compute_updates(DT, weights)[0];
    // displacement (0, -4) / 16, no alignment or cohesion
    let separation = Vec2::new(0.0, -0.25);
    let expected = clamp_speed(v0 + separation * (p.avoid_factor * 2.0), p.min_speed, p.max_speed);
    assert!((update.velocity - expected).length() < 1e-6);
    assert_eq!(update.neighbor_count, 0);
}

#[test]
fn zero_weights_leave_velocity_alone() {
    let v0 = Vec2::new(0.0, 2.0);
    let mut sim = scenario(vec![
        Boid::new(Vec2::new(300.0, 300.0), v0),
        Boid::new(Vec2::new(303.0, 300.0), Vec2::new(2.0, 0.0)),
        Boid::new(Vec2::new(320.0, 300.0), Vec2::new(-2.0, 0.0)),
    ]);
    let update = sim.compute_updates(DT, FlockWeights::new(0.0, 0.0, 0.0))[0];
    assert_eq!(update.velocity, v0);
    assert_eq!(update.near_neighbor_count, 1);
    assert_eq!(update.neighbor_count, 1);
}

#[test]
fn random_flock_respects_speed_limits_and_domain() {
    let mut sim = Simulation::seeded(params(), 900.0, 700.0, 3000, 21).unwrap();
    let (min, max) = (sim.params().min_speed, sim.params().max_speed);

    for _ in 0..20 {
        for update in sim.compute_updates(DT, FlockWeights::new(1.0, 2.0, 1.5)) {
            let speed = update.velocity.length();
            assert!(speed <= max + 1e-4, "speed {speed}");
            assert!(speed >= min - 1e-4, "speed {speed}");
        }
        sim.tick(DT, FlockWeights::new(1.0, 2.0, 1.5));
        for boid in sim.boids() {
            assert!(sim.torus().contains(boid.position), "{:?}", boid.position);
        }
    }
    assert_eq!(sim.debug_info().ticks, 20);
}

#[test]
fn pointer_draws_boids_in_only_while_engaged() {
    let start = Vec2::new(600.0, 500.0);
    let mut sim = scenario(vec![Boid::new(start, Vec2::new(0.0, 1.0))]);

    sim.set_pointer(Some(Vec2::new(650.0, 500.0)));
    sim.tick(DT, FlockWeights::default());
    let boid = sim.flock()[0];
    assert!(boid.is_predated);
    assert!(boid.velocity.x > 0.0);

    sim.set_pointer(None);
    assert!(!sim.pointer().engaged);
    sim.tick(DT, FlockWeights::default());
    assert!(!sim.flock()[0].is_predated);
}

#[test]
fn predator_chases_the_flock_ahead() {
    let flock: Vec<Boid> = (0..30)
        .map(|i| Boid::new(Vec2::new(600.0 + (i % 6) as f32 * 5.0, 540.0 + (i / 6) as f32 * 5.0), Vec2::ZERO))
        .collect();
    let predator = Boid::predator(Vec2::new(500.0, 500.0), Vec2::new(1.0, 0.0));
    let mut sim = Simulation::from_boids(params(), 1000.0, 1000.0, flock, predator).unwrap();

    sim.tick(DT, FlockWeights::default());
    // The flock sits ahead and below-right, so the predator turns toward +y
    assert!(sim.predator().velocity.y > 0.0);
    assert!(sim.predator().velocity.x > 0.0);
}

#[test]
fn density_bucket_tracks_committed_counts() {
    let flock: Vec<Boid> = (0..9)
        .map(|i| Boid::new(Vec2::new(200.0 + i as f32 * 3.0, 200.0), Vec2::new(1.0, 0.0)))
        .collect();
    let mut sim = scenario(flock);
    sim.tick(DT, FlockWeights::default());
    for boid in sim.flock() {
        assert!(boid.interactions() > 0);
        assert_eq!(boid.density_bucket(), boid.interactions().ilog2() as usize);
    }
}

#[test]
fn predator_is_counted_by_nearby_boids() {
    let flock = vec![Boid::new(Vec2::new(500.0, 500.0), Vec2::new(1.0, 0.0))];
    let predator = Boid::predator(Vec2::new(505.0, 500.0), Vec2::new(0.0, 1.0));
    let mut sim = Simulation::from_boids(params(), 1000.0, 1000.0, flock, predator).unwrap();

    sim.tick(DT, FlockWeights::default());
    let boid = sim.flock()[0];
    assert_eq!(boid.near_neighbor_count, 1);
    assert_eq!(boid.neighbor_count, 0);
    assert!(boid.is_predated);
    assert!(sim.debug_info().max_interactions() >= 1);
}

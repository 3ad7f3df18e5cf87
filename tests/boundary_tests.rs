use rand::{rngs::StdRng, Rng, SeedableRng};
use snow_globe::*;

fn assert_contained(world: &GlobeWorld, step: usize) {
    let boundary = world.boundary();
    for (index, p) in world.particles().iter().enumerate() {
        let distance = p.position.distance(boundary.center);
        assert!(
            distance <= boundary.radius - p.size + 1e-3,
            "step {step}: particle {index} at distance {distance} escaped (size {})",
            p.size
        );
        assert!(
            boundary.contains(p.position, p.size, 1e-3),
            "step {step}: particle {index} outside its containment radius"
        );
    }
}

#[test]
fn particles_stay_inside_after_thousands_of_random_steps() {
    let mut world =
        GlobeWorld::with_seed(GlobeConfig::default(), 31).expect("default config is valid");
    let mut rng = StdRng::seed_from_u64(31);

    for particle in world.particles_mut() {
        particle.is_resting = false;
        particle.velocity = Vec2::new(rng.gen_range(-12.0..12.0), rng.gen_range(-12.0..12.0));
    }
    world.set_swirl_energy(10.0);

    for step in 0..4000 {
        if step % 250 == 0 {
            world.apply_motion(MotionSample::new(
                rng.gen_range(-15.0..15.0),
                rng.gen_range(-15.0..15.0),
                0.0,
            ));
        }
        world.step();
        assert_contained(&world, step);
    }
}

#[test]
fn wall_strike_loses_kinetic_energy() {
    let config = GlobeConfig::default().with_particle_count(1);
    let mut world = GlobeWorld::with_seed(config, 4).expect("valid config");

    let center = world.boundary().center;
    let particle = &mut world.particles_mut()[0];
    let limit = GlobeConfig::default().globe.radius - particle.size - 1.0;
    particle.is_resting = false;
    particle.position = center + Vec2::new(limit - 2.0, -10.0);
    particle.velocity = Vec2::new(6.0, 0.0);

    let before = world.total_kinetic_energy();
    let stats = world.step();
    let after = world.total_kinetic_energy();

    assert_eq!(stats.tally.wall_reflections, 1);
    assert!(after < before, "kinetic energy grew from {before} to {after}");
    assert!(world.particle(0).expect("particle").velocity.x < 0.0);
}

#[test]
fn repeated_wall_strikes_never_gain_energy() {
    let config = GlobeConfig::default().with_particle_count(1);
    let mut world = GlobeWorld::with_seed(config, 9).expect("valid config");
    let center = world.boundary().center;
    {
        let particle = &mut world.particles_mut()[0];
        particle.is_resting = false;
        particle.position = center + Vec2::new(0.0, -60.0);
        particle.velocity = Vec2::new(9.0, -4.0);
    }

    let mut previous = world.total_kinetic_energy();
    for _ in 0..200 {
        let stats = world.step();
        let current = world.total_kinetic_energy();
        if stats.tally.wall_reflections > 0 && previous > 1e-3 {
            assert!(current < previous, "wall strike raised energy {previous} -> {current}");
        }
        previous = current;
    }
}

#[test]
fn particle_at_exact_center_is_handled() {
    let config = GlobeConfig::default().with_particle_count(1);
    let mut world = GlobeWorld::with_seed(config, 2).expect("valid config");
    let center = world.boundary().center;
    world.particles_mut()[0].position = center;
    world.particles_mut()[0].is_resting = false;
    world.set_swirl_energy(5.0);

    world.step();
    let p = world.particle(0).expect("particle");
    assert!(p.position.is_finite());
    assert!(p.velocity.is_finite());
}

#[test]
fn ground_height_never_goes_nan() {
    let world = GlobeWorld::with_seed(GlobeConfig::default(), 0).expect("valid config");
    let mut x = -500.0;
    while x < 800.0 {
        for size in [2.0, 3.3, 5.0] {
            let y = world.ground_height_at(x, size);
            assert!(y.is_finite(), "ground at x = {x} is {y}");
            assert!(y >= world.boundary().center.y);
        }
        x += 7.5;
    }
}

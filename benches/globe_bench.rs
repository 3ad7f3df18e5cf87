use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use snow_globe::*;
use std::hint::black_box;

fn prepare_world(particle_count: usize, parallel: bool) -> GlobeWorld {
    let config = GlobeConfig::default().with_particle_count(particle_count);
    let mut world = GlobeWorld::with_seed(config, 7).expect("bench config is valid");
    world.set_parallel_enabled(parallel);
    world.apply_motion(MotionSample::new(8.0, -6.0, 0.0));
    world
}

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    for &count in &[128usize, 512, 2048] {
        group.bench_with_input(
            BenchmarkId::new("sequential", count),
            &count,
            |b, &count| {
                let mut world = prepare_world(count, false);
                b.iter(|| black_box(world.step()));
            },
        );

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", count), &count, |b, &count| {
            let mut world = prepare_world(count, true);
            b.iter(|| black_box(world.step()));
        });
    }
    group.finish();
}

fn bench_motion_impulse(c: &mut Criterion) {
    let mut world = prepare_world(2048, false);
    c.bench_function("motion_impulse_2048", |b| {
        b.iter(|| black_box(world.apply_motion(black_box(MotionSample::new(3.0, -2.0, 0.5)))));
    });
}

fn bench_settled_globe(c: &mut Criterion) {
    let config = GlobeConfig::default().with_particle_count(2048);
    let mut world = GlobeWorld::with_seed(config, 7).expect("bench config is valid");
    world.step_n(3000);
    c.bench_function("settled_step_2048", |b| {
        b.iter(|| black_box(world.step()));
    });
}

criterion_group!(
    benches,
    bench_world_step,
    bench_motion_impulse,
    bench_settled_globe
);
criterion_main!(benches);

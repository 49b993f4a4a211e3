//! Benchmark: measure step() cost under various grid conditions.
//!
//! Grid size matches the default 800×480 window. Each active benchmark uses
//! `iter_batched` to re-seed the grid before every iteration so we measure
//! moving material, not a settled grid.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sandsim::{Grid, MaterialRegistry, Preset, Simulation, Stepper, Universe};

const WIDTH: usize = 800;
const HEIGHT: usize = 480;

/// Empty grid — baseline cost of scanning every cell with nothing to do.
fn bench_step_empty(c: &mut Criterion) {
    let registry = MaterialRegistry::presets();
    c.bench_function("step_empty_800x480", |b| {
        let mut grid = Grid::new(WIDTH, HEIGHT);
        let mut stepper = Stepper::new();
        b.iter(|| {
            stepper.step(&mut grid, &registry);
            black_box(&grid);
        });
    });
}

/// Sand falling — top 20% filled, all of it actively moving.
fn bench_step_sand_falling(c: &mut Criterion) {
    let registry = MaterialRegistry::presets();
    c.bench_function("step_sand_falling_800x480", |b| {
        b.iter_batched(
            || {
                let mut grid = Grid::new(WIDTH, HEIGHT);
                for y in 0..(HEIGHT / 5) as i32 {
                    for x in 0..WIDTH as i32 {
                        grid.set(x, y, Preset::Sand.id()).unwrap();
                    }
                }
                grid
            },
            |mut grid| {
                Stepper::new().step(&mut grid, &registry);
                black_box(&grid);
            },
            BatchSize::LargeInput,
        );
    });
}

/// Water body — more candidates per cell than sand (horizontal candidates).
fn bench_step_water_body(c: &mut Criterion) {
    let registry = MaterialRegistry::presets();
    c.bench_function("step_water_body_800x480", |b| {
        b.iter_batched(
            || {
                let mut grid = Grid::new(WIDTH, HEIGHT);
                for y in (HEIGHT / 2) as i32..HEIGHT as i32 {
                    for x in 0..WIDTH as i32 {
                        grid.set(x, y, Preset::Water.id()).unwrap();
                    }
                }
                grid
            },
            |mut grid| {
                Stepper::new().step(&mut grid, &registry);
                black_box(&grid);
            },
            BatchSize::LargeInput,
        );
    });
}

/// Upper half noise: sand sinking through water, rock blocking both.
fn bench_step_noise(c: &mut Criterion) {
    let registry = Arc::new(MaterialRegistry::presets());
    c.bench_function("step_noise_800x480", |b| {
        b.iter_batched(
            || {
                let mut sim = Simulation::new(Grid::new(WIDTH, HEIGHT), Arc::clone(&registry));
                sim.spawn_upper_half(&mut SmallRng::seed_from_u64(0x5eed), 0.5);
                sim
            },
            |mut sim| {
                black_box(sim.step());
            },
            BatchSize::LargeInput,
        );
    });
}

/// Fixed frame count in a tight loop, like the benchmark key.
fn bench_run_frames(c: &mut Criterion) {
    let registry = Arc::new(MaterialRegistry::presets());
    c.bench_function("run_100_frames_noise_800x480", |b| {
        b.iter_batched(
            || {
                let mut sim = Simulation::new(Grid::new(WIDTH, HEIGHT), Arc::clone(&registry));
                sim.spawn_upper_half(&mut SmallRng::seed_from_u64(7), 0.5);
                sim
            },
            |mut sim| {
                black_box(sim.run_frames(100));
            },
            BatchSize::LargeInput,
        );
    });
}

/// Full Universe::tick() including pixel sync — what the browser calls.
fn bench_universe_tick(c: &mut Criterion) {
    c.bench_function("universe_tick_noise_800x480", |b| {
        b.iter_batched(
            || {
                let mut universe = Universe::new(WIDTH, HEIGHT);
                universe.spawn_noise(42, 0.5);
                universe
            },
            |mut universe| {
                universe.tick();
                black_box(&universe);
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_step_empty,
    bench_step_sand_falling,
    bench_step_water_body,
    bench_step_noise,
    bench_run_frames,
    bench_universe_tick,
);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use mazes::{
    generators::{self, MazeOptions},
    units::{Height, Width},
};

fn bench_recursive_backtracker_maze_21(c: &mut Criterion) {
    let options = MazeOptions::new(310u32);
    c.bench_function("recursive_backtracker_maze_21", move |b| {
        b.iter(|| generators::generate(Width(21), Height(21), &options))
    });
}

fn bench_recursive_backtracker_maze_201(c: &mut Criterion) {
    let options = MazeOptions::new(310u32);
    c.bench_function("recursive_backtracker_maze_201", move |b| {
        b.iter(|| generators::generate(Width(201), Height(201), &options))
    });
}

fn bench_braided_maze_201(c: &mut Criterion) {
    let options = MazeOptions::new(310u32).with_braid_factor(0.5);
    c.bench_function("braided_maze_201", move |b| {
        b.iter(|| generators::generate(Width(201), Height(201), &options))
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_21,
    bench_recursive_backtracker_maze_201,
    bench_braided_maze_201
);
criterion_main!(benches);

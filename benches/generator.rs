//! Benchmarks for layout generation.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use crossword_layout::graph::WordGraph;
use crossword_layout::words::WORD_LIST;
use crossword_layout::{Direction, Grid, PlacedWord, PuzzleGenerator};

/// A larger list with plenty of shared letters.
const LONG_LIST: &[&str] = &[
    "CRATE", "TRACE", "REACT", "CASTER", "RECAST", "STARE", "TEARS", "RATES", "ASTER", "CARETS",
    "STREAM", "MASTER",
];

/// Benchmark building the word graph.
fn bench_build_graph(c: &mut Criterion) {
    c.bench_function("build_graph", |b| {
        b.iter(|| WordGraph::build(black_box(LONG_LIST)))
    });
}

/// Benchmark generating a layout for the demo list from fixed seeds.
fn bench_generate_demo(c: &mut Criterion) {
    let graph = WordGraph::build(WORD_LIST);
    let generator = PuzzleGenerator::new(&graph);
    let mut seed = 0u64;

    c.bench_function("generate_demo", |b| {
        b.iter_batched(
            || {
                seed += 1;
                seed
            },
            |seed| generator.generate_with_seed(seed),
            BatchSize::SmallInput,
        )
    });
}

/// Benchmark generating a layout for the longer list.
fn bench_generate_long(c: &mut Criterion) {
    let graph = WordGraph::build(LONG_LIST);
    let generator = PuzzleGenerator::new(&graph);

    let mut group = c.benchmark_group("long_list");
    group.sample_size(20);
    group.bench_function("generate", |b| {
        b.iter(|| generator.generate_with_seed(black_box(1)))
    });
    group.finish();
}

/// Benchmark validating a single crossing placement.
fn bench_check_placement(c: &mut Criterion) {
    let mut grid = Grid::new(25);
    let seat = PlacedWord::new("SEAT", (10, 12), Direction::Horizontal, 1);
    grid.place(&seat.word, seat.start(), seat.direction);

    c.bench_function("check_placement", |b| {
        b.iter(|| {
            grid.check_placement(
                black_box("EAST"),
                black_box((11, 12)),
                Direction::Vertical,
                Some(&seat),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_build_graph,
    bench_generate_demo,
    bench_generate_long,
    bench_check_placement
);
criterion_main!(benches);

//! Map classification benchmarks for shooter_core.
//!
//! Run with: `cargo bench -p shooter_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shooter_core::map::GameMap;
use shooter_core::point::Point;

/// Bordered square map with a spawn point on every fifth interior cell.
fn square_map(size: usize) -> GameMap {
    let rows: Vec<String> = (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    if x == 0 || y == 0 || x + 1 == size || y + 1 == size {
                        '█'
                    } else if (x + y) % 5 == 0 {
                        'S'
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect();
    GameMap::from_rows(rows).unwrap()
}

/// Full-grid classification, as done once per engine construction.
pub fn elements_benchmark(c: &mut Criterion) {
    let map = square_map(40);
    c.bench_function("elements_by_kind_40x40", |b| {
        b.iter(|| black_box(map.elements_by_kind()))
    });
}

/// Point wall lookups, as done on every move and projectile step.
pub fn wall_lookup_benchmark(c: &mut Criterion) {
    let map = square_map(40);
    let points: Vec<Point> = (-21..21)
        .flat_map(|y| (-21..21).map(move |x| Point::new(x, y)))
        .collect();
    c.bench_function("is_wall_full_sweep", |b| {
        b.iter(|| points.iter().filter(|p| map.is_wall(black_box(**p))).count())
    });
}

criterion_group!(benches, elements_benchmark, wall_lookup_benchmark);
criterion_main!(benches);

//! Render pipeline benchmark.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use grafica::prelude::*;

fn scatter_chart(n: usize) -> BuiltChart {
    let x: Vec<f32> = (0..n).map(|i| i as f32).collect();
    let y: Vec<f32> = (0..n).map(|i| (i as f32 * 0.1).sin() * 50.0).collect();

    let mut data = Dataset::new();
    data.add_numeric("x", &x);
    data.add_numeric("y", &y);

    Chart::new()
        .data(data)
        .mapping(Mapping::new().x("x").y("y"))
        .geom(Geom::point())
        .build()
        .expect("chart builds")
}

fn bench_scatter_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter_render");

    for n in [100, 1_000, 10_000] {
        let chart = scatter_chart(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &chart, |b, chart| {
            b.iter(|| chart.to_framebuffer().expect("renders"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scatter_render);
criterion_main!(benches);

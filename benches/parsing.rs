use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rlm_dashboard::aggregate::{ZoneRect, zone_split};
use rlm_dashboard::plot_source::parse_plot_source;

fn synthetic_source(pairs: usize) -> String {
    let mut body = String::new();
    for i in 0..pairs {
        let x = (i % 68) as f64 + 0.5;
        let y = (i % 100) as f64 + 0.25;
        body.push_str(&format!("({x},{y}),"));
    }
    format!("import matplotlib.pyplot as plt\n\ngoals = [{body}]\nassists = [{body}]\nplt.title(\"Saison 2025/26\")\n")
}

fn bench_parse_plot_source(c: &mut Criterion) {
    let src = synthetic_source(200);
    c.bench_function("parse_plot_source", |b| {
        b.iter(|| {
            let parsed = parse_plot_source(black_box(&src));
            black_box(parsed.goals.len());
        })
    });
}

fn bench_zone_split(c: &mut Criterion) {
    let points: Vec<(f64, f64)> = (0..500)
        .map(|i| ((i % 80) as f64 * 0.9, (i % 110) as f64))
        .collect();
    c.bench_function("zone_split", |b| {
        b.iter(|| black_box(zone_split(black_box(&points), ZoneRect::DEFAULT)))
    });
}

criterion_group!(benches, bench_parse_plot_source, bench_zone_split);
criterion_main!(benches);

//! Criterion benchmarks for performance-critical hot paths
//!
//! Covers: discrete Fréchet distance, RDP stroke simplification, circle
//! fitting, and full glyph recognition.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sigil_tracer::capture::stroke::{rdp_simplify, StrokeEvaluator};
use sigil_tracer::capture::types::{Point, PointerInputEvent};
use sigil_tracer::geometry::{discrete_frechet_distance, fit_circle};
use sigil_tracer::glyph::library;
use sigil_tracer::glyph::recognizer::{Difficulty, GlyphRecognizer};

fn circle_points(n: usize, radius: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            Point::new(250.0 + radius * angle.cos(), 250.0 + radius * angle.sin())
        })
        .collect()
}

fn noisy_line(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let wobble = if i % 3 == 0 { 1.5 } else { -1.5 };
            Point::new(i as f64 * 2.0, 100.0 + wobble)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Geometry kernel benchmarks
// ---------------------------------------------------------------------------

fn bench_frechet(c: &mut Criterion) {
    let mut group = c.benchmark_group("frechet_distance");
    for size in [32, 64, 128] {
        let a = circle_points(size, 200.0);
        let b = circle_points(size, 205.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| discrete_frechet_distance(black_box(&a), black_box(&b)));
        });
    }
    group.finish();
}

fn bench_rdp_simplify(c: &mut Criterion) {
    let points = noisy_line(2000);

    c.bench_function("rdp_simplify_2000", |b| {
        b.iter(|| rdp_simplify(black_box(&points), 2.0));
    });
}

fn bench_circle_fit(c: &mut Criterion) {
    let points = circle_points(500, 180.0);

    c.bench_function("fit_circle_500", |b| {
        b.iter(|| fit_circle(black_box(&points)));
    });
}

// ---------------------------------------------------------------------------
// Recognition benchmarks
// ---------------------------------------------------------------------------

fn bench_glyph_recognition(c: &mut Criterion) {
    let recognizer = GlyphRecognizer::new(library::all(), Difficulty::Standard);

    let template = library::lookup("ember-sun").expect("built-in");
    let mut evaluator = StrokeEvaluator::new();
    for (i, p) in template.path.iter().enumerate() {
        evaluator.push(PointerInputEvent::new(
            p.x * 400.0,
            p.y * 400.0,
            0.5,
            i as f64 * 12.0,
            0,
        ));
    }
    let stroke = evaluator.finalize();

    c.bench_function("glyph_recognize", |b| {
        b.iter(|| recognizer.recognize(black_box(std::slice::from_ref(&stroke))));
    });
}

criterion_group!(
    benches,
    bench_frechet,
    bench_rdp_simplify,
    bench_circle_fit,
    bench_glyph_recognition
);
criterion_main!(benches);

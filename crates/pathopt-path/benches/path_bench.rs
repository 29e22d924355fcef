use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pathopt_path::{intersects, parse_path, serialize, simplify_program, SimplifyContext};
use pathopt_settings::PathDataSettings;

/// A ring of rounded tiles, each a closed sub-path with curves and arcs
fn sample_path(tiles: usize) -> String {
    let mut d = String::new();
    for i in 0..tiles {
        let x = (i % 20) as f64 * 12.5;
        let y = (i / 20) as f64 * 12.5;
        d.push_str(&format!(
            "M{x} {y} L{} {y} C{} {y} {} {} {} {} L{} {} A2 2 0 0 1 {} {} L{x} {} Z ",
            x + 8.0,
            x + 9.1045695,
            x + 10.0,
            y + 0.8954305,
            x + 10.0,
            y + 2.0,
            x + 10.0,
            y + 8.0,
            x + 8.0,
            y + 10.0,
            y + 10.0,
        ));
    }
    d
}

fn parse_serialize(c: &mut Criterion) {
    let d = sample_path(200);
    let settings = PathDataSettings::default();
    let formatter = settings.formatter();

    c.bench_function("parse_path", |b| b.iter(|| parse_path(black_box(&d))));

    let program = parse_path(&d);
    c.bench_function("serialize", |b| {
        b.iter(|| serialize(black_box(program.as_slice()), &formatter))
    });
}

fn simplify(c: &mut Criterion) {
    let program = parse_path(&sample_path(200));
    let settings = PathDataSettings::default();
    let context = SimplifyContext::default();

    c.bench_function("simplify_program", |b| {
        b.iter(|| simplify_program(black_box(&program), &settings, &context))
    });
}

fn intersection(c: &mut Criterion) {
    let a = parse_path(&sample_path(100));
    let b = parse_path("M3 3 C20 40 60 -10 90 30 S120 60 110 5 Z");

    c.bench_function("intersects", |bench| {
        bench.iter(|| intersects(black_box(a.as_slice()), black_box(b.as_slice())))
    });
}

criterion_group!(benches, parse_serialize, simplify, intersection);
criterion_main!(benches);

#[macro_use]
extern crate criterion;
extern crate libpolycalc;

use criterion::{black_box, Criterion};
use libpolycalc::{parse_poly, ParserOptions, Poly};

fn bench_parse_wide(c: &mut Criterion) {
    let literal = (&(&Poly::var(0) + &Poly::var(1)) + &Poly::var(2))
        .pow(10)
        .to_string();
    let options = ParserOptions::default();
    c.bench_function("parse_wide_literal", |b| {
        b.iter(|| parse_poly(black_box(literal.as_bytes()), 1, &options))
    });
}

fn bench_parse_deep(c: &mut Criterion) {
    let literal = format!("{}1{}", "(".repeat(500), ",1)".repeat(500));
    let options = ParserOptions::default();
    c.bench_function("parse_deep_literal", |b| {
        b.iter(|| parse_poly(black_box(literal.as_bytes()), 1, &options))
    });
}

criterion_group!(literal_benches, bench_parse_wide, bench_parse_deep);
criterion_main!(literal_benches);

#[macro_use]
extern crate criterion;
extern crate libpolycalc;

use criterion::{black_box, Criterion};
use libpolycalc::Poly;

fn bench_compose(c: &mut Criterion) {
    let (x0, x1, x2) = (Poly::var(0), Poly::var(1), Poly::var(2));
    let p = &(&(&x0 * &x1) + &x2).pow(4) - &x0.pow(6);
    let substitutes = vec![&x1 + &Poly::one(), &x2 - &x0, x0.clone()];
    c.bench_function("compose_3_vars", |b| {
        b.iter(|| black_box(&p).compose(black_box(&substitutes)))
    });
}

fn bench_at(c: &mut Criterion) {
    let p = (&Poly::var(0) + &Poly::var(1)).pow(12);
    c.bench_function("at_2_vars", |b| b.iter(|| black_box(&p).at(black_box(3))));
}

criterion_group!(compose_benches, bench_compose, bench_at);
criterion_main!(compose_benches);

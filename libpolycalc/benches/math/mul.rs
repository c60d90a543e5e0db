#[macro_use]
extern crate criterion;
extern crate libpolycalc;

use criterion::{black_box, Criterion};
use libpolycalc::{Mono, Poly};

/// (x_0 + x_1 + ... + x_{n-1} + 1)
fn linear_sum(n: usize) -> Poly {
    (0..n).fold(Poly::one(), |acc, i| &acc + &Poly::var(i))
}

fn bench_mul(c: &mut Criterion) {
    let p = linear_sum(4).pow(3);
    let q = linear_sum(4).pow(2);
    c.bench_function("mul_dense_4_vars", |b| {
        b.iter(|| black_box(&p) * black_box(&q))
    });
}

fn bench_pow(c: &mut Criterion) {
    let p = linear_sum(3);
    c.bench_function("pow_3_vars_to_8", |b| b.iter(|| black_box(&p).pow(8)));
}

fn bench_from_monos(c: &mut Criterion) {
    let monos: Vec<Mono> = (0..512i32)
        .map(|i| Mono::new(Poly::coeff(i64::from(i % 7 - 3)), (i * 37) % 128))
        .collect();
    c.bench_function("from_monos_512_unsorted", |b| {
        b.iter(|| Poly::from_monos(black_box(monos.clone())))
    });
}

criterion_group!(mul_benches, bench_mul, bench_pow, bench_from_monos);
criterion_main!(mul_benches);

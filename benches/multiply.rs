use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use ntru_lattice::{
    DenseTernaryPolynomial, IntegerPolynomial, ProductFormPolynomial, SparseTernaryPolynomial,
};

fn multiply_benchmark(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let mut group = c.benchmark_group("multiply");

    for n in [439usize, 743] {
        let df = n / 3;
        let poly2 = IntegerPolynomial::from_coeffs(
            (0..n).map(|_| rng.gen_range(0..2048)).collect(),
        );

        let dense = DenseTernaryPolynomial::generate_random(n, df, df - 1, &mut rng);
        group.bench_with_input(BenchmarkId::new("dense_karatsuba", n), &n, |b, _| {
            b.iter(|| dense.to_integer_polynomial().multiply_mod(&poly2, 2048));
        });

        group.bench_with_input(BenchmarkId::new("dense_packed_2048", n), &n, |b, _| {
            b.iter(|| dense.multiply_mod(&poly2, 2048));
        });

        let sparse = SparseTernaryPolynomial::generate_random(n, df, df - 1, &mut rng);
        group.bench_with_input(BenchmarkId::new("sparse", n), &n, |b, _| {
            b.iter(|| sparse.multiply_mod(&poly2, 2048));
        });

        let product = ProductFormPolynomial::generate_random(n, 9, 8, 5, 5, &mut rng);
        group.bench_with_input(BenchmarkId::new("product_form", n), &n, |b, _| {
            b.iter(|| product.multiply_mod(&poly2, 2048));
        });
    }

    group.finish();
}

criterion_group!(benches, multiply_benchmark);
criterion_main!(benches);

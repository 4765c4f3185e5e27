use criterion::{criterion_group, criterion_main, Criterion};

use mersenne_sparse_kem::System;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

// k values picked small enough that `n` stays in the low-thousands-of-bits range (see
// `MERSENNE_EXPONENTS`); the true FIPS-scale `n` in the hundred-million-bit range is exercised
// only by the `#[ignore]`d tests, not benchmarked here.
pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0);

    for &k in &[16usize, 64, 256] {
        let mut system = System::new(k, &mut rng).unwrap();
        system.gen_keys(&mut rng);
        let (ct, _) = system.encapsulate(&mut rng).unwrap();

        c.bench_function(&format!("k={k} gen_keys"), |b| {
            b.iter(|| {
                let mut s = System::new(k, &mut rng).unwrap();
                s.gen_keys(&mut rng);
            });
        });
        c.bench_function(&format!("k={k} encapsulate"), |b| {
            b.iter(|| system.encapsulate(&mut rng).unwrap());
        });
        c.bench_function(&format!("k={k} decapsulate"), |b| {
            b.iter(|| system.decapsulate(&ct).unwrap());
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

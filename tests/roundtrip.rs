use mersenne_sparse_kem::{BitVector, Error, System};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

#[test]
fn full_public_api_round_trip() {
    let mut rng = ChaCha20Rng::seed_from_u64(1234);
    let mut system = System::new(32, &mut rng).expect("k=32 has a qualifying n");
    let (pk, _sk) = system.gen_keys(&mut rng);
    assert_eq!(pk.r().len(), system.n());
    assert_eq!(pk.t().len(), system.n());

    let message = BitVector::random_dense(32, &mut rng);
    let ciphertext = system.encrypt(&message, &mut rng).unwrap();
    assert_eq!(system.decrypt(&ciphertext).unwrap(), message);

    let (ct, shared_a) = system.encapsulate(&mut rng).unwrap();
    let shared_b = system.decapsulate(&ct).unwrap();
    assert_eq!(shared_a, shared_b);
}

#[test]
fn oversized_k_is_rejected() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let err = System::new(100_000, &mut rng).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidParameter("no Mersenne exponent satisfies n > 10 * k^2")
    );
}

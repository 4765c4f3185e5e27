//! The deterministic hash oracle `H`.
//!
//! `H` expands a short seed into one dense bitstring (`H0`) and three fixed-weight sparse
//! bitvectors (`H1`, `H2`, `H3`). The KEM layer relies on `H` being a pure, machine-independent
//! function of its inputs: the encapsulator and decapsulator must derive bit-identical noise
//! from the same recovered seed, or correctness (and the implicit-rejection check) breaks.
//!
//! # Concrete construction
//!
//! Each of the seed's four disjoint slices is rendered to its canonical `"0"`/`"1"` bit string
//! and hashed with `Sha3_256` to a 32-byte digest. That digest keys a [`ChaCha20Rng`] — a
//! documented, pure counter-mode stream cipher — which then drives [`BitVector::random_dense`]
//! (for `H0`) or [`BitVector::random_sparse`] (for `H1..H3`). This fixes the open construction
//! question left by the source: any two implementations following this same recipe reproduce
//! identical output streams from identical seed bits.

use sha3::{Digest, Sha3_256};

use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use crate::bitvector::BitVector;
use crate::error::Error;

/// The four outputs of the oracle: a dense `H0` of length `seed.len()`, and three sparse
/// vectors `H1`, `H2`, `H3` of length `n` and Hamming weight `h`.
pub struct OracleOutput {
    /// Dense pseudorandom bitstring, same length as the seed.
    pub h0: BitVector,
    /// First sparse noise vector, length `n`, weight `h`.
    pub h1: BitVector,
    /// Second sparse noise vector, length `n`, weight `h`.
    pub h2: BitVector,
    /// Third sparse noise vector, length `n`, weight `h`.
    pub h3: BitVector,
}

/// Hashes a bitvector slice's canonical textual bit representation to a 32-byte key and seeds a
/// fresh [`ChaCha20Rng`] from it.
fn keyed_rng(slice: &BitVector) -> ChaCha20Rng {
    let mut hasher = Sha3_256::new();
    hasher.update(slice.to_bit_string());
    let digest: [u8; 32] = hasher.finalize().into();
    ChaCha20Rng::from_seed(digest)
}

/// Deterministically expands `seed` into `(H0, H1, H2, H3)`.
///
/// `seed` is split into four consecutive slices `s1..s4` (the general rule: `x = seed.len() / 4`,
/// `s1 = seed[0:x]`, `s2 = seed[x:2x]`, `s3 = seed[2x:3x]`, `s4 = seed[3x:]` — the last slice
/// absorbs any remainder when `seed.len()` is not divisible by 4). `H0` has `seed.len()` bits;
/// `H1`, `H2`, `H3` have `n` bits and Hamming weight exactly `h`.
///
/// # Errors
/// Returns [`Error::InvalidWeight`] if `h > n` (propagated from the underlying sparse sampler).
pub fn h(seed: &BitVector, n: usize, weight: usize) -> Result<OracleOutput, Error> {
    let k = seed.len();
    let x = k / 4;
    let s1 = seed.slice(0, x);
    let s2 = seed.slice(x, 2 * x);
    let s3 = seed.slice(2 * x, 3 * x);
    let s4 = seed.slice(3 * x, k);

    let mut rng1 = keyed_rng(&s1);
    let h0 = BitVector::random_dense(k, &mut rng1);

    let mut rng2 = keyed_rng(&s2);
    let h1 = BitVector::random_sparse(n, weight, &mut rng2)?;

    let mut rng3 = keyed_rng(&s3);
    let h2 = BitVector::random_sparse(n, weight, &mut rng3)?;

    let mut rng4 = keyed_rng(&s4);
    let h3 = BitVector::random_sparse(n, weight, &mut rng4)?;

    Ok(OracleOutput { h0, h1, h2, h3 })
}

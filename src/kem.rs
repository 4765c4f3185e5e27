//! Key encapsulation built on top of [`crate::system`].
//!
//! `encapsulate` derives a shared secret from a fresh random seed via the deterministic oracle
//! `H`, then encrypts the seed the same way [`System::encrypt`] encrypts any other message.
//! `decapsulate` decrypts, reruns `H` on the recovered seed, and re-derives the ciphertext; a
//! mismatch is reported as [`Error::DecapsulationFailure`] rather than silently returning a
//! wrong secret, which is what makes this layer (and not bare encrypt/decrypt) suitable for key
//! agreement.

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq as _;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bitvector::BitVector;
use crate::codec::{decode, encode};
use crate::error::Error;
use crate::oracle::h;
use crate::system::{Ciphertext, System};

/// The shared secret produced by [`System::encapsulate`] and recovered by
/// [`System::decapsulate`]. Length equals the system's security parameter `k`. Zeroized on drop;
/// compared in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecretKey(pub(crate) BitVector);

impl SharedSecretKey {
    /// The underlying bits of the shared secret.
    #[must_use]
    pub fn as_bitvector(&self) -> &BitVector { &self.0 }
}

impl PartialEq for SharedSecretKey {
    fn eq(&self, other: &Self) -> bool { bool::from(self.0.ct_eq(&other.0)) }
}

impl Eq for SharedSecretKey {}

impl System {
    /// Derives a shared secret and a ciphertext encapsulating it.
    ///
    /// 1. Samples a fresh random seed `K` of length `k` from the cryptographic entropy source.
    /// 2. Runs the oracle, `(S, A, B1, B2) := H(K, n, k)`.
    /// 3. Encrypts `K` (via `encode` and the public key) using `A`, `B1`, `B2` as the noise
    ///    terms, exactly as [`System::encrypt`] would with fresh random noise.
    /// 4. Returns the resulting ciphertext and `S` as the shared secret.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if keys have not yet been generated.
    pub fn encapsulate(
        &self, rng: &mut impl CryptoRngCore,
    ) -> Result<(Ciphertext, SharedSecretKey), Error> {
        let pk = self.public_key().ok_or(Error::InvalidParameter("keys not generated"))?;
        let seed = BitVector::random_dense(self.k(), rng);
        let expansion = h(&seed, self.n(), self.h())?;

        let p = encode(&seed, self.n());
        let c1 = expansion.h1.and(pk.r())?.or(&expansion.h2)?;
        let c2 = expansion.h1.and(pk.t())?.or(&expansion.h3)?.xor(&p)?;

        Ok((Ciphertext { c1, c2 }, SharedSecretKey(expansion.h0)))
    }

    /// Recovers the shared secret from a ciphertext, verifying it by re-encrypting the decoded
    /// seed and comparing against the supplied ciphertext in constant time.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if keys have not yet been generated, or
    /// [`Error::DecapsulationFailure`] if the re-encryption check does not match — which covers
    /// both a tampered ciphertext and an (unlikely) repetition-decode error.
    pub fn decapsulate(&self, ct: &Ciphertext) -> Result<SharedSecretKey, Error> {
        let sk = self.secret_key_ref().ok_or(Error::InvalidParameter("keys not generated"))?;
        let pk = self.public_key().ok_or(Error::InvalidParameter("keys not generated"))?;

        let d = sk.and(&ct.c1)?.xor(&ct.c2)?;
        let k_prime = decode(&d, self.k())?;

        let expansion = h(&k_prime, self.n(), self.h())?;
        let p_prime = encode(&k_prime, self.n());
        let c1_prime = expansion.h1.and(pk.r())?.or(&expansion.h2)?;
        let c2_prime = expansion.h1.and(pk.t())?.or(&expansion.h3)?.xor(&p_prime)?;

        let matches = c1_prime.ct_eq(&ct.c1) & c2_prime.ct_eq(&ct.c2);
        if bool::from(matches) {
            Ok(SharedSecretKey(expansion.h0))
        } else {
            Err(Error::DecapsulationFailure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn system_with_keys(k: usize, seed: u64) -> System {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut system = System::new(k, &mut rng).unwrap();
        system.gen_keys(&mut rng);
        system
    }

    #[test]
    fn decapsulate_recovers_shared_secret() {
        let mut rng = ChaCha20Rng::seed_from_u64(256);
        let system = system_with_keys(256, 256);
        let (ct, secret) = system.encapsulate(&mut rng).unwrap();
        let recovered = system.decapsulate(&ct).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn decapsulate_rejects_flipped_ciphertext_bit() {
        let mut rng = ChaCha20Rng::seed_from_u64(256);
        let system = system_with_keys(256, 256);
        let (mut ct, _secret) = system.encapsulate(&mut rng).unwrap();
        let mut flip = BitVector::new_zero(ct.c1.len());
        flip.set(0, true);
        ct.c1 = ct.c1.xor(&flip).unwrap();
        let result = system.decapsulate(&ct);
        assert_eq!(result.unwrap_err(), Error::DecapsulationFailure);
    }

    #[test]
    fn kem_statistical_correctness() {
        let mut rng = ChaCha20Rng::seed_from_u64(555);
        let system = system_with_keys(64, 555);
        let trials = 200;
        let mut successes = 0;
        for _ in 0..trials {
            let (ct, secret) = system.encapsulate(&mut rng).unwrap();
            if system.decapsulate(&ct) == Ok(secret) {
                successes += 1;
            }
        }
        assert!(successes as f64 / trials as f64 >= 0.99);
    }
}

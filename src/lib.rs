#![no_std]
#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
//! A sparse-noise public-key cryptosystem and key encapsulation mechanism over binary vectors of
//! Mersenne-exponent length.
//!
//! The scheme works entirely over [`BitVector`]s indexed by Mersenne-exponent lengths `n` chosen
//! so that `n > 10 * k^2` for a security parameter `k`. A [`System`] picks `n`, generates sparse
//! key material, and exposes encrypt/decrypt directly as well as `encapsulate`/`decapsulate`.
//! Noise is combined with AND/OR rather than modular arithmetic, and the message is protected
//! from that noise by a repetition code rather than an error-correcting lattice code.
//!
//! # Example
//! ```
//! use mersenne_sparse_kem::System;
//! use rand_core::OsRng;
//!
//! let mut rng = OsRng;
//! let mut system = System::new(16, &mut rng).unwrap();
//! system.gen_keys(&mut rng);
//!
//! let (ciphertext, secret_a) = system.encapsulate(&mut rng).unwrap();
//! let secret_b = system.decapsulate(&ciphertext).unwrap();
//! assert_eq!(secret_a, secret_b);
//! ```
//!
//! # Randomness
//! Two random sources play distinct roles and are never interchangeable. Key material and
//! per-message noise are drawn from a [`rand_core::CryptoRngCore`] (`OsRng` by default, behind
//! the `default-rng` feature). The internal oracle is instead a *deterministic* function seeded
//! from message bits, implemented with a keyed `ChaCha20Rng` rather than the caller's entropy
//! source; this is what lets a decapsulator reproduce the encapsulator's noise from a recovered
//! seed alone.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitvector;
mod codec;
mod error;
mod kem;
mod oracle;
mod system;

pub use bitvector::BitVector;
pub use error::Error;
pub use kem::SharedSecretKey;
pub use system::{Ciphertext, PublicKey, SecretKey, System, MERSENNE_EXPONENTS};

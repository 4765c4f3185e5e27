//! Fixed-length binary vectors over word-wide (`u64`) storage.
//!
//! A [`BitVector`] is the single data type the rest of the crate is built from: dense random
//! keys and ciphertext halves, sparse fixed-weight noise, and the repetition-coded message all
//! share this representation. Bitwise AND/OR/XOR are defined pointwise over vectors of identical
//! length; mismatched lengths are a programmer error and are reported via [`Error::LengthMismatch`].

use alloc::vec;
use alloc::vec::Vec;

use rand_core::RngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::error::{ensure, Error};

/// An ordered sequence of bits, indexed `0..len`, backed by `u64` words.
///
/// Bit `i` lives at `words[i / 64]`, bit position `i % 64` (least-significant bit first within
/// a word). Any padding bits in the final word beyond `len` are always zero; every constructor
/// and mutator preserves this invariant so that equality and `count_ones` never need to mask.
#[derive(Clone, Zeroize)]
pub struct BitVector {
    len: usize,
    words: Vec<u64>,
}

impl core::fmt::Debug for BitVector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "BitVector(len={}, ones={})", self.len, self.count_ones())
    }
}

impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool { self.len == other.len && self.words == other.words }
}

impl Eq for BitVector {}

#[inline]
fn word_count(len: usize) -> usize { (len + 63) / 64 }

impl BitVector {
    /// Number of bits in this vector.
    #[must_use]
    pub fn len(&self) -> usize { self.len }

    /// True when this vector has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// A fresh all-zero vector of the given length.
    #[must_use]
    pub fn new_zero(len: usize) -> Self { Self { len, words: vec![0u64; word_count(len)] } }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "bit index out of range");
        (self.words[i / 64] >> (i % 64)) & 1 == 1
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, value: bool) {
        debug_assert!(i < self.len, "bit index out of range");
        let mask = 1u64 << (i % 64);
        if value {
            self.words[i / 64] |= mask;
        } else {
            self.words[i / 64] &= !mask;
        }
    }

    /// Zero any bits beyond `len` in the final word, restoring the padding invariant after raw
    /// word-level fills (e.g. [`Self::random_dense`]).
    fn mask_tail(&mut self) {
        let used_bits = self.len % 64;
        if used_bits != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used_bits) - 1;
            }
        }
    }

    /// A vector of the given length with each bit drawn independently and uniformly from
    /// `{0, 1}`, using the supplied random source.
    ///
    /// Callers pass a cryptographic entropy source (`OsRng` via `CryptoRngCore`) for key and
    /// noise material, and the deterministic oracle stream (`ChaCha20Rng`) when reproducing
    /// [`crate::oracle::h`]'s `H0` output; this function itself is agnostic to which.
    #[must_use]
    pub fn random_dense<R: RngCore + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut words = vec![0u64; word_count(len)];
        for w in &mut words {
            *w = rng.next_u64();
        }
        let mut bv = Self { len, words };
        bv.mask_tail();
        bv
    }

    /// A vector of the given length with Hamming weight exactly `weight`, sampled uniformly
    /// among all such vectors by rejection sampling: draw an index in `[0, len)`, retry if
    /// already set, repeat until `weight` bits are set.
    ///
    /// # Errors
    /// Returns [`Error::InvalidWeight`] if `weight > len`.
    pub fn random_sparse<R: RngCore + ?Sized>(
        len: usize, weight: usize, rng: &mut R,
    ) -> Result<Self, Error> {
        ensure!(weight <= len, Error::InvalidWeight { weight, length: len });
        let mut bv = Self::new_zero(len);
        if len == 0 {
            return Ok(bv);
        }
        let mut remaining = weight;
        while remaining > 0 {
            let index = (rng.next_u64() % len as u64) as usize;
            if !bv.get(index) {
                bv.set(index, true);
                remaining -= 1;
            }
        }
        Ok(bv)
    }

    fn check_len(&self, other: &Self) -> Result<(), Error> {
        ensure!(
            self.len == other.len,
            Error::LengthMismatch { expected: self.len, actual: other.len }
        );
        Ok(())
    }

    /// Pointwise bitwise AND. Requires `self.len() == other.len()`.
    pub fn and(&self, other: &Self) -> Result<Self, Error> {
        self.check_len(other)?;
        let words = self.words.iter().zip(&other.words).map(|(a, b)| a & b).collect();
        Ok(Self { len: self.len, words })
    }

    /// Pointwise bitwise OR. Requires `self.len() == other.len()`.
    pub fn or(&self, other: &Self) -> Result<Self, Error> {
        self.check_len(other)?;
        let words = self.words.iter().zip(&other.words).map(|(a, b)| a | b).collect();
        Ok(Self { len: self.len, words })
    }

    /// Pointwise bitwise XOR. Requires `self.len() == other.len()`.
    pub fn xor(&self, other: &Self) -> Result<Self, Error> {
        self.check_len(other)?;
        let words = self.words.iter().zip(&other.words).map(|(a, b)| a ^ b).collect();
        Ok(Self { len: self.len, words })
    }

    /// Number of 1-bits in this vector.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// A new vector containing bits `[start, end)` of this one.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= self.len, "slice range out of bounds");
        let mut out = Self::new_zero(end - start);
        for (dst, src) in (start..end).enumerate() {
            out.set(dst, self.get(src));
        }
        out
    }

    /// A new vector with `other`'s bits appended after this one's.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut out = Self::new_zero(self.len + other.len);
        for i in 0..self.len {
            out.set(i, self.get(i));
        }
        for i in 0..other.len {
            out.set(self.len + i, other.get(i));
        }
        out
    }

    /// Appends `count` copies of `bit` to the end of this vector, growing it in place.
    pub fn extend_repeat(&mut self, bit: bool, count: usize) {
        let old_len = self.len;
        self.len += count;
        self.words.resize(word_count(self.len), 0);
        if bit {
            for i in old_len..self.len {
                self.set(i, true);
            }
        }
    }

    /// Decodes a bitvector of length `len` from big-endian bit-packed bytes: bit 0 is the
    /// high bit of byte 0. `bytes` must contain at least `ceil(len / 8)` bytes; any bits past
    /// `len` are ignored.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], len: usize) -> Self {
        debug_assert!(bytes.len() * 8 >= len, "not enough bytes for requested length");
        let mut bv = Self::new_zero(len);
        for i in 0..len {
            let byte = bytes[i / 8];
            let bit = (byte >> (7 - (i % 8))) & 1 == 1;
            bv.set(i, bit);
        }
        bv
    }

    /// Encodes this vector as big-endian bit-packed bytes, zero-padded to a byte boundary.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; (self.len + 7) / 8];
        for i in 0..self.len {
            if self.get(i) {
                out[i / 8] |= 1 << (7 - (i % 8));
            }
        }
        out
    }

    /// Renders this vector as its canonical `"0"`/`"1"` textual bit representation, used as the
    /// deterministic oracle's hash-key input (see [`crate::oracle`]).
    #[must_use]
    pub fn to_bit_string(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for i in 0..self.len {
            out.push(if self.get(i) { b'1' } else { b'0' });
        }
        out
    }

    /// Constant-time equality over the bit content, for use on values that cross a decapsulation
    /// comparison (see [`crate::kem`]). Lengths are assumed public and compared in variable time;
    /// only the bit content receives constant-time treatment.
    #[must_use]
    pub fn ct_eq(&self, other: &Self) -> Choice {
        if self.len != other.len {
            return Choice::from(0);
        }
        self.words
            .iter()
            .zip(&other.words)
            .fold(Choice::from(1), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

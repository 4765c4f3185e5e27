//! Repetition error-correcting codec.
//!
//! `encode` repeats each message bit `N = floor(n / k)` times and zero-pads the remainder;
//! `decode` recovers the message by majority vote per block. The noise introduced by the
//! cryptosystem's sparse combiners is low-weight relative to `N`, so decoding succeeds with
//! overwhelming probability even though no error is ever signalled on a wrong result (see
//! [`crate::system`]).

use crate::bitvector::BitVector;
use crate::error::{ensure, Error};

/// Expands a `k`-bit message into an `n`-bit codeword: each bit is repeated
/// `big_n = n / k` times, then zero-padded to exactly `n` bits.
#[must_use]
pub fn encode(m: &BitVector, n: usize) -> BitVector {
    let k = m.len();
    let big_n = n / k;
    let mut out = BitVector::new_zero(0);
    for i in 0..k {
        out.extend_repeat(m.get(i), big_n);
    }
    out.extend_repeat(false, n - big_n * k);
    out
}

/// Recovers a `k`-bit message from an `n`-bit (possibly noisy) codeword by majority vote over
/// each `big_n = n / k`-bit block. Ties are broken toward 1 (`count >= big_n / 2`, integer floor
/// division), matching the source exactly for interoperability. Trailing padding bits beyond
/// `big_n * k` are discarded.
///
/// # Errors
/// Returns [`Error::InvalidParameter`] if `k` is zero.
pub fn decode(c: &BitVector, k: usize) -> Result<BitVector, Error> {
    ensure!(k > 0, Error::InvalidParameter("decode: k must be >= 1"));
    let big_n = c.len() / k;
    let mut out = BitVector::new_zero(k);
    for i in 0..k {
        let block = c.slice(i * big_n, (i + 1) * big_n);
        let count = block.count_ones();
        out.set(i, count >= big_n / 2);
    }
    Ok(out)
}

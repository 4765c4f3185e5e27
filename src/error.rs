//! Error taxonomy for this crate.
//!
//! Parameter and length errors are programmer errors and are raised immediately at the
//! offending operation. `DecapsulationFailure` is a normal, expected outcome of `decapsulate`
//! and is returned rather than panicked on. `decrypt` never returns an error for a bad
//! ciphertext; a wrong plaintext is simply produced silently (see the crate-level docs).

use core::fmt;

/// Errors produced by bitvector operations, parameter selection, and decapsulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested security parameter `k` has no valid configuration: either `k < 1`, or no
    /// Mersenne exponent in the fixed table satisfies `n > 10 * k * k`.
    InvalidParameter(&'static str),
    /// A bitwise operation (AND/OR/XOR/equality) was attempted between bitvectors of differing
    /// length.
    LengthMismatch {
        /// The length the operation required.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },
    /// Fixed-weight sparse sampling was requested with a weight that cannot fit in the
    /// requested length.
    InvalidWeight {
        /// The requested Hamming weight.
        weight: usize,
        /// The bitvector length sampling was attempted over.
        length: usize,
    },
    /// Decapsulation's re-encryption check did not match the supplied ciphertext. This is the
    /// KEM's `⊥` outcome and is a normal, expected result, not a bug.
    DecapsulationFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Error::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected}, got {actual}")
            }
            Error::InvalidWeight { weight, length } => {
                write!(f, "invalid weight {weight} for length {length}")
            }
            Error::DecapsulationFailure => write!(f, "decapsulation failure (ciphertext mismatch)"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// If the condition is not met, return the given error. Mirrors the spirit of `anyhow::ensure!`,
/// generalized to construct a typed [`Error`] instead of a bare string.
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub(crate) use ensure;

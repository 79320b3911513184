//! # Mersenne Prime Reduction
//!
//! Modular reduction by a Mersenne prime `p = 2^e - 1` without division.
//!
//! Because `2^e ≡ 1 (mod p)`, a value `x = high * 2^e + low` is congruent to `high + low`.
//! Splitting `x` at bit `e` and adding the halves therefore performs one full reduction step
//! for any `x < 2^(2e)`; the sum lands in `[0, 2p]` and a conditional subtraction finishes
//! the job.
//!
//! ```rust
//! use mersenne_hash::cs::hashing::mersenne::MersennePrime;
//!
//! let m31 = MersennePrime::M31;
//! let x: u128 = 123_456_789_012_345_678;
//! assert_eq!(m31.reduce(x) as u128, x % m31.prime() as u128);
//! ```
//!
//! All arithmetic is done in `u128`, so inputs of up to `2 * 61` bits are accepted and
//! `2^61 - 1` is the largest supported prime.

use num_prime::nt_funcs::is_prime64;

use crate::cs::error::{Error, Result};

/// Largest exponent whose double width still fits the `u128` working type.
pub const MAX_EXPONENT: u32 = 61;

/// Mersenne exponents usable with the reducer, in ascending order.
pub const KNOWN_EXPONENTS: [u32; 9] = [2, 3, 5, 7, 13, 17, 19, 31, 61];

/// A Mersenne prime `2^exponent - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MersennePrime {
    exponent: u32,
    prime: u64,
}

impl MersennePrime {
    /// `2^13 - 1`, used for 8-bit keys.
    pub const M13: MersennePrime = MersennePrime::from_exponent(13);
    /// `2^17 - 1`, used for 16-bit keys.
    pub const M17: MersennePrime = MersennePrime::from_exponent(17);
    /// `2^19 - 1`
    pub const M19: MersennePrime = MersennePrime::from_exponent(19);
    /// `2^31 - 1`, used for 32-bit keys.
    pub const M31: MersennePrime = MersennePrime::from_exponent(31);
    /// `2^61 - 1`
    pub const M61: MersennePrime = MersennePrime::from_exponent(61);

    const fn from_exponent(exponent: u32) -> Self {
        Self {
            exponent,
            prime: (1u64 << exponent) - 1,
        }
    }

    /// Creates the Mersenne prime `2^exponent - 1`.
    ///
    /// # Errors
    ///
    /// * [`Error::ExponentTooLarge`] if `exponent > MAX_EXPONENT`.
    /// * [`Error::NotMersennePrime`] if `2^exponent - 1` is composite (or below 2).
    pub fn new(exponent: u32) -> Result<Self> {
        if exponent > MAX_EXPONENT {
            return Err(Error::ExponentTooLarge {
                exponent,
                max: MAX_EXPONENT,
            });
        }
        if exponent < 2 {
            return Err(Error::NotMersennePrime { exponent });
        }

        let candidate = Self::from_exponent(exponent);
        if !is_prime64(candidate.prime) {
            return Err(Error::NotMersennePrime { exponent });
        }
        Ok(candidate)
    }

    pub const fn exponent(&self) -> u32 {
        self.exponent
    }

    pub const fn prime(&self) -> u64 {
        self.prime
    }

    /// Mask selecting the low `exponent` bits; numerically equal to the prime.
    pub const fn low_mask(&self) -> u128 {
        self.prime as u128
    }

    /// Mask selecting bits `exponent..2*exponent`.
    pub const fn high_mask(&self) -> u128 {
        ((1u128 << (2 * self.exponent)) - 1) - self.low_mask()
    }

    /// Mask selecting the `2 * exponent` bits the reducer accepts.
    pub const fn input_mask(&self) -> u128 {
        (1u128 << (2 * self.exponent)) - 1
    }

    /// Reduces `x` modulo the prime. `x` must be below `2^(2 * exponent)`.
    ///
    /// Bits above `2 * exponent` are a precondition violation; they trip a debug assertion
    /// and are masked off in release builds.
    #[inline]
    pub fn reduce(&self, x: u128) -> u64 {
        debug_assert!(
            x >> (2 * self.exponent) == 0,
            "input {x} exceeds 2^{} for Mersenne exponent {}",
            2 * self.exponent,
            self.exponent
        );
        fold(x, self.exponent, self.high_mask(), self.low_mask())
    }
}

/// Reduces `x` modulo `2^exponent - 1` using the fold-and-subtract trick.
///
/// The fold itself does not need `2^exponent - 1` to be prime, so any exponent in `1..64`
/// works here. Both `exponent` in `1..64` and `x < 2^(2 * exponent)` are preconditions checked
/// only in debug builds; use [`MersennePrime::new`] to validate an exponent up front.
pub fn reduce(x: u128, exponent: u32) -> u64 {
    debug_assert!(
        (1..64).contains(&exponent),
        "exponent must be in 1..64, got {exponent}"
    );
    debug_assert!(x >> (2 * exponent) == 0);
    let low_mask = (1u128 << exponent) - 1;
    let high_mask = ((1u128 << (2 * exponent)) - 1) - low_mask;
    fold(x, exponent, high_mask, low_mask)
}

#[inline(always)]
fn fold(x: u128, exponent: u32, high_mask: u128, low_mask: u128) -> u64 {
    let prime = low_mask;
    let high = (x & high_mask) >> exponent;
    let low = x & low_mask;

    let mut s = high + low;
    if s >= prime {
        s -= prime;
    }
    // Only x = 2^(2e) - 1 folds to exactly 2p.
    if s >= prime {
        s -= prime;
    }
    s as u64
}

//! # Universal Hashing
//!
//! Carter-Wegman multiplicative hashing over a Mersenne prime field. A hash function is chosen
//! by two random parameters `m ∈ [1, p-1]` and `n ∈ [0, p-1]` and computes
//!
//! ```text
//!   h(x) = ((m * x + n) mod p) mod 2^b
//! ```
//!
//! where `p = 2^e - 1` is picked from the key width and `b` is the requested number of output
//! bits. For two distinct keys the probability of `((m * x + n) mod p)` colliding is at most
//! `1/p` over the random choice of `(m, n)`, which is what makes the family universal.
//!
//! The three supported key widths differ only in their prime and in how keys are masked
//! before hashing; they are rows of one table ([`DomainWidth`]), not separate types.
//!
//! | key width | prime      | key mask      |
//! |-----------|------------|---------------|
//! | 8 bits    | `2^13 - 1` | none          |
//! | 16 bits   | `2^17 - 1` | none          |
//! | 32 bits   | `2^31 - 1` | `0x7FFF_FFFF` |
//!
//! The 32-bit row ignores the highest bit of the key: `x` and `x ^ 2^31` hash identically.
//! Keys wider than the 8 and 16-bit domains are hashed as given; only the low `2 * e` bits of
//! `m * x + n` take part in the reduction.
//!
//! **Note**: This is **not** a cryptographic hash.
//!
//! # Usage
//!
//! ```rust
//! use mersenne_hash::cs::hashing::universal::{DomainWidth, UniversalHash};
//!
//! let hash = UniversalHash::with_params(DomainWidth::U32, 3, 1_234_567, 89).unwrap();
//! let bucket = hash.hash(42);
//! assert!(bucket < 8);
//! ```
//!
//! Random instances are drawn through [`UniversalHashFamily`](super::family::UniversalHashFamily).

use std::fmt;

use rand::Rng;

use crate::cs::error::{Error, Result};
use crate::cs::hashing::mersenne::MersennePrime;

/// Supported key widths for the universal hash family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainWidth {
    U8,
    U16,
    U32,
}

impl DomainWidth {
    /// All supported widths, narrowest first.
    pub const ALL: [DomainWidth; 3] = [DomainWidth::U8, DomainWidth::U16, DomainWidth::U32];

    /// Number of key bits.
    pub const fn bits(self) -> u32 {
        match self {
            DomainWidth::U8 => 8,
            DomainWidth::U16 => 16,
            DomainWidth::U32 => 32,
        }
    }

    /// The Mersenne prime used for keys of this width.
    pub const fn prime(self) -> MersennePrime {
        match self {
            DomainWidth::U8 => MersennePrime::M13,
            DomainWidth::U16 => MersennePrime::M17,
            DomainWidth::U32 => MersennePrime::M31,
        }
    }

    /// Mask applied to every key before hashing.
    ///
    /// Only 32-bit keys are masked, with `2^31 - 1`, so their top bit never reaches the hash.
    pub const fn key_mask(self) -> u64 {
        match self {
            DomainWidth::U8 | DomainWidth::U16 => u64::MAX,
            DomainWidth::U32 => MersennePrime::M31.prime(),
        }
    }
}

impl TryFrom<u32> for DomainWidth {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(DomainWidth::U8),
            16 => Ok(DomainWidth::U16),
            32 => Ok(DomainWidth::U32),
            other => Err(Error::invalid_configuration(format!(
                "unsupported domain width {other}, expected 8, 16 or 32"
            ))),
        }
    }
}

impl fmt::Display for DomainWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.bits())
    }
}

/// Computes `((m * x + n) mod p) & final_mask`.
///
/// `m * x + n` is formed in `u128` without overflow for any `m, n < 2^64` paired with a prime
/// of at most 61 bits. Only its low `2 * exponent` bits are reduced; bits above them are
/// dropped, so the result equals `(m * x + n) mod p` whenever `m * x + n < 2^(2 * exponent)`,
/// which always holds for 32-bit keys masked with [`DomainWidth::key_mask`] and for keys that
/// fit the 8 or 16-bit width.
#[inline]
pub fn evaluate(prime: MersennePrime, m: u64, n: u64, final_mask: u64, x: u64) -> u64 {
    let linear = m as u128 * x as u128 + n as u128;
    prime.reduce(linear & prime.input_mask()) & final_mask
}

/// One member of the universal hash family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniversalHash {
    domain: DomainWidth,
    m: u64,
    n: u64,
    output_bits: u32,
    final_mask: u64,
}

impl UniversalHash {
    /// Builds a hash function from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `output_bits < domain.bits()`,
    /// `1 <= m < p` and `n < p`.
    pub fn with_params(domain: DomainWidth, output_bits: u32, m: u64, n: u64) -> Result<Self> {
        check_output_bits(domain, output_bits)?;
        let p = domain.prime().prime();
        if m == 0 || m >= p {
            return Err(Error::invalid_configuration(format!(
                "multiplier m = {m} must be in [1, {}]",
                p - 1
            )));
        }
        if n >= p {
            return Err(Error::invalid_configuration(format!(
                "offset n = {n} must be in [0, {}]",
                p - 1
            )));
        }
        Ok(Self::from_parts(domain, output_bits, m, n))
    }

    /// Draws `m` and `n` uniformly from `rng`. `output_bits` must already be validated.
    pub(crate) fn sample<R: Rng + ?Sized>(
        domain: DomainWidth,
        output_bits: u32,
        rng: &mut R,
    ) -> Self {
        let p = domain.prime().prime();
        let m = rng.gen_range(1..p);
        let n = rng.gen_range(0..p);
        Self::from_parts(domain, output_bits, m, n)
    }

    fn from_parts(domain: DomainWidth, output_bits: u32, m: u64, n: u64) -> Self {
        Self {
            domain,
            m,
            n,
            output_bits,
            final_mask: (1u64 << output_bits) - 1,
        }
    }

    /// Hashes `key` into `[0, 2^output_bits)`.
    #[inline]
    pub fn hash(&self, key: u64) -> u64 {
        evaluate(
            self.domain.prime(),
            self.m,
            self.n,
            self.final_mask,
            key & self.domain.key_mask(),
        )
    }

    /// Hashes `key` into `[0, p)`, skipping the final output mask.
    #[inline]
    pub fn hash_unmasked(&self, key: u64) -> u64 {
        evaluate(
            self.domain.prime(),
            self.m,
            self.n,
            u64::MAX,
            key & self.domain.key_mask(),
        )
    }

    /// Hashes every key of `keys` in order.
    pub fn hash_all(&self, keys: &[u64]) -> Vec<u64> {
        keys.iter().map(|&k| self.hash(k)).collect()
    }

    pub fn domain(&self) -> DomainWidth {
        self.domain
    }

    pub fn prime(&self) -> MersennePrime {
        self.domain.prime()
    }

    /// The multiplier `m`.
    pub fn m(&self) -> u64 {
        self.m
    }

    /// The offset `n`.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// `(m, n)`
    pub fn params(&self) -> (u64, u64) {
        (self.m, self.n)
    }

    pub fn output_bits(&self) -> u32 {
        self.output_bits
    }

    pub fn final_mask(&self) -> u64 {
        self.final_mask
    }
}

pub(crate) fn check_output_bits(domain: DomainWidth, output_bits: u32) -> Result<()> {
    if output_bits >= domain.bits() {
        return Err(Error::invalid_configuration(format!(
            "output_bits = {output_bits} must be below the {}-bit domain width",
            domain.bits()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_domain_width_table() {
        assert_eq!(DomainWidth::try_from(8).unwrap(), DomainWidth::U8);
        assert_eq!(DomainWidth::try_from(16).unwrap(), DomainWidth::U16);
        assert_eq!(DomainWidth::try_from(32).unwrap(), DomainWidth::U32);
        assert!(matches!(
            DomainWidth::try_from(64),
            Err(Error::InvalidConfiguration(_))
        ));
        assert_eq!(DomainWidth::U8.prime().exponent(), 13);
        assert_eq!(DomainWidth::U16.prime().exponent(), 17);
        assert_eq!(DomainWidth::U32.prime().exponent(), 31);
        assert_eq!(DomainWidth::U32.to_string(), "u32");
    }

    #[test]
    fn test_primes_cover_squared_key_range() {
        // m * x + n fits in 2 * exponent bits for every key of the nominal width
        for domain in DomainWidth::ALL {
            let p = domain.prime();
            let max_param = p.prime() as u128 - 1;
            let max_key = (1u128 << domain.bits()) - 1;
            let worst = max_param * (max_key & domain.key_mask() as u128) + max_param;
            assert!(worst >> (2 * p.exponent()) == 0, "{domain}");
        }
        assert_eq!(DomainWidth::U8.key_mask(), u64::MAX);
        assert_eq!(DomainWidth::U16.key_mask(), u64::MAX);
        assert_eq!(DomainWidth::U32.key_mask(), (1 << 31) - 1);
    }

    #[test]
    fn test_narrow_domains_do_not_mask_wide_keys() {
        let h = UniversalHash::with_params(DomainWidth::U8, 7, 100, 0).unwrap();
        // (100 * 300) mod 8191 = 5427, & 127 = 51
        assert_eq!(h.hash(300), 51);
        assert_eq!(h.hash_unmasked(300), 5427);
        assert_ne!(h.hash(300), h.hash(300 & 0xFF));

        let h = UniversalHash::with_params(DomainWidth::U16, 15, 3, 7).unwrap();
        let key = 70_000u64;
        assert_eq!(h.hash_unmasked(key), (3 * key + 7) % ((1 << 17) - 1));
    }

    #[test]
    fn test_wide_product_keeps_low_double_width_bits() {
        // 100 * 2^20 exceeds 2^26; bits from 26 upward are dropped before reducing
        let h = UniversalHash::with_params(DomainWidth::U8, 7, 100, 9).unwrap();
        let key = 1u64 << 20;
        let folded = (100 * key + 9) & ((1 << 26) - 1);
        assert_eq!(h.hash_unmasked(key), folded % 8191);
        assert_eq!(h.hash(u64::MAX), h.hash(u64::MAX));
    }

    #[test]
    fn test_with_params_validation() {
        assert!(UniversalHash::with_params(DomainWidth::U8, 8, 1, 0).is_err());
        assert!(UniversalHash::with_params(DomainWidth::U8, 7, 1, 0).is_ok());
        assert!(UniversalHash::with_params(DomainWidth::U8, 0, 1, 0).is_ok());
        assert!(UniversalHash::with_params(DomainWidth::U16, 3, 0, 0).is_err());
        assert!(UniversalHash::with_params(DomainWidth::U16, 3, (1 << 17) - 1, 0).is_err());
        assert!(UniversalHash::with_params(DomainWidth::U16, 3, (1 << 17) - 2, 0).is_ok());
        assert!(UniversalHash::with_params(DomainWidth::U32, 3, 5, (1 << 31) - 1).is_err());
        assert!(UniversalHash::with_params(DomainWidth::U32, 31, 5, (1 << 31) - 2).is_ok());
    }

    #[test]
    fn test_known_values() {
        let h = UniversalHash::with_params(DomainWidth::U8, 7, 3, 5).unwrap();
        // 3 * 10 + 5 = 35 < 8191
        assert_eq!(h.hash(10), 35);
        assert_eq!(h.hash_unmasked(10), 35);

        let h = UniversalHash::with_params(DomainWidth::U32, 3, 2, 0).unwrap();
        // 2 * (2^30 + 1) = 2^31 + 2 ≡ 3 (mod 2^31 - 1)
        assert_eq!(h.hash_unmasked((1 << 30) + 1), 3);
        assert_eq!(h.hash((1 << 30) + 1), 3);
    }

    #[test]
    fn test_matches_direct_modulus() {
        let mut rng = StdRng::seed_from_u64(7);
        for domain in DomainWidth::ALL {
            for _ in 0..50 {
                let h = UniversalHash::sample(domain, domain.bits() - 1, &mut rng);
                for _ in 0..100 {
                    let key = (rng.gen::<u64>() >> (64 - domain.bits())) & domain.key_mask();
                    let p = domain.prime().prime() as u128;
                    let expected = ((h.m() as u128 * key as u128 + h.n() as u128) % p) as u64;
                    assert_eq!(h.hash_unmasked(key), expected);
                    assert_eq!(h.hash(key), expected & h.final_mask());
                }
            }
        }
    }

    #[test]
    fn test_output_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for domain in DomainWidth::ALL {
            for bits in 0..domain.bits() {
                let h = UniversalHash::sample(domain, bits, &mut rng);
                assert_eq!(h.final_mask(), (1u64 << bits) - 1);
                for _ in 0..64 {
                    let out = h.hash(rng.gen());
                    assert!(out <= h.final_mask());
                    assert!(h.hash_unmasked(rng.gen()) < domain.prime().prime());
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let h = UniversalHash::with_params(DomainWidth::U16, 10, 99_991, 4_242).unwrap();
        for key in 0..1000u64 {
            assert_eq!(h.hash(key), h.hash(key));
            assert_eq!(
                h.hash(key),
                evaluate(h.prime(), h.m(), h.n(), h.final_mask(), key)
            );
        }
    }

    #[test]
    fn test_u32_ignores_top_bit() {
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..20 {
            let h = UniversalHash::sample(DomainWidth::U32, 16, &mut rng);
            for _ in 0..100 {
                let key = rng.gen::<u32>() as u64;
                assert_eq!(h.hash(key), h.hash(key ^ (1 << 31)));
            }
        }
    }

    #[test]
    fn test_zero_output_bits_maps_everything_to_zero() {
        let h = UniversalHash::with_params(DomainWidth::U32, 0, 17, 3).unwrap();
        assert!((0..500u64).all(|k| h.hash(k) == 0));
    }
}

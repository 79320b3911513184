//! Factory for random members of the universal hash family.
//!
//! ```rust
//! use mersenne_hash::cs::hashing::family::UniversalHashFamily;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let family = UniversalHashFamily::new(16, 4).unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//! let hash = family.sample(&mut rng);
//! assert!(hash.hash(1234) < 16);
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::cs::error::Result;
use crate::cs::hashing::universal::{check_output_bits, DomainWidth, UniversalHash};

/// The set of hash functions for one key width and output width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversalHashFamily {
    domain: DomainWidth,
    output_bits: u32,
}

impl UniversalHashFamily {
    /// Creates the family for `domain_width`-bit keys hashed down to `output_bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::cs::error::Error::InvalidConfiguration)
    /// if `domain_width` is not 8, 16 or 32, or if `output_bits >= domain_width`.
    pub fn new(domain_width: u32, output_bits: u32) -> Result<Self> {
        Self::for_domain(DomainWidth::try_from(domain_width)?, output_bits)
    }

    /// Same as [`new`](Self::new) for an already typed width.
    pub fn for_domain(domain: DomainWidth, output_bits: u32) -> Result<Self> {
        check_output_bits(domain, output_bits)?;
        Ok(Self {
            domain,
            output_bits,
        })
    }

    pub fn domain(&self) -> DomainWidth {
        self.domain
    }

    pub fn output_bits(&self) -> u32 {
        self.output_bits
    }

    /// Draws a member with `m` uniform in `[1, p-1]` and `n` uniform in `[0, p-1]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> UniversalHash {
        UniversalHash::sample(self.domain, self.output_bits, rng)
    }

    /// Draws a reproducible member from `seed`.
    pub fn seeded_sample(&self, seed: u64) -> UniversalHash {
        let mut rng = StdRng::seed_from_u64(seed);
        self.sample(&mut rng)
    }

    /// Validates the configuration and draws one member from the thread-local generator.
    pub fn create(domain_width: u32, output_bits: u32) -> Result<UniversalHash> {
        Self::create_with_rng(domain_width, output_bits, &mut rand::thread_rng())
    }

    /// Validates the configuration and draws one member from `rng`.
    pub fn create_with_rng<R: Rng + ?Sized>(
        domain_width: u32,
        output_bits: u32,
        rng: &mut R,
    ) -> Result<UniversalHash> {
        Ok(Self::new(domain_width, output_bits)?.sample(rng))
    }
}

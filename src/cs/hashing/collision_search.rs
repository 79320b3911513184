//! # Collision-Free Parameter Search
//!
//! Given a fixed, known set of keys, a random member of a universal hash family maps them
//! without collisions with some probability that depends on how many keys there are compared
//! to the number of output values. Sampling members repeatedly and keeping the ones that
//! happen to be injective on the key set is the simplest way to build a perfect hash
//! function for a small static set.
//!
//! [`CollisionSearch`] runs a fixed trial budget. Every trial draws a fresh function, hashes
//! all keys and yields the function if the outputs are pairwise distinct. The search never
//! stops early and reports every qualifying function in trial order, duplicates included.
//!
//! ```rust
//! use mersenne_hash::cs::hashing::collision_search::find_collision_free_hash_with_rng;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let keys: [u64; 4] = [4, 123, 65, 3456];
//! let rng = StdRng::seed_from_u64(7);
//! for found in find_collision_free_hash_with_rng(32, 3, &keys, 1000, rng).unwrap() {
//!     let (m, n) = found.params();
//!     assert!(m >= 1);
//!     assert_eq!(found.outputs.len(), keys.len());
//! }
//! ```

use std::collections::HashSet;
use std::iter::FusedIterator;

use log::{debug, trace};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::cs::error::Result;
use crate::cs::hashing::family::UniversalHashFamily;
use crate::cs::hashing::universal::UniversalHash;

/// A hash function that maps every searched key to a distinct value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionFreeHash {
    /// Zero-based trial in which the function was drawn.
    pub trial: usize,
    /// The qualifying function.
    pub hash: UniversalHash,
    /// Hash of every key, in key order.
    pub outputs: Vec<u64>,
}

impl CollisionFreeHash {
    /// The `(m, n)` parameters of the qualifying function.
    pub fn params(&self) -> (u64, u64) {
        self.hash.params()
    }
}

/// Number of keys that share an output with an earlier key: `|outputs| - |distinct outputs|`.
pub fn count_collisions(outputs: &[u64]) -> usize {
    let distinct: HashSet<u64> = outputs.iter().copied().collect();
    outputs.len() - distinct.len()
}

/// Lazy search over a fixed number of random trials.
///
/// Created by [`find_collision_free_hash`] or [`CollisionSearch::new`]. The iterator is finite
/// and consumes fresh randomness; it cannot be restarted.
#[derive(Debug)]
pub struct CollisionSearch<'k, R> {
    family: UniversalHashFamily,
    keys: &'k [u64],
    trials: usize,
    next_trial: usize,
    rng: R,
}

impl<'k, R: Rng> CollisionSearch<'k, R> {
    pub fn new(family: UniversalHashFamily, keys: &'k [u64], trials: usize, rng: R) -> Self {
        Self {
            family,
            keys,
            trials,
            next_trial: 0,
            rng,
        }
    }

    pub fn family(&self) -> UniversalHashFamily {
        self.family
    }

    /// Trials not yet run.
    pub fn remaining_trials(&self) -> usize {
        self.trials - self.next_trial
    }
}

impl<R: Rng> Iterator for CollisionSearch<'_, R> {
    type Item = CollisionFreeHash;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_trial < self.trials {
            let trial = self.next_trial;
            self.next_trial += 1;

            let hash = self.family.sample(&mut self.rng);
            let outputs = hash.hash_all(self.keys);
            let collisions = count_collisions(&outputs);
            trace!(
                "trial {trial}: m = {}, n = {}, {collisions} collisions",
                hash.m(),
                hash.n()
            );

            if collisions == 0 {
                debug!(
                    "collision-free hash in trial {trial}: m = {}, n = {}",
                    hash.m(),
                    hash.n()
                );
                return Some(CollisionFreeHash {
                    trial,
                    hash,
                    outputs,
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining_trials()))
    }
}

impl<R: Rng> FusedIterator for CollisionSearch<'_, R> {}

/// Searches `trials` random functions of the `(domain_width, output_bits)` family for ones that
/// are injective on `keys`, drawing from the thread-local generator.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`](crate::cs::error::Error::InvalidConfiguration) for an
/// unsupported `domain_width` or an `output_bits` not below it.
pub fn find_collision_free_hash(
    domain_width: u32,
    output_bits: u32,
    keys: &[u64],
    trials: usize,
) -> Result<CollisionSearch<'_, ThreadRng>> {
    find_collision_free_hash_with_rng(domain_width, output_bits, keys, trials, rand::thread_rng())
}

/// Same as [`find_collision_free_hash`] with a caller-supplied generator.
pub fn find_collision_free_hash_with_rng<R: Rng>(
    domain_width: u32,
    output_bits: u32,
    keys: &[u64],
    trials: usize,
    rng: R,
) -> Result<CollisionSearch<'_, R>> {
    let family = UniversalHashFamily::new(domain_width, output_bits)?;
    Ok(CollisionSearch::new(family, keys, trials, rng))
}

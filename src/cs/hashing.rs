//! Universal hashing over Mersenne prime fields.
//!
//! - [`mersenne`]: division-free reduction modulo `2^e - 1`
//! - [`universal`]: the hash functions `((m * x + n) mod p) mod 2^b`
//! - [`family`]: random sampling of `(m, n)` for a key width
//! - [`collision_search`]: repeated sampling until a function is injective on a key set
//!
//! # Examples
//!
//! ```rust
//! use mersenne_hash::cs::hashing::{find_collision_free_hash_with_rng, UniversalHashFamily};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let family = UniversalHashFamily::new(8, 3).unwrap();
//! let hash = family.seeded_sample(42);
//! assert!(hash.hash(200) < 8);
//!
//! let keys: [u64; 3] = [1, 2, 3];
//! let found = find_collision_free_hash_with_rng(8, 3, &keys, 100, StdRng::seed_from_u64(0))
//!     .unwrap()
//!     .next();
//! assert!(found.is_some());
//! ```

pub mod collision_search;
pub mod family;
pub mod mersenne;
pub mod universal;

pub use collision_search::{
    count_collisions, find_collision_free_hash, find_collision_free_hash_with_rng,
    CollisionFreeHash, CollisionSearch,
};
pub use family::UniversalHashFamily;
pub use mersenne::{reduce, MersennePrime};
pub use universal::{evaluate, DomainWidth, UniversalHash};

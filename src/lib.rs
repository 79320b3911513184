pub mod cs;

pub use cs::error::{Error, Result};
pub use cs::{hashing, randomized};
pub use cs::{bucket_load_statistics, find_collision_free_hash};

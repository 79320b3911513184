pub mod error;
pub mod hashing;
pub mod randomized;

// Re-export all modules
pub use hashing::*;
pub use randomized::*;

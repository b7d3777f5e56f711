// Utilities shared across the crate
//
// Pure helpers only: hashing, path shaping, and name shaping.

pub mod hash;
pub mod naming;
pub mod paths;

pub use hash::{hash_content, symbol_id};

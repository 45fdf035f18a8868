//! Configuration types
//!
//! Board-agnostic configuration structures. Persisted as postcard binary
//! data in flash; also expressible as TOML (parsed by the firmware crate).

pub mod types;

pub use types::*;

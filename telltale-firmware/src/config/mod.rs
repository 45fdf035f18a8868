//! Configuration loading
//!
//! Loads dashboard configuration from flash (TOML or binary), falling
//! back to the embedded dashboard.toml defaults.

pub mod loader;
pub mod toml;

pub use loader::{ConfigError, ConfigPersistence};
pub use toml::parse_config;

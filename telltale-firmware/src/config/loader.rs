//! Configuration persistence
//!
//! Loads dashboard configuration from flash storage.
//! Falls back to embedded defaults if flash is empty.

use core::str;
use defmt::*;

use telltale_core::config::{DashboardConfig, CONFIG_VERSION};

use crate::storage::{DashFlash, FlashError, StorageKey};

use super::toml::parse_config;

/// Maximum serialized config size (binary)
const MAX_CONFIG_SIZE: usize = 256;

/// Maximum TOML config size
const MAX_TOML_SIZE: usize = 2048;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization failed
    Deserialize,
    /// TOML parsing failed
    TomlParse,
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// Serialization failed
    Serialize,
    /// Config version mismatch
    VersionMismatch,
    /// Config violates an invariant (zero window, zero range, ...)
    Invalid,
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

/// Configuration persistence manager
///
/// Handles loading dashboard configuration from flash storage.
pub struct ConfigPersistence<'d> {
    storage: DashFlash<'d>,
}

impl<'d> ConfigPersistence<'d> {
    /// Create a new config persistence manager
    pub fn new(storage: DashFlash<'d>) -> Self {
        Self { storage }
    }

    /// Consume this persistence manager and return the underlying storage
    ///
    /// Use this to reclaim the flash after loading config, so it can
    /// be handed to the datalog task.
    pub fn into_storage(self) -> DashFlash<'d> {
        self.storage
    }

    /// Load configuration from flash
    ///
    /// Tries to load TOML config first, falls back to binary postcard format.
    /// Returns the loaded config, or an error if not found or invalid.
    pub async fn load(&mut self) -> Result<DashboardConfig, ConfigError> {
        info!("Loading configuration from flash...");

        // Try TOML first
        match self.load_toml().await {
            Ok(config) => {
                info!("Loaded configuration from TOML");
                return Ok(config);
            }
            Err(ConfigError::Flash(FlashError::NotFound)) => {
                debug!("No TOML config found, trying binary format");
            }
            Err(e) => {
                warn!("Failed to load TOML config: {:?}, trying binary", e);
            }
        }

        // Fall back to binary postcard format
        self.load_binary().await
    }

    /// Persist configuration to flash as postcard binary
    ///
    /// Called after a fallback to the embedded defaults so later boots
    /// take the binary path instead of re-parsing TOML.
    pub async fn save(&mut self, config: &DashboardConfig) -> Result<(), ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let encoded =
            postcard::to_slice(config, &mut buffer).map_err(|_| ConfigError::Serialize)?;

        self.storage.write(StorageKey::Config, encoded).await?;

        info!("Configuration persisted ({} bytes)", encoded.len());
        Ok(())
    }

    /// Load configuration from TOML format
    async fn load_toml(&mut self) -> Result<DashboardConfig, ConfigError> {
        let mut buffer = [0u8; MAX_TOML_SIZE];
        let len = self.storage.read(StorageKey::ConfigToml, &mut buffer).await?;

        debug!("Read {} bytes of TOML from flash", len);

        let toml_str = str::from_utf8(&buffer[..len]).map_err(|_| ConfigError::InvalidUtf8)?;

        let config = parse_config(toml_str).map_err(|e| {
            warn!("TOML parse error: {:?}", e);
            ConfigError::TomlParse
        })?;

        validate(&config)?;
        log_config_summary(&config);
        Ok(config)
    }

    /// Load configuration from binary postcard format
    async fn load_binary(&mut self) -> Result<DashboardConfig, ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = self.storage.read(StorageKey::Config, &mut buffer).await?;

        debug!("Read {} bytes of binary config from flash", len);

        let config: DashboardConfig =
            postcard::from_bytes(&buffer[..len]).map_err(|_| ConfigError::Deserialize)?;

        if config.version != CONFIG_VERSION {
            warn!(
                "Config version mismatch: found {}, expected {}",
                config.version, CONFIG_VERSION
            );
            return Err(ConfigError::VersionMismatch);
        }

        validate(&config)?;
        log_config_summary(&config);
        Ok(config)
    }
}

fn validate(config: &DashboardConfig) -> Result<(), ConfigError> {
    config.validate().map_err(|e| {
        warn!("Config rejected: {:?}", e);
        ConfigError::Invalid
    })
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &DashboardConfig) {
    info!("Configuration loaded successfully");
    debug!("  debounce window: {} ms", config.debounce.window_ms);
    debug!("  trigger mode: {:?}", config.debounce.trigger);
    debug!("  save interval: {} ms", config.save_interval_ms);
    debug!("  poll interval: {} ms", config.poll_interval_ms);
    debug!(
        "  chime: {} Hz for {} ms",
        config.chime.frequency_hz, config.chime.duration_ms
    );
    debug!(
        "  speed scale: {} counts -> {} km/h",
        config.speed.adc_max, config.speed.max_kmh
    );
}

//! Configuration type definitions
//!
//! Every timing and scaling constant the firmware uses has a named
//! default here. Configuration is stored in flash as postcard-serialized
//! binary data, with a TOML representation for human editing.

use crate::debounce::TriggerMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current config schema version
pub const CONFIG_VERSION: u8 = 1;

/// Minimum interval between accepted switch edges
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u32 = 500;

/// Interval between datalog entries
pub const DEFAULT_SAVE_INTERVAL_MS: u32 = 60_000;

/// Switch/sensor polling cadence
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 100;

/// Confirmation chime tone
pub const DEFAULT_CHIME_FREQUENCY_HZ: u16 = 1_000;
pub const DEFAULT_CHIME_DURATION_MS: u16 = 100;

/// Throttle-position ADC range and speed scale
pub const DEFAULT_THROTTLE_ADC_MAX: u16 = 1023;
pub const DEFAULT_MAX_SPEED_KMH: u16 = 120;

/// Display link serial baud rate
pub const DEFAULT_DISPLAY_BAUD: u32 = 115_200;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Debounce window must be greater than zero
    ZeroDebounceWindow,
    /// Polling or save interval must be greater than zero
    ZeroInterval,
    /// ADC range must be greater than zero
    ZeroAdcRange,
    /// Chime duration must be greater than zero
    ZeroChimeDuration,
}

/// Debounce settings shared by both indicator channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebounceConfig {
    /// Minimum interval between accepted edges (ms), invariant: > 0
    pub window_ms: u32,
    /// Level- or edge-triggered evaluation
    pub trigger: TriggerMode,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
            trigger: TriggerMode::default(),
        }
    }
}

/// Confirmation chime settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChimeConfig {
    /// Tone frequency (Hz)
    pub frequency_hz: u16,
    /// Tone duration (ms)
    pub duration_ms: u16,
}

impl Default for ChimeConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_CHIME_FREQUENCY_HZ,
            duration_ms: DEFAULT_CHIME_DURATION_MS,
        }
    }
}

/// Throttle-position sensor scaling
///
/// Speed is a linear map of the ADC reading:
/// `kmh = counts * max_kmh / adc_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedScale {
    /// Full-scale ADC reading (10-bit pot input: 1023)
    pub adc_max: u16,
    /// Speed at full scale (km/h)
    pub max_kmh: u16,
}

impl Default for SpeedScale {
    fn default() -> Self {
        Self {
            adc_max: DEFAULT_THROTTLE_ADC_MAX,
            max_kmh: DEFAULT_MAX_SPEED_KMH,
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DashboardConfig {
    /// Config schema version (for flash compatibility checks)
    pub version: u8,
    /// Indicator switch debounce settings
    pub debounce: DebounceConfig,
    /// Confirmation chime settings
    pub chime: ChimeConfig,
    /// Speed sensor scaling
    pub speed: SpeedScale,
    /// Interval between datalog entries (ms)
    pub save_interval_ms: u32,
    /// Switch/sensor polling cadence (ms)
    pub poll_interval_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            debounce: DebounceConfig::default(),
            chime: ChimeConfig::default(),
            speed: SpeedScale::default(),
            save_interval_ms: DEFAULT_SAVE_INTERVAL_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl DashboardConfig {
    /// Validate invariants that the rest of the firmware relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce.window_ms == 0 {
            return Err(ConfigError::ZeroDebounceWindow);
        }
        if self.poll_interval_ms == 0 || self.save_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.speed.adc_max == 0 {
            return Err(ConfigError::ZeroAdcRange);
        }
        if self.chime.duration_ms == 0 {
            return Err(ConfigError::ZeroChimeDuration);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce.window_ms, 500);
        assert_eq!(config.save_interval_ms, 60_000);
        assert_eq!(config.chime.frequency_hz, 1_000);
        assert_eq!(config.speed.max_kmh, 120);
        assert_eq!(DEFAULT_DISPLAY_BAUD, 115_200);
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = DashboardConfig::default();
        config.debounce.window_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounceWindow));
    }

    #[test]
    fn test_zero_adc_range_rejected() {
        let mut config = DashboardConfig::default();
        config.speed.adc_max = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroAdcRange));
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let mut config = DashboardConfig::default();
        config.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));

        let mut config = DashboardConfig::default();
        config.save_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }
}

//! Simple TOML parser for dashboard configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! Telltale configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays, inline tables, multi-line strings, datetimes

use telltale_core::config::DashboardConfig;
use telltale_core::debounce::TriggerMode;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Unknown key for the current section
    UnknownKey,
    /// Invalid value type or range
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Indicator,
    Chime,
    Speed,
}

/// Parse TOML configuration into a DashboardConfig
///
/// Missing keys keep their defaults; unknown sections and keys are
/// rejected so typos in a hand-edited file surface at load time.
pub fn parse_config(input: &str) -> Result<DashboardConfig, ParseError> {
    let mut config = DashboardConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Section header
        if line.starts_with('[') && line.ends_with(']') {
            section = match &line[1..line.len() - 1] {
                "timing" => Section::Timing,
                "indicator" => Section::Indicator,
                "chime" => Section::Chime,
                "speed" => Section::Speed,
                _ => return Err(ParseError::InvalidSection),
            };
            continue;
        }

        // Key = value
        let (key, value) = split_key_value(line).ok_or(ParseError::InvalidValue)?;

        match (section, key) {
            (Section::Timing, "debounce_window_ms") => {
                config.debounce.window_ms = parse_int(value)?;
            }
            (Section::Timing, "save_interval_ms") => {
                config.save_interval_ms = parse_int(value)?;
            }
            (Section::Timing, "poll_interval_ms") => {
                config.poll_interval_ms = parse_int(value)?;
            }
            (Section::Indicator, "trigger") => {
                config.debounce.trigger = match parse_string(value)? {
                    "level" => TriggerMode::Level,
                    "edge" => TriggerMode::Edge,
                    _ => return Err(ParseError::InvalidValue),
                };
            }
            (Section::Chime, "frequency_hz") => {
                config.chime.frequency_hz = parse_int(value)?;
            }
            (Section::Chime, "duration_ms") => {
                config.chime.duration_ms = parse_int(value)?;
            }
            (Section::Speed, "adc_max") => {
                config.speed.adc_max = parse_int(value)?;
            }
            (Section::Speed, "max_kmh") => {
                config.speed.max_kmh = parse_int(value)?;
            }
            _ => return Err(ParseError::UnknownKey),
        }
    }

    Ok(config)
}

/// Split a `key = value` line, stripping a trailing comment
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once('=')?;
    let rest = rest.trim();

    let value = if rest.starts_with('"') {
        // Quoted string: keep through the closing quote, drop the rest
        let end = rest[1..].find('"')? + 2;
        &rest[..end]
    } else {
        rest.split('#').next().unwrap_or(rest)
    };

    Some((key.trim(), value.trim()))
}

fn parse_int<T: TryFrom<i64>>(value: &str) -> Result<T, ParseError> {
    let n: i64 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    T::try_from(n).map_err(|_| ParseError::InvalidValue)
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embedded_default() {
        // The shipped file must parse and match the built-in defaults
        let config = parse_config(include_str!("../../dashboard.toml")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_parse_overrides() {
        let toml = r#"
            [timing]
            debounce_window_ms = 250
            save_interval_ms = 30000

            [indicator]
            trigger = "edge"

            [chime]
            frequency_hz = 2000

            [speed]
            max_kmh = 60
        "#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.debounce.window_ms, 250);
        assert_eq!(config.debounce.trigger, TriggerMode::Edge);
        assert_eq!(config.save_interval_ms, 30_000);
        assert_eq!(config.chime.frequency_hz, 2_000);
        assert_eq!(config.speed.max_kmh, 60);
        // Untouched keys keep defaults
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.speed.adc_max, 1023);
    }

    #[test]
    fn test_trailing_comment_stripped() {
        let toml = "[timing]\ndebounce_window_ms = 500 # half a second\n";
        let config = parse_config(toml).unwrap();
        assert_eq!(config.debounce.window_ms, 500);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(
            parse_config("[engine]\nrpm = 9000\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert_eq!(
            parse_config("[timing]\ndebounce_ms = 500\n"),
            Err(ParseError::UnknownKey)
        );
    }

    #[test]
    fn test_bad_trigger_rejected() {
        assert_eq!(
            parse_config("[indicator]\ntrigger = \"both\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_negative_value_rejected() {
        assert_eq!(
            parse_config("[timing]\npoll_interval_ms = -1\n"),
            Err(ParseError::InvalidValue)
        );
    }
}

//! Wall-clock trait and time-of-day type

use core::fmt::Write;

use heapless::String;

/// Errors that can occur when reading the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Bus communication failed
    Bus,
    /// Device returned an out-of-range time
    InvalidTime,
}

/// Time of day with minute resolution for display, second for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    /// Derive a time of day from milliseconds of uptime
    ///
    /// Fallback when no RTC is available: hours wrap at 24 so the
    /// display stays plausible across long runs.
    pub fn from_uptime_ms(uptime_ms: u64) -> Self {
        let total_s = uptime_ms / 1000;
        Self {
            hour: ((total_s / 3600) % 24) as u8,
            minute: ((total_s / 60) % 60) as u8,
            second: (total_s % 60) as u8,
        }
    }

    /// Format as `H:MM` (minutes zero-padded, hours not)
    pub fn format_hm(&self) -> String<8> {
        let mut s = String::new();
        // String<8> cannot overflow for two u8 fields
        let _ = write!(s, "{}:{:02}", self.hour, self.minute);
        s
    }
}

/// Trait for wall-clock time sources
///
/// Implemented by RTC drivers. Reading is async because the usual
/// backing device sits on an I2C bus.
pub trait Clock {
    /// Read the current time of day
    fn now(&mut self) -> impl core::future::Future<Output = Result<TimeOfDay, ClockError>>;
}

//! Datalog record format
//!
//! One record is appended to flash per save interval. Records are
//! postcard-encoded for storage; the human-readable line form is what
//! goes out on the debug link.

use core::fmt::Write;

use heapless::String;

use crate::traits::TimeOfDay;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum encoded record size (postcard varint worst case, with margin)
pub const MAX_RECORD_BYTES: usize = 16;

/// Maximum formatted line length
pub const MAX_LOG_LINE: usize = 48;

/// A single datalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogRecord {
    pub speed_kmh: u16,
    pub hour: u8,
    pub minute: u8,
}

impl LogRecord {
    pub fn new(speed_kmh: u16, time: TimeOfDay) -> Self {
        Self {
            speed_kmh,
            hour: time.hour,
            minute: time.minute,
        }
    }

    /// Format as the log line sent on the debug link
    pub fn format_line(&self) -> String<MAX_LOG_LINE> {
        let mut line = String::new();
        // String<48> cannot overflow for these field widths
        let _ = write!(
            line,
            "Speed: {}, Time: {}:{:02}",
            self.speed_kmh, self.hour, self.minute
        );
        line
    }
}

#[cfg(feature = "serde")]
impl LogRecord {
    /// Encode into `buf`, returning the used prefix
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8], postcard::Error> {
        postcard::to_slice(self, buf).map(|s| &*s)
    }

    /// Decode a record from its encoded form
    pub fn decode(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let record = LogRecord {
            speed_kmh: 42,
            hour: 7,
            minute: 5,
        };
        assert_eq!(record.format_line().as_str(), "Speed: 42, Time: 7:05");

        let record = LogRecord {
            speed_kmh: 120,
            hour: 23,
            minute: 59,
        };
        assert_eq!(record.format_line().as_str(), "Speed: 120, Time: 23:59");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encode_decode() {
        let record = LogRecord {
            speed_kmh: 88,
            hour: 12,
            minute: 34,
        };

        let mut buf = [0u8; MAX_RECORD_BYTES];
        let encoded = record.encode(&mut buf).unwrap();
        assert!(encoded.len() <= MAX_RECORD_BYTES);
        assert_eq!(LogRecord::decode(encoded).unwrap(), record);
    }
}

//! Speed sensor implementations

pub mod throttle;

pub use throttle::{counts_to_kmh, AdcReader, ThrottleSensor};

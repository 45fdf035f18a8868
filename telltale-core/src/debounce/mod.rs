//! Debounced turn-indicator switch handling
//!
//! Each physical switch is one [`DebounceChannel`]: a minimum-interval
//! gate that toggles the channel's active state on an accepted press and
//! suppresses the repeated transitions caused by mechanical contact
//! bounce. The [`DebounceController`] owns both channels and dispatches
//! lamp and chime side effects exactly once per accepted edge.

pub mod channel;
pub mod controller;

pub use channel::{ChannelId, DebounceChannel, TriggerMode};
pub use controller::{DebounceController, EdgeSummary, SwitchLevels};

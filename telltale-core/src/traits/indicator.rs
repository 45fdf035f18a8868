//! Indicator lamp and chime traits

/// Trait for a turn-indicator lamp output
///
/// Implementations drive the physical lamp via GPIO, a LED driver chip,
/// or an external display unit.
pub trait IndicatorOutput {
    /// Turn the lamp on or off
    fn set(&mut self, on: bool);

    /// Check if the lamp is currently on
    fn is_on(&self) -> bool;
}

/// Trait for the audible confirmation chime
///
/// The debounce controller sounds a short tone each time an indicator
/// toggles. Implementations may drive a buzzer directly or hand the
/// request off to a dedicated task; the dispatch must not fail.
pub trait Notifier {
    /// Sound a tone at `frequency_hz` for `duration_ms`
    fn sound(&mut self, frequency_hz: u16, duration_ms: u16);
}

//! GPIO indicator lamp
//!
//! Drives a turn-indicator lamp (LED or relay) from a GPIO pin.

use telltale_core::traits::IndicatorOutput;

/// Trait for GPIO pin abstraction
pub trait OutputPin {
    /// Set the pin high
    fn set_high(&mut self);

    /// Set the pin low
    fn set_low(&mut self);

    /// Check if the pin is set high
    fn is_set_high(&self) -> bool;
}

/// GPIO indicator lamp
///
/// The pin can be configured as active-high (default) or active-low
/// (for lamps switched on the low side).
pub struct GpioLamp<P> {
    pin: P,
    /// If true, lamp ON = pin LOW
    inverted: bool,
    /// Current logical state (true = lamp on)
    on: bool,
}

impl<P: OutputPin> GpioLamp<P> {
    /// Create a new GPIO lamp, forced off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut lamp = Self {
            pin,
            inverted,
            on: false,
        };
        lamp.set(false);
        lamp
    }

    /// Create a new lamp with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new lamp with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> IndicatorOutput for GpioLamp<P> {
    fn set(&mut self, on: bool) {
        self.on = on;

        if on != self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

//! Speed sensor trait

/// Errors that can occur when reading the speed sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (signal stuck at the high rail)
    OpenCircuit,
    /// Sensor shorted to ground
    ShortCircuit,
    /// ADC conversion error
    ConversionError,
}

/// Trait for vehicle speed sensors
///
/// Implementations handle the specific pickup (throttle-position
/// potentiometer, hall sensor, CAN frame, ...) and report km/h.
pub trait SpeedSensor {
    /// Read the current speed in km/h
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_kmh(&mut self) -> Result<u16, SensorError>;

    /// Check if the sensor reading is valid
    fn is_valid(&mut self) -> bool {
        self.read_kmh().is_ok()
    }
}

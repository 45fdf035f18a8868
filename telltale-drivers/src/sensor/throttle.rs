//! Throttle-position speed sensor
//!
//! A potentiometer on an ADC pin stands in for the vehicle speed pickup.
//! The reading is a linear map of the ADC counts onto the configured
//! speed range, with wiring-fault detection just below full scale.

use telltale_core::config::SpeedScale;
use telltale_core::traits::{SensorError, SpeedSensor};

/// Noise margin at each ADC rail, in counts
const RAIL_MARGIN: u16 = 4;

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read ADC value (10-bit, 0-1023)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// Convert ADC counts to km/h using the configured linear scale
///
/// Unlike a thermistor, a pot wiper legitimately rests at both rails,
/// so the rails themselves are valid readings: the bottom rail (plus
/// noise margin) is stationary and full deflection is `max_kmh`. Only
/// the band just below full scale - where a healthy wiper cannot sit
/// but a floating input settles - is flagged as a wiring fault.
pub fn counts_to_kmh(counts: u16, scale: &SpeedScale) -> Result<u16, SensorError> {
    if counts >= scale.adc_max {
        return Ok(scale.max_kmh);
    }
    if counts >= scale.adc_max.saturating_sub(RAIL_MARGIN) {
        return Err(SensorError::OpenCircuit);
    }
    if counts <= RAIL_MARGIN {
        return Ok(0);
    }

    // kmh = counts * max_kmh / adc_max
    let kmh = u32::from(counts) * u32::from(scale.max_kmh) / u32::from(scale.adc_max);
    Ok(kmh as u16)
}

/// Throttle-position sensor on an ADC channel
pub struct ThrottleSensor<ADC> {
    adc: ADC,
    scale: SpeedScale,
}

impl<ADC> ThrottleSensor<ADC> {
    pub fn new(adc: ADC, scale: SpeedScale) -> Self {
        Self { adc, scale }
    }

    pub fn scale(&self) -> &SpeedScale {
        &self.scale
    }
}

impl<ADC: AdcReader> SpeedSensor for ThrottleSensor<ADC> {
    fn read_kmh(&mut self) -> Result<u16, SensorError> {
        let counts = self.adc.read().map_err(|_| SensorError::ConversionError)?;
        counts_to_kmh(counts, &self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dummy ADC for testing (returns a fixed value)
    struct DummyAdc(u16);

    impl AdcReader for DummyAdc {
        fn read(&mut self) -> Result<u16, ()> {
            Ok(self.0)
        }
    }

    fn scale() -> SpeedScale {
        SpeedScale::default() // 0..1023 -> 0..120
    }

    #[test]
    fn test_zero_counts_is_stationary() {
        assert_eq!(counts_to_kmh(0, &scale()), Ok(0));
    }

    #[test]
    fn test_low_rail_noise_is_stationary() {
        // A pot resting at the bottom rail jitters by a count or two;
        // the whole margin band reads as 0, never as a fault.
        for counts in 1..=4u16 {
            assert_eq!(counts_to_kmh(counts, &scale()), Ok(0));
        }
    }

    #[test]
    fn test_full_deflection_reaches_max_speed() {
        assert_eq!(counts_to_kmh(1023, &scale()), Ok(120));
    }

    #[test]
    fn test_linear_scaling() {
        // Mid-scale: 511 * 120 / 1023 = 59
        assert_eq!(counts_to_kmh(511, &scale()), Ok(59));

        // Near full scale but below the rail margin
        let kmh = counts_to_kmh(1018, &scale()).unwrap();
        assert_eq!(kmh, 119);
    }

    #[test]
    fn test_open_circuit_band_below_full_scale() {
        assert_eq!(counts_to_kmh(1019, &scale()), Err(SensorError::OpenCircuit));
        assert_eq!(counts_to_kmh(1022, &scale()), Err(SensorError::OpenCircuit));
    }

    #[test]
    fn test_sensor_trait() {
        let mut sensor = ThrottleSensor::new(DummyAdc(511), scale());
        assert_eq!(sensor.read_kmh(), Ok(59));
        assert!(sensor.is_valid());

        let mut sensor = ThrottleSensor::new(DummyAdc(1020), scale());
        assert_eq!(sensor.read_kmh(), Err(SensorError::OpenCircuit));
    }
}

//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod clock;
pub mod indicator;
pub mod sensor;

pub use clock::{Clock, ClockError, TimeOfDay};
pub use indicator::{IndicatorOutput, Notifier};
pub use sensor::{SensorError, SpeedSensor};

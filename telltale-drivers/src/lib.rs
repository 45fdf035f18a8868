//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in telltale-core for the dashboard hardware:
//!
//! - Throttle-position speed sensor (ADC potentiometer)
//! - Indicator lamps (GPIO)
//! - DS3231 real-time clock (I2C)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lamp;
pub mod rtc;
pub mod sensor;

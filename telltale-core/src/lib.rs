//! Board-agnostic core logic for the Telltale dashboard firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (speed sensor, indicator lamp, chime, clock)
//! - Debounced turn-indicator switch handling
//! - Dashboard status model
//! - Datalog record format
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod datalog;
pub mod debounce;
pub mod status;
pub mod traits;

//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thermopile-core:
//!
//! - Omron D6T thermopile arrays over any [`thermopile_hal::Transport`]
//! - Sensor configuration loading from TOML

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod sensor;

pub use config::{parse_config, parse_sensor, SensorList, MAX_SENSORS};
pub use sensor::{D6t, OpenError, Request, Response};

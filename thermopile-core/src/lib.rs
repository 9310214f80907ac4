//! Board-agnostic acquisition and session logic for D6T thermal sensors
//!
//! This crate contains everything between the bus and the caller that
//! does not depend on a specific board:
//!
//! - Sensor model registry
//! - Frame acquisition with whole-frame retry
//! - Sessions: state machine, buffer ownership, per-device locking
//! - Decoded thermal images and sensor traits
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod log;

pub mod acquire;
pub mod config;
pub mod error;
pub mod image;
pub mod model;
pub mod session;
pub mod traits;

pub use acquire::acquire_frame;
pub use config::{AcquisitionConfig, ConfigError, SensorConfig};
pub use error::Error;
pub use image::ThermalImage;
pub use model::{lookup, models, SensorModel};
pub use session::{SensorSession, SessionEvent, SessionState};
pub use traits::{TemperatureSensor, ThermalSensor};

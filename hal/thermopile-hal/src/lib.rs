//! Thermopile Hardware Abstraction Layer
//!
//! This crate defines the bus traits that sensor drivers are written
//! against. Platform I2C drivers plug in underneath, either directly via
//! [`i2c::I2cBus`] or through any `embedded-hal` 1.0 controller wrapped
//! in [`i2c::HalBus`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  thermopile-core / thermopile-drivers   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  transport::Transport (command + frame) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  i2c::I2cBus + embedded-hal DelayNs     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`transport::Transport`] - Command/bulk-read exchange with one device

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use i2c::{HalBus, I2cBus};
pub use transport::{I2cTransport, Transport};

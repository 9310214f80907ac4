//! Temperature sensor traits

use crate::error::Error;
use crate::image::ThermalImage;

/// Trait for single-value temperature sensors
///
/// For thermopile arrays the value is the on-chip reference (PTAT)
/// temperature.
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Returns a fixed-point value with 0.1°C resolution.
    /// For example, 45.5°C is returned as 455.
    fn read_celsius_x10(&mut self) -> Result<i16, Error>;

    /// Read the current temperature in whole degrees Celsius
    fn read_celsius(&mut self) -> Result<i16, Error> {
        self.read_celsius_x10().map(|t| t / 10)
    }

    /// Check if the sensor reading is valid
    fn is_valid(&mut self) -> bool {
        self.read_celsius_x10().is_ok()
    }
}

/// Trait for pixel-array sensors
pub trait ThermalSensor {
    /// Acquire one verified frame
    fn read_image(&mut self) -> Result<ThermalImage, Error>;
}

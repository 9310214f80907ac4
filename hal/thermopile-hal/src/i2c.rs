//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by platform I2C drivers, plus a bridge from `embedded-hal` 1.0.

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: core::fmt::Debug;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically a command byte)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Adapter exposing any `embedded-hal` 1.0 I2C controller as an [`I2cBus`]
///
/// On Linux this wraps e.g. `linux-embedded-hal::I2cdev`; on a
/// microcontroller it wraps the chip HAL's blocking I2C peripheral.
#[derive(Debug)]
pub struct HalBus<T>(pub T);

impl<T> HalBus<T> {
    /// Wrap an `embedded-hal` I2C controller
    pub const fn new(i2c: T) -> Self {
        Self(i2c)
    }

    /// Release the wrapped controller
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for HalBus<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, write_data, read_buf)
    }
}

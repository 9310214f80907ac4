//! Command/response transport
//!
//! Thermopile sensors answer a single command byte with a bulk frame.
//! The [`Transport`] trait is the bus-facing side of that exchange, bound
//! to one device address. Acquisition logic only ever talks to this trait,
//! so tests can replace the bus and the clock together.

use embedded_hal::delay::DelayNs;

use crate::i2c::I2cBus;

/// Two-phase command/bulk-read transport bound to one device
pub trait Transport {
    /// Error for a single bus operation
    type Error: core::fmt::Debug;

    /// 8-bit read address (`address << 1 | 1`) the device folds into its PEC
    fn read_address(&self) -> u8;

    /// Phase 1: send `command`, then hold off `ready_ms` before returning
    ///
    /// The hold-off is the device's measurement time. Callers must not
    /// start reading before this returns.
    fn command(&mut self, command: u8, ready_ms: u32) -> Result<(), Self::Error>;

    /// Phase 2: read the next `buf.len()` bytes of the pending response
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Single write transaction (register writes)
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Block the calling thread for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Send `command` and read the whole response into `buf`
    ///
    /// The response is read in chunks of at most `max_chunk` bytes. The
    /// first failing chunk aborts the whole transaction; bytes already
    /// read are left in `buf` and must be treated as garbage.
    fn transact(
        &mut self,
        command: u8,
        ready_ms: u32,
        buf: &mut [u8],
        max_chunk: usize,
    ) -> Result<(), Self::Error> {
        self.command(command, ready_ms)?;
        for chunk in buf.chunks_mut(max_chunk.max(1)) {
            self.read_chunk(chunk)?;
        }
        Ok(())
    }
}

/// [`Transport`] over an [`I2cBus`] and an `embedded-hal` delay
#[derive(Debug)]
pub struct I2cTransport<B, D> {
    bus: B,
    delay: D,
    address: u8,
}

impl<B, D> I2cTransport<B, D> {
    /// Create a transport for the device at 7-bit `address`
    pub fn new(bus: B, delay: D, address: u8) -> Self {
        Self {
            bus,
            delay,
            address: address & 0x7F,
        }
    }

    /// 7-bit device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B: I2cBus, D: DelayNs> Transport for I2cTransport<B, D> {
    type Error = B::Error;

    fn read_address(&self) -> u8 {
        (self.address << 1) | 1
    }

    fn command(&mut self, command: u8, ready_ms: u32) -> Result<(), Self::Error> {
        self.bus.write(self.address, &[command])?;
        if ready_ms > 0 {
            self.delay.delay_ms(ready_ms);
        }
        Ok(())
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(self.address, buf)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(self.address, bytes)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

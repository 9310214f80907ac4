//! Omron D6T thermopile array driver
//!
//! [`D6t`] is the control-plane face of one sensor: open/close, frame
//! reads as samples or bytes, register writes and a request/response
//! entry point for command-style callers. All acquisition and integrity
//! work is done by the wrapped [`SensorSession`].

use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use thermopile_core::config::SensorConfig;
use thermopile_core::log::{debug, info};
use thermopile_core::model::SensorModel;
use thermopile_core::traits::{TemperatureSensor, ThermalSensor};
use thermopile_core::{Error, SensorSession, SessionState, ThermalImage};
use thermopile_hal::{I2cBus, I2cTransport, Transport};
use thermopile_protocol::to_celsius_x10;

/// Bytes in one register write payload
pub const WRITE_PAYLOAD_LEN: usize = 2;

/// Command-style requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request<'a> {
    /// Bind the session to a model by name
    Init(&'a str),
    /// Release buffers and unbind the model
    Clear,
    /// Acquire one verified frame
    ReadRaw,
}

/// Replies to [`Request`]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Model now bound to the session
    Initialized(&'static SensorModel),
    /// Session is uninitialized
    Cleared,
    /// Decoded samples, PTAT first
    Frame(Vec<u16>),
}

/// Failed open: the error plus the transport it was handed
///
/// The transport is returned untouched so the bus can be reused.
#[derive(Debug)]
pub struct OpenError<T> {
    pub error: Error,
    pub transport: T,
}

impl<T> From<OpenError<T>> for Error {
    fn from(e: OpenError<T>) -> Self {
        e.error
    }
}

/// Omron D6T sensor
pub struct D6t<T> {
    session: SensorSession<T>,
}

impl<T: Transport> D6t<T> {
    /// Open a sensor with `config`
    ///
    /// If the config names a model the session is initialized right away,
    /// otherwise it waits for [`D6t::init`].
    pub fn open(transport: T, config: &SensorConfig) -> Result<Self, OpenError<T>> {
        if let Err(e) = config.validate() {
            return Err(OpenError {
                error: e.into(),
                transport,
            });
        }

        let mut sensor = Self {
            session: SensorSession::with_config(transport, config.acquisition),
        };
        if let Some(name) = &config.model {
            sensor = sensor.bind(name.as_str())?;
        }

        info!("d6t: opened at {:#x}", config.address);
        Ok(sensor)
    }

    /// Open a sensor and initialize it as `model`
    pub fn with_model(transport: T, model: &str) -> Result<Self, OpenError<T>> {
        Self {
            session: SensorSession::new(transport),
        }
        .bind(model)
    }

    /// Initialize a freshly opened sensor, giving the transport back on failure
    fn bind(self, model: &str) -> Result<Self, OpenError<T>> {
        match self.session.init(model) {
            Ok(_) => Ok(self),
            Err(error) => Err(OpenError {
                error,
                transport: self.close(),
            }),
        }
    }

    /// Bind an opened sensor to `model`
    pub fn init(&self, model: &str) -> Result<&'static SensorModel, Error> {
        self.session.init(model)
    }

    /// Unbind the model and release frame buffers
    pub fn clear(&self) {
        self.session.clear();
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn model(&self) -> Option<&'static SensorModel> {
        self.session.model()
    }

    /// Acquire one verified frame
    pub fn read_frame(&self) -> Result<Vec<u16>, Error> {
        self.session.read_frame()
    }

    /// Acquire one verified frame as little-endian sample bytes
    ///
    /// Every call acquires a new frame. `buf` must hold the whole frame
    /// (`2 * sample_count` bytes); partial reads are not supported.
    /// Returns the number of bytes written.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let capacity = buf.len();
        self.session.read_checked(
            |model| {
                if capacity < model.sample_count() * 2 {
                    return Err(Error::InvalidRequest);
                }
                Ok(())
            },
            |_, samples| {
                let len = samples.len() * 2;
                let out = buf.get_mut(..len).ok_or(Error::InvalidRequest)?;
                for (pair, sample) in out.chunks_exact_mut(2).zip(samples) {
                    pair.copy_from_slice(&sample.to_le_bytes());
                }
                Ok(len)
            },
        )
    }

    /// Write a register from a 2-byte payload
    ///
    /// The payload is one native little-endian `u16`: the high byte is
    /// the register, the low byte the value. Returns the bytes consumed.
    pub fn write(&self, payload: &[u8]) -> Result<usize, Error> {
        let bytes: [u8; WRITE_PAYLOAD_LEN] =
            payload.try_into().map_err(|_| Error::InvalidRequest)?;
        let word = u16::from_le_bytes(bytes);
        let [register, value] = word.to_be_bytes();

        self.session.write_register(register, value)?;
        Ok(WRITE_PAYLOAD_LEN)
    }

    /// Write `value` to `register`
    pub fn write_register(&self, register: u8, value: u8) -> Result<(), Error> {
        self.session.write_register(register, value)
    }

    /// Handle one command-style request
    pub fn control(&self, request: Request<'_>) -> Result<Response, Error> {
        debug!("d6t: control {}", request);
        match request {
            Request::Init(name) => self.session.init(name).map(Response::Initialized),
            Request::Clear => {
                self.session.clear();
                Ok(Response::Cleared)
            }
            Request::ReadRaw => self.session.read_frame().map(Response::Frame),
        }
    }

    /// Close the sensor and hand back the transport
    pub fn close(self) -> T {
        self.session.into_transport()
    }
}

impl<B: I2cBus, D: DelayNs> D6t<I2cTransport<B, D>> {
    /// Open a sensor on an I2C bus at `config.address`
    ///
    /// On failure the bus and delay can be recovered with
    /// `err.transport.release()`.
    pub fn open_i2c(
        bus: B,
        delay: D,
        config: &SensorConfig,
    ) -> Result<Self, OpenError<I2cTransport<B, D>>> {
        Self::open(I2cTransport::new(bus, delay, config.address), config)
    }
}

impl<T: Transport> TemperatureSensor for D6t<T> {
    /// Reference (PTAT) temperature of a fresh frame
    fn read_celsius_x10(&mut self) -> Result<i16, Error> {
        self.session
            .read_with(|_, samples| Ok(to_celsius_x10(samples[0])))
    }
}

impl<T: Transport> ThermalSensor for D6t<T> {
    fn read_image(&mut self) -> Result<ThermalImage, Error> {
        self.session.read_image()
    }
}

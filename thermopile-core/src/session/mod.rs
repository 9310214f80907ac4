//! Sensor sessions
//!
//! A [`SensorSession`] is one open handle to one physical sensor. It owns
//! the transport and the frame buffers; nothing else keeps references to
//! either across calls.
//!
//! # Locking
//!
//! One mutex guards the whole acquire → verify → decode → copy-out cycle.
//! A second caller blocks until the first cycle completes and then runs
//! its own full cycle, so every caller gets a freshly acquired frame.
//! Sessions for different devices share nothing and run in parallel.
//!
//! The lock is an `embassy-sync` mutex driven to completion with
//! `embassy_futures::block_on`, which makes every entry point a plain
//! blocking call. `block_on` polls with a no-op waker, so a waiting
//! caller spins on its core until the holder finishes its cycle (up to
//! `max_attempts * (ready_ms + backoff_ms)` plus bus time). Callers that
//! must not spin should serialize access to a session themselves.

mod buffers;
pub mod state;

use alloc::vec::Vec;

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};

use thermopile_hal::Transport;
use thermopile_protocol::{compute_pec, decode, verify_frame};

use crate::acquire::acquire_frame;
use crate::config::AcquisitionConfig;
use crate::error::Error;
use crate::image::ThermalImage;
use crate::log::{debug, info, trace, warn};
use crate::model::{self, SensorModel};

use buffers::{zeroed, FrameBuffers};
pub use state::{SessionEvent, SessionState};

/// Everything guarded by the session lock
struct Inner<T> {
    transport: T,
    config: AcquisitionConfig,
    buffer_limit: usize,
    buffers: Option<FrameBuffers>,
}

impl<T> Inner<T> {
    fn state(&self) -> SessionState {
        match self.buffers {
            Some(_) => SessionState::Ready,
            None => SessionState::Uninitialized,
        }
    }
}

/// One stateful handle to a physical sensor
pub struct SensorSession<T> {
    inner: Mutex<CriticalSectionRawMutex, Inner<T>>,
}

impl<T: Transport> SensorSession<T> {
    /// Create an uninitialized session with default acquisition settings
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, AcquisitionConfig::default())
    }

    /// Create an uninitialized session
    pub fn with_config(transport: T, config: AcquisitionConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                transport,
                config,
                buffer_limit: usize::MAX,
                buffers: None,
            }),
        }
    }

    /// Cap the heap used for frame buffers, in bytes
    ///
    /// `init` fails with `AllocationFailure` for models whose raw and
    /// sample buffers together exceed the cap.
    pub fn with_buffer_limit(mut self, limit: usize) -> Self {
        self.inner.get_mut().buffer_limit = limit;
        self
    }

    /// Blocks, spinning, while another caller holds the session
    fn lock(&self) -> MutexGuard<'_, CriticalSectionRawMutex, Inner<T>> {
        block_on(self.inner.lock())
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.lock().state()
    }

    /// Bound model, if initialized
    pub fn model(&self) -> Option<&'static SensorModel> {
        self.lock().buffers.as_ref().map(|b| b.model)
    }

    /// Acquisition settings in effect
    pub fn config(&self) -> AcquisitionConfig {
        self.lock().config
    }

    /// Bind the session to model `name` and allocate its buffers
    ///
    /// Fails with `AlreadyInitialized` on a ready session; `clear` first
    /// to switch models.
    pub fn init(&self, name: &str) -> Result<&'static SensorModel, Error> {
        let mut inner = self.lock();
        inner.state().transition(SessionEvent::Init)?;

        let model = model::lookup(name)?;
        let buffers = FrameBuffers::allocate(model, inner.buffer_limit)?;
        inner.buffers = Some(buffers);

        info!(
            "{}: initialized ({} bytes/frame, {} samples)",
            model.name,
            model.frame_len(),
            model.sample_count()
        );
        Ok(model)
    }

    /// Release buffers and return to `Uninitialized`
    ///
    /// No-op on an uninitialized session.
    pub fn clear(&self) {
        let mut inner = self.lock();
        if let Some(buffers) = inner.buffers.take() {
            info!("{}: cleared", buffers.model.name);
        }
    }

    /// Acquire one verified frame and hand its samples to `f`
    ///
    /// `f` runs with the session lock held, so it sees exactly the frame
    /// this call acquired. On any error the buffers are wiped and `f` is
    /// not called.
    pub fn read_with<R>(
        &self,
        f: impl FnOnce(&'static SensorModel, &[u16]) -> Result<R, Error>,
    ) -> Result<R, Error> {
        self.read_checked(|_| Ok(()), f)
    }

    /// Like [`read_with`](Self::read_with), but runs `check` against the
    /// bound model before touching the bus
    ///
    /// A failing `check` returns its error without acquiring a frame.
    pub fn read_checked<R>(
        &self,
        check: impl FnOnce(&'static SensorModel) -> Result<(), Error>,
        f: impl FnOnce(&'static SensorModel, &[u16]) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let mut guard = self.lock();
        guard.state().transition(SessionEvent::Acquire)?;

        let Inner {
            transport,
            config,
            buffers,
            ..
        } = &mut *guard;
        let buffers = buffers.as_mut().ok_or(Error::NotInitialized)?;
        let model = buffers.model;
        check(model)?;

        if let Err(e) = acquire_frame(transport, model, &mut buffers.raw, config) {
            buffers.wipe();
            return Err(e);
        }

        let read_address = transport.read_address();
        if !verify_frame(read_address, &buffers.raw) {
            let (trailer, payload) = match buffers.raw.split_last() {
                Some((t, p)) => (*t, p),
                None => (0, &buffers.raw[..]),
            };
            warn!(
                "{}: PEC check failed: calc={} got={}",
                model.name,
                compute_pec(read_address, payload),
                trailer
            );
            buffers.wipe();
            return Err(Error::IntegrityError);
        }

        if let Err(e) = decode(&buffers.raw, &mut buffers.samples) {
            buffers.wipe();
            return Err(e.into());
        }

        trace!("{}: frame ok, ptat={}", model.name, buffers.samples[0]);
        f(model, &buffers.samples)
    }

    /// Acquire one verified frame and return a copy of its samples
    ///
    /// Sample 0 is PTAT, followed by `rows * cols` pixels in row-major
    /// order.
    pub fn read_frame(&self) -> Result<Vec<u16>, Error> {
        self.read_with(|_, samples| {
            let mut out = zeroed(samples.len())?;
            out.copy_from_slice(samples);
            Ok(out)
        })
    }

    /// Acquire one verified frame into a caller buffer
    ///
    /// `out` must hold at least `sample_count()` entries. Returns the
    /// number of samples written.
    pub fn read_frame_into(&self, out: &mut [u16]) -> Result<usize, Error> {
        let capacity = out.len();
        self.read_checked(
            |model| {
                if capacity < model.sample_count() {
                    return Err(Error::InvalidRequest);
                }
                Ok(())
            },
            |_, samples| {
                let dst = out
                    .get_mut(..samples.len())
                    .ok_or(Error::InvalidRequest)?;
                dst.copy_from_slice(samples);
                Ok(samples.len())
            },
        )
    }

    /// Acquire one verified frame as a [`ThermalImage`]
    pub fn read_image(&self) -> Result<ThermalImage, Error> {
        self.read_with(|model, samples| {
            let mut out = zeroed(samples.len())?;
            out.copy_from_slice(samples);
            ThermalImage::new(model, out)
        })
    }

    /// Write `value` to a device register
    ///
    /// Only the model's IIR/averaging and cycle registers are accepted.
    pub fn write_register(&self, register: u8, value: u8) -> Result<(), Error> {
        let mut guard = self.lock();
        guard.state().transition(SessionEvent::Configure)?;

        let Inner {
            transport, buffers, ..
        } = &mut *guard;
        let model = buffers.as_ref().ok_or(Error::NotInitialized)?.model;

        if !model.accepts_register(register) {
            warn!("{}: register {} is not writable", model.name, register);
            return Err(Error::InvalidRequest);
        }

        transport
            .write(&[register, value])
            .map_err(|_| Error::TransportError)?;

        debug!("{}: wrote {} to register {}", model.name, value, register);
        Ok(())
    }

    /// Tear the session down and hand back the transport
    pub fn into_transport(self) -> T {
        self.inner.into_inner().transport
    }
}

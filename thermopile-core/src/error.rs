//! Session and acquisition errors

use thermopile_protocol::FrameError;

use crate::config::ConfigError;

/// Errors surfaced by the model registry, acquisition and session layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Model name not in the registry
    UnknownModel,
    /// `init` on a session that is already `Ready`
    AlreadyInitialized,
    /// Operation requires an initialized session
    NotInitialized,
    /// Frame or sample buffer could not be allocated
    AllocationFailure,
    /// Unsupported register, bad payload size or mis-sized buffer
    InvalidRequest,
    /// A single bus transaction failed
    TransportError,
    /// Every acquisition attempt failed at the bus level
    TransportExhausted,
    /// Frame PEC did not match
    IntegrityError,
}

impl Error {
    /// True for errors a caller may clear by simply retrying the read
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::TransportError | Error::TransportExhausted | Error::IntegrityError
        )
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::InvalidChecksum => Error::IntegrityError,
            FrameError::LengthMismatch | FrameError::BufferTooSmall => Error::InvalidRequest,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::UnknownModel => Error::UnknownModel,
            ConfigError::Parse
            | ConfigError::NoAttempts
            | ConfigError::InvalidChunk
            | ConfigError::InvalidAddress => Error::InvalidRequest,
        }
    }
}

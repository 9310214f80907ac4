//! Configuration type definitions
//!
//! These types describe how a sensor session talks to its device. They
//! are plain data; loading them from a file is the driver crate's job.

use heapless::String;

use thermopile_protocol::MAX_CHUNK;

use crate::model::{self, DEFAULT_ADDRESS, MAX_MODEL_NAME_LEN};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attempts per frame before giving up
pub const DEFAULT_MAX_ATTEMPTS: u8 = 10;

/// Pause between failed attempts, in milliseconds
pub const DEFAULT_BACKOFF_MS: u32 = 20;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Input could not be parsed
    Parse,
    /// `max_attempts` is zero
    NoAttempts,
    /// `max_chunk` is zero or above the bus limit
    InvalidChunk,
    /// Address outside the 7-bit range
    InvalidAddress,
    /// Model name not in the registry
    UnknownModel,
}

/// Frame acquisition tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcquisitionConfig {
    /// Whole-frame attempts before `TransportExhausted`
    pub max_attempts: u8,
    /// Sleep between failed attempts (ms)
    pub backoff_ms: u32,
    /// Largest single bus read (1-256 bytes)
    pub max_chunk: u16,
    /// Override of the model's command-to-ready time (ms)
    pub ready_ms: Option<u32>,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_ms: DEFAULT_BACKOFF_MS,
            max_chunk: MAX_CHUNK as u16,
            ready_ms: None,
        }
    }
}

impl AcquisitionConfig {
    /// Check limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.max_chunk == 0 || self.max_chunk as usize > MAX_CHUNK {
            return Err(ConfigError::InvalidChunk);
        }
        Ok(())
    }

    /// Chunk length clamped to `1..=MAX_CHUNK`
    pub fn chunk_len(&self) -> usize {
        (self.max_chunk as usize).clamp(1, MAX_CHUNK)
    }
}

/// Per-device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Model to initialize on open (none = wait for an explicit init)
    pub model: Option<String<MAX_MODEL_NAME_LEN>>,
    /// Acquisition tuning
    pub acquisition: AcquisitionConfig,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            model: None,
            acquisition: AcquisitionConfig::default(),
        }
    }
}

impl SensorConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that opens the given model at the default address
    pub fn for_model(name: &str) -> Result<Self, ConfigError> {
        let mut model = String::new();
        model.push_str(name).map_err(|_| ConfigError::UnknownModel)?;
        Ok(Self {
            model: Some(model),
            ..Self::default()
        })
    }

    /// Check address, model name and acquisition limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > 0x7F {
            return Err(ConfigError::InvalidAddress);
        }
        if let Some(name) = &self.model {
            model::lookup(name.as_str()).map_err(|_| ConfigError::UnknownModel)?;
        }
        self.acquisition.validate()
    }
}

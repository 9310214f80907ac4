//! Sensor model registry
//!
//! Every supported part is one row in [`MODELS`]. Geometry, command byte
//! and writable registers all come from the table, so adding a part is a
//! data-only change.

use thermopile_protocol::frame;

use crate::error::Error;

/// Maximum model name length (config and control requests)
pub const MAX_MODEL_NAME_LEN: usize = 16;

/// Default 7-bit I2C address of the D6T family
pub const DEFAULT_ADDRESS: u8 = 0x0A;

/// Static descriptor of one sensor model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorModel {
    /// Registry key (e.g. "d6t32l01a")
    pub name: &'static str,
    /// Command byte that triggers a frame read
    pub command: u8,
    /// Pixel rows
    pub rows: u8,
    /// Pixel columns
    pub cols: u8,
    /// Status register, if the part has one
    pub status_register: Option<u8>,
    /// IIR/averaging filter register
    pub iir_avg_register: Option<u8>,
    /// Sampling cycle register
    pub cycle_register: Option<u8>,
    /// Time from command to frame ready, in milliseconds
    pub ready_ms: u32,
}

impl SensorModel {
    /// Number of pixels
    pub const fn pixels(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Wire length of one frame
    pub const fn frame_len(&self) -> usize {
        frame::frame_len(self.pixels())
    }

    /// Samples per frame, PTAT included
    pub const fn sample_count(&self) -> usize {
        frame::sample_count(self.pixels())
    }

    /// True if `register` may be written on this model
    ///
    /// Only the IIR/averaging and cycle registers are writable; models
    /// without them reject every write.
    pub fn accepts_register(&self, register: u8) -> bool {
        self.iir_avg_register == Some(register) || self.cycle_register == Some(register)
    }
}

/// D6T-1A-01: single pixel
pub const D6T_01A: SensorModel = SensorModel {
    name: "d6t01a",
    command: 0x4C,
    rows: 1,
    cols: 1,
    status_register: None,
    iir_avg_register: None,
    cycle_register: None,
    ready_ms: 180,
};

/// D6T-8L-09: 1x8 line array
pub const D6T_8L_09: SensorModel = SensorModel {
    name: "d6t8l09",
    command: 0x4C,
    rows: 1,
    cols: 8,
    status_register: None,
    iir_avg_register: None,
    cycle_register: None,
    ready_ms: 180,
};

/// D6T-44L-06: 4x4 array
pub const D6T_44L_06: SensorModel = SensorModel {
    name: "d6t44l06",
    command: 0x4C,
    rows: 4,
    cols: 4,
    status_register: None,
    iir_avg_register: None,
    cycle_register: None,
    ready_ms: 180,
};

/// D6T-32L-01A: 32x32 array with configurable filtering
pub const D6T_32L_01A: SensorModel = SensorModel {
    name: "d6t32l01a",
    command: 0x4D,
    rows: 32,
    cols: 32,
    status_register: Some(0x00),
    iir_avg_register: Some(0x01),
    cycle_register: Some(0x02),
    ready_ms: 200,
};

/// All supported models
pub static MODELS: &[SensorModel] = &[D6T_01A, D6T_8L_09, D6T_44L_06, D6T_32L_01A];

/// Look up a model by name
pub fn lookup(name: &str) -> Result<&'static SensorModel, Error> {
    MODELS
        .iter()
        .find(|m| m.name == name)
        .ok_or(Error::UnknownModel)
}

/// Iterate all supported models
pub fn models() -> impl Iterator<Item = &'static SensorModel> {
    MODELS.iter()
}

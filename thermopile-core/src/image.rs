//! Decoded thermal images

use alloc::vec::Vec;

use thermopile_protocol::to_celsius_x10;

use crate::error::Error;
use crate::model::SensorModel;

/// One decoded frame with its model geometry
///
/// All temperatures are 0.1 °C fixed point (365 = 36.5 °C).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThermalImage {
    model: &'static SensorModel,
    samples: Vec<u16>,
}

impl ThermalImage {
    /// Wrap decoded `samples` (PTAT first) for `model`
    pub fn new(model: &'static SensorModel, samples: Vec<u16>) -> Result<Self, Error> {
        if samples.len() != model.sample_count() {
            return Err(Error::InvalidRequest);
        }
        Ok(Self { model, samples })
    }

    pub fn model(&self) -> &'static SensorModel {
        self.model
    }

    pub fn rows(&self) -> usize {
        self.model.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.model.cols as usize
    }

    /// Reference (ambient) temperature
    pub fn ptat(&self) -> i16 {
        to_celsius_x10(self.samples[0])
    }

    /// Pixel temperature at `row`, `col`
    pub fn pixel(&self, row: usize, col: usize) -> Option<i16> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.samples
            .get(1 + row * self.cols() + col)
            .copied()
            .map(to_celsius_x10)
    }

    /// Pixel temperatures in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = i16> + '_ {
        self.samples[1..].iter().copied().map(to_celsius_x10)
    }

    /// Hottest pixel as `(row, col, value)`
    ///
    /// Ties resolve to the first pixel in row-major order.
    pub fn hottest(&self) -> Option<(usize, usize, i16)> {
        let cols = self.cols();
        self.pixels()
            .enumerate()
            .fold(None, |best: Option<(usize, i16)>, (i, t)| match best {
                Some((_, b)) if b >= t => best,
                _ => Some((i, t)),
            })
            .map(|(i, t)| (i / cols, i % cols, t))
    }

    /// Raw samples, PTAT first
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }
}

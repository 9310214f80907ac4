//! Frame buffers owned by a ready session
//!
//! Raw and sample buffers are allocated together and dropped together.
//! A session holds `Option<FrameBuffers>`, so a half-allocated state
//! cannot be represented.

use alloc::vec::Vec;
use core::mem::size_of;

use crate::error::Error;
use crate::model::SensorModel;

/// Buffers sized for one model
#[derive(Debug)]
pub(crate) struct FrameBuffers {
    pub(crate) model: &'static SensorModel,
    /// `model.frame_len()` bytes off the wire
    pub(crate) raw: Vec<u8>,
    /// `model.sample_count()` decoded samples, PTAT first
    pub(crate) samples: Vec<u16>,
}

impl FrameBuffers {
    /// Allocate both buffers for `model` within `limit` bytes
    ///
    /// If the second allocation fails the first is dropped before the
    /// error is returned.
    pub(crate) fn allocate(model: &'static SensorModel, limit: usize) -> Result<Self, Error> {
        let mut budget = limit;
        let raw = zeroed_within(model.frame_len(), &mut budget)?;
        let samples = zeroed_within(model.sample_count(), &mut budget)?;
        Ok(Self {
            model,
            raw,
            samples,
        })
    }

    /// Zero both buffers
    pub(crate) fn wipe(&mut self) {
        self.raw.fill(0);
        self.samples.fill(0);
    }
}

/// Fallible zero-filled allocation charged against `budget` bytes
pub(crate) fn zeroed_within<T: Copy + Default>(
    len: usize,
    budget: &mut usize,
) -> Result<Vec<T>, Error> {
    let bytes = len
        .checked_mul(size_of::<T>())
        .ok_or(Error::AllocationFailure)?;
    let remaining = budget
        .checked_sub(bytes)
        .ok_or(Error::AllocationFailure)?;
    let v = zeroed(len)?;
    *budget = remaining;
    Ok(v)
}

/// Fallible zero-filled allocation
pub(crate) fn zeroed<T: Copy + Default>(len: usize) -> Result<Vec<T>, Error> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailure)?;
    v.resize(len, T::default());
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{D6T_01A, D6T_32L_01A};

    #[test]
    fn test_sizes_follow_model() {
        let small = FrameBuffers::allocate(&D6T_01A, usize::MAX).unwrap();
        assert_eq!(small.raw.len(), 5);
        assert_eq!(small.samples.len(), 2);

        let large = FrameBuffers::allocate(&D6T_32L_01A, usize::MAX).unwrap();
        assert_eq!(large.raw.len(), 2051);
        assert_eq!(large.samples.len(), 1025);
    }

    #[test]
    fn test_allocation_failure() {
        assert_eq!(zeroed::<u16>(usize::MAX), Err(Error::AllocationFailure));
    }

    #[test]
    fn test_budget() {
        let mut budget = 10;
        assert_eq!(zeroed_within::<u16>(3, &mut budget).map(|v| v.len()), Ok(3));
        assert_eq!(budget, 4);
        assert_eq!(zeroed_within::<u16>(3, &mut budget), Err(Error::AllocationFailure));
        // A failed charge leaves the budget untouched
        assert_eq!(budget, 4);

        // Exactly the size of both buffers
        assert!(FrameBuffers::allocate(&D6T_01A, 5 + 4).is_ok());
        assert_eq!(
            FrameBuffers::allocate(&D6T_01A, 5 + 3).map(|b| b.raw.len()),
            Err(Error::AllocationFailure)
        );
    }

    #[test]
    fn test_wipe() {
        let mut buffers = FrameBuffers::allocate(&D6T_01A, usize::MAX).unwrap();
        buffers.raw.fill(0xAA);
        buffers.samples.fill(0xBEEF);

        buffers.wipe();

        assert!(buffers.raw.iter().all(|&b| b == 0));
        assert!(buffers.samples.iter().all(|&s| s == 0));
    }
}

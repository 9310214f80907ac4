//! Frame layout, decoding and encoding for D6T thermal sensors.
//!
//! Frame format (little-endian, 16-bit samples):
//! - PTAT (2 bytes): reference (ambient) temperature, sample 0
//! - PIXELS (2 bytes each): `rows * cols` pixel temperatures, row-major
//! - PEC (1 byte): CRC-8 over read address + all preceding bytes
//!
//! Total length is `2 * (1 + rows * cols) + 1` bytes.

use crate::crc;

/// Bytes per sample
pub const SAMPLE_SIZE: usize = 2;

/// Length of the PEC trailer
pub const PEC_LEN: usize = 1;

/// Largest single bus read used when pulling a frame off the wire
pub const MAX_CHUNK: usize = 256;

/// Number of 16-bit samples in a frame (PTAT + pixels)
pub const fn sample_count(pixels: usize) -> usize {
    1 + pixels
}

/// Wire length of a frame carrying `pixels` pixel samples
pub const fn frame_len(pixels: usize) -> usize {
    SAMPLE_SIZE * sample_count(pixels) + PEC_LEN
}

/// Reinterpret a raw sample as signed 0.1 °C fixed point
///
/// The sensor reports temperatures as two's-complement tenths of a degree,
/// so 0xFFF6 is -1.0 °C.
#[inline]
pub const fn to_celsius_x10(sample: u16) -> i16 {
    sample as i16
}

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Buffer length does not match the frame geometry
    LengthMismatch,
    /// PEC mismatch
    InvalidChecksum,
    /// Output buffer too small
    BufferTooSmall,
}

/// Decode little-endian sample pairs from `raw` into `out`
///
/// Decodes exactly `out.len()` samples. The trailer byte is never read
/// as sample data, so `raw` must hold at least `2 * out.len() + 1` bytes.
/// Only call this on a frame that has passed [`crc::verify_frame`].
pub fn decode(raw: &[u8], out: &mut [u16]) -> Result<(), FrameError> {
    let payload_len = raw.len().checked_sub(PEC_LEN).ok_or(FrameError::LengthMismatch)?;
    if out.len() * SAMPLE_SIZE > payload_len {
        return Err(FrameError::LengthMismatch);
    }

    for (sample, pair) in out.iter_mut().zip(raw.chunks_exact(SAMPLE_SIZE)) {
        *sample = u16::from_le_bytes([pair[0], pair[1]]);
    }
    Ok(())
}

/// Encode `samples` as a wire frame with a PEC for `read_address`
///
/// Returns the number of bytes written. Used to model devices in tests
/// and simulators.
pub fn encode_frame(read_address: u8, samples: &[u16], out: &mut [u8]) -> Result<usize, FrameError> {
    let len = samples.len() * SAMPLE_SIZE + PEC_LEN;
    if out.len() < len {
        return Err(FrameError::BufferTooSmall);
    }

    for (pair, sample) in out.chunks_exact_mut(SAMPLE_SIZE).zip(samples) {
        pair.copy_from_slice(&sample.to_le_bytes());
    }
    let payload = len - PEC_LEN;
    out[payload] = crc::compute_pec(read_address, &out[..payload]);

    Ok(len)
}

/// Borrowed view over one raw frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    raw: &'a [u8],
}

impl<'a> Frame<'a> {
    /// View `raw` as a frame with `pixels` pixel samples
    ///
    /// Checks geometry only; see [`Frame::verified`] for the PEC check.
    pub fn parse(raw: &'a [u8], pixels: usize) -> Result<Self, FrameError> {
        if raw.len() != frame_len(pixels) {
            return Err(FrameError::LengthMismatch);
        }
        Ok(Self { raw })
    }

    /// View `raw` as a frame and check its PEC against `read_address`
    pub fn verified(raw: &'a [u8], pixels: usize, read_address: u8) -> Result<Self, FrameError> {
        let frame = Self::parse(raw, pixels)?;
        if !frame.verify(read_address) {
            return Err(FrameError::InvalidChecksum);
        }
        Ok(frame)
    }

    /// True if the trailer matches the PEC computed for `read_address`
    pub fn verify(&self, read_address: u8) -> bool {
        crc::verify_frame(read_address, self.raw)
    }

    /// Raw PTAT sample
    pub fn ptat(&self) -> u16 {
        u16::from_le_bytes([self.raw[0], self.raw[1]])
    }

    /// Number of pixel samples
    pub fn pixel_count(&self) -> usize {
        (self.raw.len() - PEC_LEN) / SAMPLE_SIZE - 1
    }

    /// Raw pixel sample `index` (row-major), if in range
    pub fn pixel(&self, index: usize) -> Option<u16> {
        if index >= self.pixel_count() {
            return None;
        }
        let at = SAMPLE_SIZE * (index + 1);
        Some(u16::from_le_bytes([self.raw[at], self.raw[at + 1]]))
    }

    /// Iterate pixel samples in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = u16> + 'a {
        let raw = self.raw;
        raw[SAMPLE_SIZE..raw.len() - PEC_LEN]
            .chunks_exact(SAMPLE_SIZE)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    }

    /// PEC trailer byte
    pub fn trailer(&self) -> u8 {
        self.raw[self.raw.len() - 1]
    }

    /// Underlying bytes
    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }

    /// Decode all samples (PTAT first) into `out`
    pub fn decode_into(&self, out: &mut [u16]) -> Result<(), FrameError> {
        if out.len() != sample_count(self.pixel_count()) {
            return Err(FrameError::BufferTooSmall);
        }
        decode(self.raw, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const READ_ADDR: u8 = 0x15;

    #[test]
    fn test_geometry() {
        assert_eq!(frame_len(1), 5);
        assert_eq!(sample_count(1), 2);
        assert_eq!(frame_len(16), 35);
        assert_eq!(frame_len(1024), 2051);
        assert_eq!(sample_count(1024), 1025);
    }

    #[test]
    fn test_decode_little_endian() {
        let raw = [0x1A, 0x01, 0xF6, 0xFF, 0x00];
        let mut out = [0u16; 2];
        decode(&raw, &mut out).unwrap();

        assert_eq!(out, [0x011A, 0xFFF6]);
        assert_eq!(to_celsius_x10(out[0]), 282); // 28.2 °C
        assert_eq!(to_celsius_x10(out[1]), -10); // -1.0 °C
    }

    #[test]
    fn test_decode_never_reads_trailer() {
        // Four bytes of payload + trailer cannot hold three samples
        let raw = [0u8; 5];
        let mut out = [0u16; 3];
        assert_eq!(decode(&raw, &mut out), Err(FrameError::LengthMismatch));

        assert_eq!(decode(&[], &mut []), Err(FrameError::LengthMismatch));
    }

    #[test]
    fn test_encode_then_parse() {
        let samples = [282u16, 300, 310];
        let mut buf = [0u8; 16];
        let len = encode_frame(READ_ADDR, &samples, &mut buf).unwrap();
        assert_eq!(len, 7);

        let frame = Frame::verified(&buf[..len], 2, READ_ADDR).unwrap();
        assert_eq!(frame.ptat(), 282);
        assert_eq!(frame.pixel_count(), 2);
        assert_eq!(frame.pixel(0), Some(300));
        assert_eq!(frame.pixel(1), Some(310));
        assert_eq!(frame.pixel(2), None);

        let mut pixels = frame.pixels();
        assert_eq!(pixels.next(), Some(300));
        assert_eq!(pixels.next(), Some(310));
        assert_eq!(pixels.next(), None);
        assert_eq!(frame.trailer(), buf[6]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buf = [0u8; 4];
        assert_eq!(
            encode_frame(READ_ADDR, &[1, 2], &mut buf),
            Err(FrameError::BufferTooSmall)
        );
    }

    #[test]
    fn test_parse_wrong_length() {
        let raw = [0u8; 6];
        assert_eq!(Frame::parse(&raw, 1), Err(FrameError::LengthMismatch));
    }

    #[test]
    fn test_verified_rejects_corruption() {
        let mut buf = [0u8; 5];
        encode_frame(READ_ADDR, &[250, 260], &mut buf).unwrap();
        buf[2] ^= 0x40;
        assert_eq!(
            Frame::verified(&buf, 1, READ_ADDR),
            Err(FrameError::InvalidChecksum)
        );
    }

    #[test]
    fn test_decode_into_size_check() {
        let mut buf = [0u8; 5];
        encode_frame(READ_ADDR, &[250, 260], &mut buf).unwrap();
        let frame = Frame::parse(&buf, 1).unwrap();

        let mut short = [0u16; 1];
        assert_eq!(frame.decode_into(&mut short), Err(FrameError::BufferTooSmall));

        let mut out = [0u16; 2];
        frame.decode_into(&mut out).unwrap();
        assert_eq!(out, [250, 260]);
    }

    proptest! {
        #[test]
        fn prop_decode_reencode_roundtrip(
            pairs in proptest::collection::vec(any::<[u8; 2]>(), 0..128),
            trailer in any::<u8>(),
        ) {
            let mut raw: std::vec::Vec<u8> = pairs.iter().flatten().copied().collect();
            let payload_len = raw.len();
            raw.push(trailer);

            let mut samples = std::vec![0u16; pairs.len()];
            decode(&raw, &mut samples).unwrap();

            let reencoded: std::vec::Vec<u8> = samples
                .iter()
                .flat_map(|s| [(*s & 0xFF) as u8, (*s >> 8) as u8])
                .collect();
            prop_assert_eq!(&reencoded[..], &raw[..payload_len]);
        }

        #[test]
        fn prop_encoded_frames_verify(samples in proptest::collection::vec(any::<u16>(), 1..64)) {
            let mut buf = std::vec![0u8; frame_len(samples.len() - 1)];
            encode_frame(READ_ADDR, &samples, &mut buf).unwrap();

            let frame = Frame::verified(&buf, samples.len() - 1, READ_ADDR).unwrap();
            prop_assert_eq!(frame.ptat(), samples[0]);
            let pixels: std::vec::Vec<u16> = frame.pixels().collect();
            prop_assert_eq!(&pixels[..], &samples[1..]);
        }
    }
}

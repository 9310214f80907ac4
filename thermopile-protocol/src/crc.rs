//! Packet Error Code (PEC) checksum
//!
//! D6T frames end in a CRC-8 over the I2C read address followed by every
//! payload byte:
//! - Polynomial 0x07 (x^8 + x^2 + x + 1), MSB first
//! - Initial value 0x00
//! - No input/output reflection, no final XOR
//!
//! This is the SMBus PEC algorithm (CRC-8/SMBUS).

/// CRC-8 polynomial
pub const CRC8_POLY: u8 = 0x07;

/// Fold one byte into a running CRC-8
#[inline]
pub const fn crc8_step(crc: u8, byte: u8) -> u8 {
    let mut crc = crc ^ byte;
    let mut bit = 0;
    while bit < 8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ CRC8_POLY
        } else {
            crc << 1
        };
        bit += 1;
    }
    crc
}

/// CRC-8 over a byte slice, starting from zero
pub fn crc8(data: &[u8]) -> u8 {
    data.iter().fold(0, |crc, &b| crc8_step(crc, b))
}

/// 8-bit read address for a 7-bit I2C address
#[inline]
pub const fn read_address(address: u8) -> u8 {
    (address << 1) | 1
}

/// PEC as transmitted by the device
///
/// The running checksum is seeded with `read_address` (`address << 1 | 1`)
/// and then every byte of `data` is folded in order.
pub fn compute_pec(read_address: u8, data: &[u8]) -> u8 {
    data.iter()
        .fold(crc8_step(0, read_address), |crc, &b| crc8_step(crc, b))
}

/// Check the trailing PEC byte of a raw frame
///
/// Returns `true` iff the PEC over everything but the last byte equals the
/// last byte. An empty buffer never verifies.
pub fn verify_frame(read_address: u8, raw: &[u8]) -> bool {
    match raw.split_last() {
        Some((&trailer, payload)) => compute_pec(read_address, payload) == trailer,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crc8_check_value() {
        // CRC-8/SMBUS catalogue check value
        assert_eq!(crc8(b"123456789"), 0xF4);
    }

    #[test]
    fn test_crc8_step_vectors() {
        assert_eq!(crc8_step(0x00, 0x00), 0x00);
        assert_eq!(crc8_step(0x00, 0x01), 0x07);
        assert_eq!(crc8_step(0x00, 0x80), 0x89);
        assert_eq!(crc8_step(0x00, 0xFF), 0xF3);
        // Address 0x0A read byte seeds D6T PECs
        assert_eq!(crc8_step(0x00, 0x15), 0x6B);
    }

    #[test]
    fn test_pec_matches_plain_crc_over_prefixed_data() {
        assert_eq!(compute_pec(b'1', b"23456789"), 0xF4);
        assert_eq!(compute_pec(0x15, &[]), crc8_step(0, 0x15));
    }

    #[test]
    fn test_read_address() {
        assert_eq!(read_address(0x0A), 0x15);
        assert_eq!(read_address(0x7F), 0xFF);
    }

    #[test]
    fn test_verify_frame() {
        let mut frame = [0x1Au8, 0x01, 0x2B, 0x01, 0x00];
        frame[4] = compute_pec(0x15, &frame[..4]);
        assert!(verify_frame(0x15, &frame));

        // Wrong device address
        assert!(!verify_frame(0x17, &frame));

        // Bad trailer
        frame[4] ^= 0x01;
        assert!(!verify_frame(0x15, &frame));
    }

    #[test]
    fn test_verify_empty_frame() {
        assert!(!verify_frame(0x15, &[]));
    }

    #[test]
    fn test_zeroed_frame_is_rejected() {
        // A wiped buffer must never pass as a fresh frame
        assert!(!verify_frame(0x15, &[0u8; 5]));
        assert!(!verify_frame(0x15, &[0u8; 2051]));
    }

    proptest! {
        #[test]
        fn prop_single_bit_flip_detected(
            payload in proptest::collection::vec(any::<u8>(), 1..300),
            bit in any::<usize>(),
        ) {
            let mut frame = payload.clone();
            frame.push(compute_pec(0x15, &payload));
            prop_assert!(verify_frame(0x15, &frame));

            let bit = bit % (frame.len() * 8);
            frame[bit / 8] ^= 1 << (bit % 8);
            prop_assert!(!verify_frame(0x15, &frame));
        }

        #[test]
        fn prop_step_fold_equals_crc8(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            let folded = data.iter().fold(0u8, |c, &b| crc8_step(c, b));
            prop_assert_eq!(folded, crc8(&data));
        }
    }
}

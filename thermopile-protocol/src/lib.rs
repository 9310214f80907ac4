//! D6T Thermal Frame Protocol
//!
//! This crate defines the wire format of Omron D6T thermopile array
//! sensors: the PEC checksum, frame geometry and the byte-pair decoder.
//! It has no notion of buses or sessions.
//!
//! # Protocol Overview
//!
//! The host writes one command byte; the sensor answers with a frame:
//! ```text
//! ┌───────┬─────────┬─────────┬─────┬─────────┬─────┐
//! │ PTAT  │ PIXEL 0 │ PIXEL 1 │ ... │ PIXEL N │ PEC │
//! │ 2B LE │ 2B LE   │ 2B LE   │     │ 2B LE   │ 1B  │
//! └───────┴─────────┴─────────┴─────┴─────────┴─────┘
//! ```
//!
//! The PEC is a CRC-8 (poly 0x07) seeded with the device's 8-bit read
//! address, so a frame from the wrong device never verifies.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod crc;
pub mod frame;

pub use crc::{compute_pec, crc8, crc8_step, read_address, verify_frame};
pub use frame::{
    decode, encode_frame, frame_len, sample_count, to_celsius_x10, Frame, FrameError, MAX_CHUNK,
};

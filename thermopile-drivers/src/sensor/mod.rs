//! Temperature sensor drivers

pub mod d6t;

pub use d6t::{D6t, OpenError, Request, Response, WRITE_PAYLOAD_LEN};

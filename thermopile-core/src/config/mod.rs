//! Configuration types
//!
//! Board-agnostic session configuration, optionally serde-serializable.

pub mod types;

pub use types::*;

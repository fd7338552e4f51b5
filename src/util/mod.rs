//! # Utility Modules
//!
//! Common helpers shared across the hydroclima-rs crate, currently hex
//! encoding/decoding used by annotations, payload logging and the CLI.

pub mod hex;

// Re-export commonly used functions
pub use hex::{decode_hex, encode_hex, encode_hex_upper, format_hex_compact, hex_to_bytes};

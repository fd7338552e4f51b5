//! # Payload Decoding Primitives
//!
//! Building blocks for manufacturer payload decoding: a bounded cursor that
//! refuses to read past the end of the payload, and the packed date/time
//! decoder used by the HydroClima field layout.

pub mod cursor;
pub mod datetime;

// Re-export commonly used types and functions
pub use cursor::PayloadCursor;
pub use datetime::{decode_datetime, is_leap_year};

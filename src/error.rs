//! # HydroClima Error Handling
//!
//! This module defines the DriverError enum, which represents the different error
//! types that can occur in the hydroclima-rs crate.

use thiserror::Error;

/// Represents the different error types that can occur while decoding.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Indicates a packed date whose day-of-year does not fit inside the encoded year.
    #[error("Invalid date: day of year {0} is outside the encoded year")]
    InvalidDate(u16),

    /// Indicates a packed time that decodes to an hour of 24 or more.
    #[error("Invalid time: encoded value {encoded} decodes to hour {hour}")]
    InvalidTime { encoded: u16, hour: u16 },

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string")]
    InvalidHexString,

    /// Indicates an invalid manufacturer code.
    #[error("Invalid manufacturer")]
    InvalidManufacturer,

    /// Indicates a value was stored into a field the driver never declared.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Indicates a value was stored with a unit other than the field's declared unit.
    #[error("Unit mismatch for field {field}: expected {expected}, got {got}")]
    UnitMismatch {
        field: String,
        expected: &'static str,
        got: &'static str,
    },

    /// Indicates a driver was registered twice for the same detection signature.
    #[error("Driver already registered for detection: {0}")]
    DriverAlreadyRegistered(String),

    /// Indicates no driver matches a detection signature.
    #[error("No driver registered for detection: {0}")]
    UnknownDetection(String),

    /// A catch‑all error for uncategorized cases.
    #[error("Other error: {0}")]
    Other(String),
}

//! # hydroclima-rs - Decoding B METERS HydroClima Heat Cost Allocators
//!
//! The hydroclima-rs crate decodes the manufacturer-specific payload carried
//! in wM-Bus telegrams of HydroClima heat cost allocation meters. One decode
//! call turns the raw byte sequence into two consumption indications, two
//! average ambient temperatures and the device clock timestamp, and emits a
//! human-auditable annotation for every decoded byte range.
//!
//! ## Features
//!
//! - Strictly bounds-checked field extraction; a truncated payload yields a
//!   valid partial reading instead of an error
//! - Custom scaling for HCA indications (1/10) and temperatures (1/100)
//! - The meter's packed day-of-year/tick date/time encoding, with malformed
//!   dates and times rejected explicitly
//! - Per-field diagnostic annotations with raw hex and rendered values
//! - Explicit startup-time driver registration keyed by detection signature
//!
//! ## Usage
//!
//! ```rust
//! use hydroclima_rs::decode_payload;
//! use hydroclima_rs::util::hex::hex_to_bytes;
//!
//! let payload = hex_to_bytes("0200000064193207E8030F27D007A10B");
//! let (reading, annotations) = decode_payload(&payload, 0).unwrap();
//!
//! assert_eq!(reading.current_consumption_hca, Some(200.0));
//! assert_eq!(reading.device_date_time.as_deref(), Some("2003-10-02T03:36:10Z"));
//! assert_eq!(annotations.len(), 7);
//! ```
//!
//! Telegram reception, framing and decryption are external concerns; the
//! crate consumes the already isolated manufacturer payload.

pub mod constants;
pub mod driver;
pub mod error;
pub mod fields;
pub mod logging;
pub mod payload;
pub mod telegram;
pub mod util;

pub use crate::error::DriverError;
pub use crate::logging::{init_logger, log_info};

// Core decoding types
pub use driver::hydroclima::{
    decode_payload, to_indication, to_temperature, HydroClimaDriver, HydroClimaReading,
};
pub use fields::{FieldStore, Quantity, ReadingSink, Unit};
pub use payload::{decode_datetime, PayloadCursor};
pub use telegram::{Annotation, AnnotationKind, Telegram, Understanding};

// Driver registration
pub use driver::{
    id_to_manufacturer, manufacturer_name, manufacturer_to_id, DetectionSignature, DriverInfo,
    DriverRegistry, LinkMode, MeterDriver, MeterType,
};

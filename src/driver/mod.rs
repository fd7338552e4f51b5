//! # Driver Registration and Detection
//!
//! Maps a detection signature (manufacturer code plus media and version
//! bytes) to the manufacturer-specific payload decoder for that device
//! class. The host builds a registry once at startup — either empty or via
//! [`DriverRegistry::with_defaults`] — and routes each received telegram to
//! the driver returned by [`DriverRegistry::lookup`]. Nothing registers
//! itself through load-order side effects.

pub mod hydroclima;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::error::DriverError;
use crate::fields::{FieldStore, ReadingSink};
use crate::telegram::Telegram;

/// Meter classification declared in a driver's schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterType {
    HeatCostAllocation,
}

/// Radio link modes a driver declares its devices transmit in
///
/// Declarative only; link-layer handling lives with the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    T1,
    C1,
}

/// Manufacturer code plus device-type bytes that route a telegram to a
/// driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetectionSignature {
    /// FLAG-encoded 3-letter manufacturer code
    pub manufacturer: u16,
    /// wM-Bus media byte
    pub media: u8,
    /// Device version byte
    pub version: u8,
}

impl DetectionSignature {
    pub const fn new(manufacturer: u16, media: u8, version: u8) -> Self {
        Self {
            manufacturer,
            media,
            version,
        }
    }
}

impl fmt::Display for DetectionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02X} {:02X}",
            id_to_manufacturer(self.manufacturer),
            self.media,
            self.version
        )
    }
}

/// Static schema a driver declares at registration time
#[derive(Debug, Clone)]
pub struct DriverInfo {
    /// Driver name as used in output selection
    pub name: &'static str,
    /// Default output selection, in display order
    pub default_fields: &'static [&'static str],
    pub meter_type: MeterType,
    pub link_modes: &'static [LinkMode],
    /// Signatures this driver is detected by
    pub detections: &'static [DetectionSignature],
}

/// Manufacturer-specific payload decoder for one device class
pub trait MeterDriver: Send + Sync {
    /// Static schema and detection configuration
    fn info(&self) -> &DriverInfo;

    /// Declare the driver's named fields on a fresh store
    fn declare_fields(&self, store: &mut FieldStore);

    /// Decode one telegram's manufacturer payload into the sink, annotating
    /// each decoded byte range on the telegram
    fn process_telegram(
        &self,
        telegram: &mut Telegram,
        sink: &mut dyn ReadingSink,
    ) -> Result<(), DriverError>;
}

/// Registry of payload decoders keyed by detection signature
#[derive(Default, Clone)]
pub struct DriverRegistry {
    inner: Arc<Mutex<HashMap<DetectionSignature, Arc<dyn MeterDriver>>>>,
}

impl DriverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver under every detection signature it declares
    ///
    /// Fails without registering anything when any signature is already
    /// taken, so a second registration pass is rejected as a whole.
    pub fn register(&self, driver: Arc<dyn MeterDriver>) -> Result<(), DriverError> {
        let mut inner = self.inner.lock().unwrap();

        for detection in driver.info().detections {
            if inner.contains_key(detection) {
                return Err(DriverError::DriverAlreadyRegistered(detection.to_string()));
            }
        }
        for detection in driver.info().detections {
            inner.insert(*detection, driver.clone());
        }

        Ok(())
    }

    /// Remove the driver registered for a detection signature
    pub fn unregister(&self, detection: &DetectionSignature) -> Result<(), DriverError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.remove(detection).is_none() {
            return Err(DriverError::UnknownDetection(detection.to_string()));
        }

        Ok(())
    }

    /// Driver registered for a detection signature, if any
    pub fn lookup(&self, detection: &DetectionSignature) -> Option<Arc<dyn MeterDriver>> {
        let inner = self.inner.lock().unwrap();
        inner.get(detection).cloned()
    }

    /// True when a driver is registered for the signature
    pub fn has_driver(&self, detection: &DetectionSignature) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.contains_key(detection)
    }

    /// All registered detection signatures
    pub fn registered_detections(&self) -> Vec<DetectionSignature> {
        let inner = self.inner.lock().unwrap();
        inner.keys().copied().collect()
    }

    /// Create a registry with the built-in drivers registered
    pub fn with_defaults() -> Result<Self, DriverError> {
        let registry = Self::new();

        registry.register(Arc::new(hydroclima::HydroClimaDriver::new()))?;

        // Future device classes get registered here.

        Ok(registry)
    }
}

/// Known manufacturers, FLAG id to display name
static KNOWN_MANUFACTURERS: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0x09B0, "B METERS"), // BMP
        (0x4493, "Qundis"),   // QDS
    ])
});

/// Display name of a known manufacturer, falling back to the 3-letter code
pub fn manufacturer_name(id: u16) -> String {
    KNOWN_MANUFACTURERS
        .get(&id)
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| id_to_manufacturer(id))
}

/// Convert a FLAG-encoded manufacturer id to its 3-letter code
///
/// Falls back to the hex form for ids outside the A-Z alphabet.
pub fn id_to_manufacturer(id: u16) -> String {
    let c1 = ((id >> 10) & 0x1F) as u8 + b'A' - 1;
    let c2 = ((id >> 5) & 0x1F) as u8 + b'A' - 1;
    let c3 = (id & 0x1F) as u8 + b'A' - 1;

    let code = [c1, c2, c3];
    if code.iter().all(|c| c.is_ascii_uppercase()) {
        String::from_utf8(code.to_vec()).unwrap_or_else(|_| format!("{id:04X}"))
    } else {
        format!("{id:04X}")
    }
}

/// Convert a 3-letter manufacturer code to its FLAG-encoded id
pub fn manufacturer_to_id(code: &str) -> Result<u16, DriverError> {
    let bytes = code.as_bytes();
    if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_uppercase()) {
        return Err(DriverError::InvalidManufacturer);
    }

    let c1 = u16::from(bytes[0] - b'A' + 1);
    let c2 = u16::from(bytes[1] - b'A' + 1);
    let c3 = u16::from(bytes[2] - b'A' + 1);

    Ok((c1 << 10) | (c2 << 5) | c3)
}

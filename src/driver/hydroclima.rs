//! # B METERS HydroClima Driver
//!
//! Decodes the manufacturer-specific payload of HydroClima heat cost
//! allocator telegrams. The payload is a fixed left-to-right sequence of
//! small fields, each guarded by a bounds check:
//!
//! | Bytes | Field                                           |
//! |-------|-------------------------------------------------|
//! | 2     | measurement count (diagnostic only)             |
//! | 2     | status word (diagnostic only)                   |
//! | 4     | packed time + packed date (device clock)        |
//! | 2     | previous-year consumption (HCA index)           |
//! | 2     | previous-year average ambient temperature (°C)  |
//! | 2     | current-year consumption (HCA index)            |
//! | 2     | current-year average ambient temperature (°C)   |
//!
//! Every 16-bit field arrives low byte first; the second transmitted byte
//! is the high byte. Running out of bytes mid-sequence is not an error:
//! decoding stops and the fields already decoded stay valid. A telegram
//! without a manufacturer data section decodes to nothing at all.

use log::debug;
use serde::Serialize;

use crate::constants::{HYDROCLIMA_VERSION, MANUFACTURER_BMP, MEDIA_HEAT_COST_ALLOCATOR};
use crate::driver::{DetectionSignature, DriverInfo, LinkMode, MeterDriver, MeterType};
use crate::error::DriverError;
use crate::fields::{FieldStore, Quantity, ReadingSink, Unit};
use crate::payload::cursor::PayloadCursor;
use crate::payload::datetime::decode_datetime;
use crate::telegram::{Annotation, Telegram};
use crate::util::hex::{encode_hex_upper, format_hex_compact};

pub const FIELD_CURRENT_CONSUMPTION: &str = "current_consumption";
pub const FIELD_PREVIOUS_CONSUMPTION: &str = "previous_consumption";
pub const FIELD_AVERAGE_AMBIENT_TEMPERATURE: &str = "average_ambient_temperature";
pub const FIELD_PREVIOUS_AVERAGE_AMBIENT_TEMPERATURE: &str =
    "previous_average_ambient_temperature";

static HYDROCLIMA_INFO: DriverInfo = DriverInfo {
    name: "hydroclima2",
    default_fields: &[
        "name",
        "id",
        "current_consumption_hca",
        "average_ambient_temperature_c",
        "timestamp",
    ],
    meter_type: MeterType::HeatCostAllocation,
    link_modes: &[LinkMode::T1],
    detections: &[DetectionSignature::new(
        MANUFACTURER_BMP,
        MEDIA_HEAT_COST_ALLOCATOR,
        HYDROCLIMA_VERSION,
    )],
};

/// Convert a big-endian byte pair into degrees Celsius
pub fn to_temperature(hi: u8, lo: u8) -> f64 {
    f64::from((u16::from(hi) << 8) | u16::from(lo)) / 100.0
}

/// Convert a big-endian byte pair into an HCA indication index
pub fn to_indication(hi: u8, lo: u8) -> f64 {
    f64::from((u16::from(hi) << 8) | u16::from(lo)) / 10.0
}

/// Payload decoder for HydroClima heat cost allocators
#[derive(Debug, Default)]
pub struct HydroClimaDriver;

impl HydroClimaDriver {
    pub fn new() -> Self {
        Self
    }

    /// Decode one value-bearing 2-byte field: store it, then annotate the
    /// byte range with the rendered default-unit form
    fn decode_value_field(
        telegram: &mut Telegram,
        sink: &mut dyn ReadingSink,
        offset: usize,
        pos: usize,
        field: &[u8],
        name: &'static str,
        quantity: Quantity,
        value: f64,
    ) -> Result<(), DriverError> {
        sink.set_numeric_value(name, quantity.default_unit(), value)?;
        let info = sink.render_json_only_default_unit(name, quantity);
        telegram.add_special_explanation(
            offset + pos,
            2,
            format!("*** {} ({})", encode_hex_upper(field), info),
        );
        Ok(())
    }
}

impl MeterDriver for HydroClimaDriver {
    fn info(&self) -> &DriverInfo {
        &HYDROCLIMA_INFO
    }

    fn declare_fields(&self, store: &mut FieldStore) {
        store.add_numeric_field(
            FIELD_CURRENT_CONSUMPTION,
            Quantity::Hca,
            Unit::Hca,
            "Consumption since the beginning of this year.",
        );
        store.add_numeric_field(
            FIELD_PREVIOUS_CONSUMPTION,
            Quantity::Hca,
            Unit::Hca,
            "Consumption in the previous year.",
        );
        store.add_numeric_field(
            FIELD_AVERAGE_AMBIENT_TEMPERATURE,
            Quantity::Temperature,
            Unit::Celsius,
            "Average ambient temperature since the beginning of this year.",
        );
        store.add_numeric_field(
            FIELD_PREVIOUS_AVERAGE_AMBIENT_TEMPERATURE,
            Quantity::Temperature,
            Unit::Celsius,
            "Average ambient temperature in the previous year.",
        );
    }

    fn process_telegram(
        &self,
        telegram: &mut Telegram,
        sink: &mut dyn ReadingSink,
    ) -> Result<(), DriverError> {
        // No manufacturer data section: nothing to decode, not an error.
        let Some(bytes) = telegram.extract_mfct_data() else {
            return Ok(());
        };
        let offset = telegram.mfct_offset();

        debug!("(hydroclima mfct) {}", format_hex_compact(&bytes));

        let mut cursor = PayloadCursor::new(&bytes);

        let pos = cursor.position();
        let Some(field) = cursor.take(2) else {
            return Ok(());
        };
        let num_measurements = (u16::from(field[1]) << 8) | u16::from(field[0]);
        telegram.add_special_explanation(
            offset + pos,
            2,
            format!(
                "*** {} num measurements {}",
                encode_hex_upper(field),
                num_measurements
            ),
        );

        let pos = cursor.position();
        let Some(field) = cursor.take(2) else {
            return Ok(());
        };
        let status = (u16::from(field[1]) << 8) | u16::from(field[0]);
        debug!("(hydroclima mfct) status word {status:#06X}");
        telegram.add_special_explanation(
            offset + pos,
            2,
            format!("*** {} status", encode_hex_upper(field)),
        );

        let pos = cursor.position();
        let Some(field) = cursor.take(4) else {
            return Ok(());
        };
        let time = (u16::from(field[1]) << 8) | u16::from(field[0]);
        let date = (u16::from(field[3]) << 8) | u16::from(field[2]);
        let device_date_time = decode_datetime(date, time)?;
        sink.set_device_date_time(&device_date_time);
        // Length 2 despite the 4-byte range: kept as emitted by deployed
        // tooling, which consumers align on.
        telegram.add_special_explanation(
            offset + pos,
            2,
            format!(
                "*** {} device date ({})",
                encode_hex_upper(field),
                device_date_time
            ),
        );

        let pos = cursor.position();
        let Some(field) = cursor.take(2) else {
            return Ok(());
        };
        Self::decode_value_field(
            telegram,
            sink,
            offset,
            pos,
            field,
            FIELD_PREVIOUS_CONSUMPTION,
            Quantity::Hca,
            to_indication(field[1], field[0]),
        )?;

        let pos = cursor.position();
        let Some(field) = cursor.take(2) else {
            return Ok(());
        };
        Self::decode_value_field(
            telegram,
            sink,
            offset,
            pos,
            field,
            FIELD_PREVIOUS_AVERAGE_AMBIENT_TEMPERATURE,
            Quantity::Temperature,
            to_temperature(field[1], field[0]),
        )?;

        let pos = cursor.position();
        let Some(field) = cursor.take(2) else {
            return Ok(());
        };
        Self::decode_value_field(
            telegram,
            sink,
            offset,
            pos,
            field,
            FIELD_CURRENT_CONSUMPTION,
            Quantity::Hca,
            to_indication(field[1], field[0]),
        )?;

        let pos = cursor.position();
        let Some(field) = cursor.take(2) else {
            return Ok(());
        };
        Self::decode_value_field(
            telegram,
            sink,
            offset,
            pos,
            field,
            FIELD_AVERAGE_AMBIENT_TEMPERATURE,
            Quantity::Temperature,
            to_temperature(field[1], field[0]),
        )?;

        Ok(())
    }
}

/// Owned snapshot of one decode; fields the payload never reached stay
/// `None`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydroClimaReading {
    pub previous_consumption_hca: Option<f64>,
    pub previous_average_ambient_temperature_c: Option<f64>,
    pub current_consumption_hca: Option<f64>,
    pub average_ambient_temperature_c: Option<f64>,
    pub device_date_time: Option<String>,
}

impl HydroClimaReading {
    /// Snapshot the HydroClima fields out of a store
    pub fn from_store(store: &FieldStore) -> Self {
        Self {
            previous_consumption_hca: store.numeric_value(FIELD_PREVIOUS_CONSUMPTION),
            previous_average_ambient_temperature_c: store
                .numeric_value(FIELD_PREVIOUS_AVERAGE_AMBIENT_TEMPERATURE),
            current_consumption_hca: store.numeric_value(FIELD_CURRENT_CONSUMPTION),
            average_ambient_temperature_c: store.numeric_value(FIELD_AVERAGE_AMBIENT_TEMPERATURE),
            device_date_time: store.device_date_time().map(str::to_string),
        }
    }
}

/// Decode one isolated manufacturer payload with a fresh field store
///
/// Convenience entry point for hosts that already hold the raw payload:
/// wraps it in a [`Telegram`] at `base_offset`, runs the driver and returns
/// the reading snapshot together with the emitted annotations.
pub fn decode_payload(
    payload: &[u8],
    base_offset: usize,
) -> Result<(HydroClimaReading, Vec<Annotation>), DriverError> {
    let driver = HydroClimaDriver::new();
    let mut store = FieldStore::new();
    driver.declare_fields(&mut store);

    let mut telegram = Telegram::with_mfct_data(base_offset, 0, payload.to_vec());
    driver.process_telegram(&mut telegram, &mut store)?;

    Ok((
        HydroClimaReading::from_store(&store),
        telegram.into_annotations(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scalar_samples() {
        assert_eq!(to_indication(0x03, 0xE8), 100.0);
        assert_eq!(to_temperature(0x27, 0x0F), 99.99);
        assert_eq!(to_indication(0x00, 0x00), 0.0);
        assert_eq!(to_temperature(0xFF, 0xFF), 655.35);
    }

    proptest! {
        #[test]
        fn indication_matches_reference(hi in any::<u8>(), lo in any::<u8>()) {
            let raw = f64::from(u16::from(hi) * 256 + u16::from(lo));
            prop_assert_eq!(to_indication(hi, lo), raw / 10.0);
        }

        #[test]
        fn temperature_matches_reference(hi in any::<u8>(), lo in any::<u8>()) {
            let raw = f64::from(u16::from(hi) * 256 + u16::from(lo));
            prop_assert_eq!(to_temperature(hi, lo), raw / 100.0);
        }
    }

    #[test]
    fn test_absent_mfct_data_is_a_noop() {
        let driver = HydroClimaDriver::new();
        let mut store = FieldStore::new();
        driver.declare_fields(&mut store);

        let mut telegram = Telegram::without_mfct_data(10);
        driver.process_telegram(&mut telegram, &mut store).unwrap();

        assert!(telegram.annotations().is_empty());
        let reading = HydroClimaReading::from_store(&store);
        assert_eq!(reading.previous_consumption_hca, None);
        assert_eq!(reading.device_date_time, None);
    }

    #[test]
    fn test_base_offset_shifts_annotations() {
        let payload = [0x02, 0x00, 0x00, 0x00];
        let driver = HydroClimaDriver::new();
        let mut store = FieldStore::new();
        driver.declare_fields(&mut store);

        // Header of 11 bytes, mfct section 4 bytes into the body.
        let mut telegram = Telegram::with_mfct_data(11, 4, payload.to_vec());
        driver.process_telegram(&mut telegram, &mut store).unwrap();

        let annotations = telegram.annotations();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].offset, 15);
        assert_eq!(annotations[1].offset, 17);
    }

    #[test]
    fn test_driver_schema() {
        let driver = HydroClimaDriver::new();
        let info = driver.info();
        assert_eq!(info.name, "hydroclima2");
        assert_eq!(info.meter_type, MeterType::HeatCostAllocation);
        assert_eq!(info.link_modes, &[LinkMode::T1]);
        assert_eq!(
            info.default_fields.join(","),
            "name,id,current_consumption_hca,average_ambient_temperature_c,timestamp"
        );
        assert_eq!(info.detections[0].to_string(), "BMP 08 33");
    }
}

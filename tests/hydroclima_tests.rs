//! Integration tests for the HydroClima payload decoder: the full decode
//! pipeline, truncation behavior over every payload length, annotation
//! content and the malformed date/time rejection.

use hydroclima_rs::util::hex::hex_to_bytes;
use hydroclima_rs::{
    decode_payload, DriverError, FieldStore, HydroClimaDriver, HydroClimaReading, MeterDriver,
    Telegram,
};

/// Complete 16-byte payload: count 2, status 0, device clock
/// 2003-10-02T03:36:10Z, previous 100.0 HCA / 99.99 C, current 200.0 HCA /
/// 29.77 C.
const FULL_PAYLOAD: &str = "0200000064193207E8030F27D007A10B";

#[test]
fn test_full_payload_decodes_every_field() {
    let payload = hex_to_bytes(FULL_PAYLOAD);
    let (reading, annotations) = decode_payload(&payload, 0).unwrap();

    assert_eq!(reading.previous_consumption_hca, Some(100.0));
    assert_eq!(reading.previous_average_ambient_temperature_c, Some(99.99));
    assert_eq!(reading.current_consumption_hca, Some(200.0));
    assert_eq!(reading.average_ambient_temperature_c, Some(29.77));
    assert_eq!(
        reading.device_date_time.as_deref(),
        Some("2003-10-02T03:36:10Z")
    );
    assert_eq!(annotations.len(), 7);
}

#[test]
fn test_truncated_payload_scenario() {
    // The 13-byte prefix ends after the previous-temperature field: the two
    // current-year fields must stay unset, with no annotation past the end.
    let payload = hex_to_bytes("0200000064193207E8030F2710");
    let (reading, annotations) = decode_payload(&payload, 0).unwrap();

    assert_eq!(reading.previous_consumption_hca, Some(100.0));
    assert_eq!(reading.previous_average_ambient_temperature_c, Some(99.99));
    assert_eq!(reading.current_consumption_hca, None);
    assert_eq!(reading.average_ambient_temperature_c, None);
    assert_eq!(
        reading.device_date_time.as_deref(),
        Some("2003-10-02T03:36:10Z")
    );

    let ranges: Vec<(usize, usize)> = annotations.iter().map(|a| (a.offset, a.length)).collect();
    assert_eq!(ranges, vec![(0, 2), (2, 2), (4, 2), (8, 2), (10, 2)]);
}

#[test]
fn test_annotation_descriptions() {
    let payload = hex_to_bytes("0200000064193207E8030F2710");
    let (_, annotations) = decode_payload(&payload, 0).unwrap();

    let descriptions: Vec<&str> = annotations.iter().map(|a| a.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "*** 0200 num measurements 2",
            "*** 0000 status",
            "*** 64193207 device date (2003-10-02T03:36:10Z)",
            "*** E803 (\"previous_consumption_hca\":100.0)",
            "*** 0F27 (\"previous_average_ambient_temperature_c\":99.99)",
        ]
    );
}

#[test]
fn test_every_truncation_length() {
    let payload = hex_to_bytes(FULL_PAYLOAD);

    for len in 0..=payload.len() {
        let (reading, annotations) = decode_payload(&payload[..len], 0).unwrap();

        let expected_annotations = match len {
            0..=1 => 0,
            2..=3 => 1,
            4..=7 => 2,
            8..=9 => 3,
            10..=11 => 4,
            12..=13 => 5,
            14..=15 => 6,
            _ => 7,
        };
        assert_eq!(annotations.len(), expected_annotations, "length {len}");

        // No annotation may cover bytes past the end of the payload.
        for annotation in &annotations {
            assert!(annotation.offset + annotation.length <= len, "length {len}");
        }

        assert_eq!(reading.device_date_time.is_some(), len >= 8, "length {len}");
        assert_eq!(
            reading.previous_consumption_hca.is_some(),
            len >= 10,
            "length {len}"
        );
        assert_eq!(
            reading.previous_average_ambient_temperature_c.is_some(),
            len >= 12,
            "length {len}"
        );
        assert_eq!(
            reading.current_consumption_hca.is_some(),
            len >= 14,
            "length {len}"
        );
        assert_eq!(
            reading.average_ambient_temperature_c.is_some(),
            len >= 16,
            "length {len}"
        );
    }
}

#[test]
fn test_decode_is_idempotent() {
    let payload = hex_to_bytes(FULL_PAYLOAD);

    let first = decode_payload(&payload, 7).unwrap();
    let second = decode_payload(&payload, 7).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_day_of_year_past_year_end_is_rejected() {
    // Day-of-year 367 in year 2003: packed date 0x076F, transmitted low
    // byte first after a zero time field.
    let payload = hex_to_bytes("0200000000006F07");
    let err = decode_payload(&payload, 0).unwrap_err();
    assert!(matches!(err, DriverError::InvalidDate(367)));
}

#[test]
fn test_hour_24_is_rejected() {
    // Packed time 43200 (0xA8C0) reaches hour 24; date is day 1 of 2003.
    let payload = hex_to_bytes("02000000C0A80106");
    let err = decode_payload(&payload, 0).unwrap_err();
    assert!(matches!(
        err,
        DriverError::InvalidTime {
            encoded: 43200,
            hour: 24
        }
    ));
}

#[test]
fn test_fields_before_malformed_date_survive() {
    let driver = HydroClimaDriver::new();
    let mut store = FieldStore::new();
    driver.declare_fields(&mut store);

    let mut telegram = Telegram::with_mfct_data(0, 0, hex_to_bytes("0200000000006F07"));
    let result = driver.process_telegram(&mut telegram, &mut store);
    assert!(result.is_err());

    // The count and status segments were decoded before the failure.
    assert_eq!(telegram.annotations().len(), 2);
    let reading = HydroClimaReading::from_store(&store);
    assert_eq!(reading.device_date_time, None);
    assert_eq!(reading.previous_consumption_hca, None);
}

#[test]
fn test_absent_mfct_section_decodes_nothing() {
    let driver = HydroClimaDriver::new();
    let mut store = FieldStore::new();
    driver.declare_fields(&mut store);

    let mut telegram = Telegram::without_mfct_data(11);
    driver.process_telegram(&mut telegram, &mut store).unwrap();

    assert!(telegram.annotations().is_empty());
    assert_eq!(HydroClimaReading::from_store(&store).device_date_time, None);
}

//! End-to-end pipeline tests: raw frame through gate and normalizer into a
//! sink, using the mock decoder in place of the cryptographic layer.

use std::collections::HashMap;

use victron_core::{
    AdvertisementKey, DeviceGate, MemorySink, MockDecoder, Outcome, RawFrame, RejectReason, Value,
};
use victron_types::record::{AuxMode, BatteryMonitorRecord, SmartLithiumRecord, VeBusRecord};
use victron_types::{DecodedRecord, DeviceClass, DeviceFamily, SensorKey, Unit};

const KEY: &str = "aabbccddeeff00112233445566778899";

/// Instant-readout payload for the given record kind, first encrypted byte
/// matching `KEY`.
fn payload(record_kind: u8) -> Vec<u8> {
    vec![0x10, 0x00, 0xA1, 0x02, record_kind, 0x34, 0x12, 0xAA, 0x5D, 0x3E, 0x71, 0x0C]
}

#[test]
fn battery_monitor_frame_end_to_end() {
    // The reference scenario: soc=87.5 %, current=-2.3 A, no alarm,
    // aux input measuring starter voltage.
    let record = DecodedRecord::BatteryMonitor(BatteryMonitorRecord {
        remaining_minutes: Some(1440.0),
        current: Some(-2.3),
        voltage: Some(12.53),
        soc: Some(87.5),
        consumed_ah: Some(-12.4),
        alarm: None,
        aux_mode: AuxMode::StarterVoltage,
        temperature: None,
        starter_voltage: Some(12.01),
        midpoint_voltage: None,
    });
    let gate = DeviceGate::with_key(
        MockDecoder::new().with_record(record),
        AdvertisementKey::new(KEY),
    );
    let frame = RawFrame::victron(payload(0x02), Some("SmartShunt HQ2231".into()));

    let mut sink = MemorySink::new();
    let outcome = gate.process(&frame, &mut sink);
    assert_eq!(
        outcome,
        Outcome::Published {
            family: DeviceFamily::BatteryMonitor,
            observations: 10,
        }
    );

    assert_eq!(sink.manufacturer.as_deref(), Some("Victron"));
    assert_eq!(sink.device_name, Some(Some("SmartShunt HQ2231".to_string())));
    assert_eq!(sink.device_type.as_deref(), Some("BatteryMonitor"));

    let soc = sink.observation(SensorKey::StateOfCharge).unwrap();
    assert_eq!(soc.value, Value::Numeric(87.5));
    assert_eq!(soc.unit, Some(Unit::Percentage));
    assert_eq!(soc.device_class, Some(DeviceClass::Battery));

    let current = sink.observation(SensorKey::Current).unwrap();
    assert_eq!(current.value, Value::Numeric(-2.3));
    assert_eq!(current.unit, Some(Unit::Ampere));
    assert_eq!(current.device_class, Some(DeviceClass::Current));

    let alarm = sink.observation(SensorKey::Alarm).unwrap();
    assert_eq!(alarm.value, Value::Text("no alarm"));
    assert_eq!(alarm.unit, None);
    assert_eq!(alarm.device_class, None);

    let aux = sink.observation(SensorKey::AuxMode).unwrap();
    assert_eq!(aux.value, Value::Text("starter_voltage"));
}

#[test]
fn smart_lithium_frame_emits_all_seven_cells() {
    let record = DecodedRecord::SmartLithium(SmartLithiumRecord {
        battery_voltage: Some(13.28),
        cell_voltages: [Some(3.32), Some(3.33), Some(3.31), Some(3.32), None, None, None],
        ..Default::default()
    });
    let gate = DeviceGate::with_key(
        MockDecoder::new().with_record(record),
        AdvertisementKey::new(KEY),
    );

    let mut sink = MemorySink::new();
    let outcome = gate.process(&RawFrame::victron(payload(0x05), None), &mut sink);
    assert_eq!(
        outcome,
        Outcome::Published {
            family: DeviceFamily::SmartLithium,
            observations: 10,
        }
    );
    assert_eq!(
        sink.observation(SensorKey::Cell2Voltage).unwrap().value,
        Value::Numeric(3.33)
    );
    assert_eq!(
        sink.observation(SensorKey::Cell7Voltage).unwrap().value,
        Value::None
    );
}

#[test]
fn ve_bus_frame_end_to_end() {
    let record = DecodedRecord::VeBus(VeBusRecord {
        ac_in_power: Some(820.0),
        ac_out_power: Some(760.0),
        battery_voltage: Some(25.9),
        soc: Some(64.0),
        ..Default::default()
    });
    let gate = DeviceGate::with_key(
        MockDecoder::new().with_record(record),
        AdvertisementKey::new(KEY),
    );

    let mut sink = MemorySink::new();
    let outcome = gate.process(&RawFrame::victron(payload(0x0C), None), &mut sink);
    assert_eq!(
        outcome,
        Outcome::Published {
            family: DeviceFamily::VeBus,
            observations: 8,
        }
    );
    assert_eq!(sink.device_type.as_deref(), Some("VEBus"));
    assert_eq!(
        sink.observation(SensorKey::AcInPower).unwrap().value,
        Value::Numeric(820.0)
    );
    // Absent enum states come through as nulls, not errors.
    assert_eq!(
        sink.observation(SensorKey::DeviceState).unwrap().value,
        Value::None
    );
}

#[test]
fn every_family_publishes_through_the_gate() {
    let expected = [
        (DeviceFamily::SolarCharger, 6),
        (DeviceFamily::BatteryMonitor, 10),
        (DeviceFamily::DcDcConverter, 5),
        (DeviceFamily::SmartLithium, 10),
        (DeviceFamily::SmartBatteryProtect, 8),
        (DeviceFamily::VeBus, 8),
        (DeviceFamily::DcEnergyMeter, 7),
    ];

    for (family, count) in expected {
        let gate = DeviceGate::with_key(MockDecoder::new(), AdvertisementKey::new(KEY));
        let mut sink = MemorySink::new();
        let outcome = gate.process(&RawFrame::victron(payload(family as u8), None), &mut sink);
        assert_eq!(
            outcome,
            Outcome::Published {
                family,
                observations: count,
            },
            "family {family}"
        );
        assert_eq!(sink.device_type.as_deref(), Some(family.label()));
    }
}

#[test]
fn wrong_key_still_writes_metadata() {
    let gate = DeviceGate::with_key(
        MockDecoder::new(),
        AdvertisementKey::new("ff000000000000000000000000000000"),
    );
    let frame = RawFrame::victron(payload(0x02), Some("SmartShunt".into()));

    let mut sink = MemorySink::new();
    let outcome = gate.process(&frame, &mut sink);
    assert_eq!(outcome, Outcome::Rejected(RejectReason::KeyMismatch));
    assert_eq!(sink.device_type.as_deref(), Some("BatteryMonitor"));
    assert!(sink.observations.is_empty());
}

#[test]
fn non_victron_traffic_is_invisible() {
    let gate = DeviceGate::with_key(MockDecoder::new(), AdvertisementKey::new(KEY));

    // A frame from a different manufacturer entirely.
    let mut data = HashMap::new();
    data.insert(0x004Cu16, vec![0x02, 0x15, 0x00]);
    let frame = RawFrame::new(data, Some("iBeacon".into()), Some("Apple".into()));

    let mut sink = MemorySink::new();
    assert_eq!(gate.process(&frame, &mut sink), Outcome::Filtered);
    assert!(sink.is_empty());
}

#[test]
fn gate_survives_arbitrary_bytes() {
    let gate = DeviceGate::with_key(MockDecoder::new(), AdvertisementKey::new(KEY));

    // Truncations, random garbage, wrong kinds: all must come back as an
    // Outcome, never a panic.
    let candidates: Vec<Vec<u8>> = vec![
        vec![],
        vec![0x10],
        vec![0x10, 0x00, 0xA1],
        vec![0x10; 7],
        vec![0xFF; 32],
        payload(0x0A),
        payload(0xFF),
        payload(0x02).into_iter().take(9).collect(),
    ];
    for bytes in candidates {
        let mut sink = MemorySink::new();
        let _ = gate.process(&RawFrame::victron(bytes, None), &mut sink);
    }
}

#[test]
fn repeated_frames_yield_identical_observations() {
    let gate = DeviceGate::with_key(MockDecoder::new(), AdvertisementKey::new(KEY));
    let frame = RawFrame::victron(payload(0x0D), None);

    let mut first = MemorySink::new();
    let mut second = MemorySink::new();
    assert!(gate.process(&frame, &mut first).is_published());
    assert!(gate.process(&frame, &mut second).is_published());
    assert_eq!(first.observations, second.observations);
}

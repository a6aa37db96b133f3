//! Platform-agnostic types for Victron BLE telemetry.
//!
//! This crate provides the shared vocabulary used by the victron-core
//! engine and by anything that consumes its observations:
//!
//! - The closed [`DeviceFamily`] set and its record-kind sniffing map
//! - The sensor-key / unit / device-class tag vocabulary
//! - Decoded record shapes for the seven supported families
//! - Status enums with canonical lowercase tokens
//!
//! # Example
//!
//! ```
//! use victron_types::{DeviceFamily, SensorKey, Unit};
//!
//! assert_eq!(DeviceFamily::from_record_kind(0x02), Some(DeviceFamily::BatteryMonitor));
//! assert_eq!(SensorKey::StateOfCharge.as_str(), "state_of_charge");
//! assert_eq!(Unit::AmpereHour.as_str(), "Ah");
//! ```

pub mod ble;
pub mod error;
pub mod family;
pub mod keys;
pub mod record;

pub use error::{ParseError, ParseResult};
pub use family::DeviceFamily;
pub use keys::{DeviceClass, SensorKey, Unit};
pub use record::{
    AcInState, AlarmReason, AuxMode, BalancerStatus, BatteryMonitorRecord, ChargerError,
    DcDcConverterRecord, DcEnergyMeterRecord, DecodedRecord, EnumLabel, MeterType, OffReason,
    OperationMode, OutputState, SmartBatteryProtectRecord, SmartLithiumRecord, SolarChargerRecord,
    VeBusRecord,
};

#[cfg(test)]
mod tests {
    use super::*;

    // --- DeviceFamily tests ---

    #[test]
    fn test_family_from_record_kind() {
        assert_eq!(
            DeviceFamily::from_record_kind(0x01),
            Some(DeviceFamily::SolarCharger)
        );
        assert_eq!(
            DeviceFamily::from_record_kind(0x02),
            Some(DeviceFamily::BatteryMonitor)
        );
        assert_eq!(
            DeviceFamily::from_record_kind(0x04),
            Some(DeviceFamily::DcDcConverter)
        );
        assert_eq!(
            DeviceFamily::from_record_kind(0x05),
            Some(DeviceFamily::SmartLithium)
        );
        assert_eq!(
            DeviceFamily::from_record_kind(0x09),
            Some(DeviceFamily::SmartBatteryProtect)
        );
        assert_eq!(DeviceFamily::from_record_kind(0x0C), Some(DeviceFamily::VeBus));
        assert_eq!(
            DeviceFamily::from_record_kind(0x0D),
            Some(DeviceFamily::DcEnergyMeter)
        );
    }

    #[test]
    fn test_family_unsupported_record_kinds() {
        // Record kinds that exist on air but are outside the supported set:
        // 0x03 inverter, 0x08 AC charger, 0x0A Lynx Smart BMS, 0x0F Orion XS.
        for kind in [0x00, 0x03, 0x06, 0x08, 0x0A, 0x0F, 0xFF] {
            assert_eq!(DeviceFamily::from_record_kind(kind), None, "kind {kind:#04X}");
        }
    }

    #[test]
    fn test_family_try_from() {
        assert_eq!(DeviceFamily::try_from(0x0C), Ok(DeviceFamily::VeBus));
        let err = DeviceFamily::try_from(0x0A).unwrap_err();
        assert!(err.to_string().contains("0x0A"));
    }

    #[test]
    fn test_family_labels() {
        assert_eq!(DeviceFamily::BatteryMonitor.label(), "BatteryMonitor");
        assert_eq!(DeviceFamily::VeBus.label(), "VEBus");
        assert_eq!(DeviceFamily::DcDcConverter.label(), "DcDcConverter");
    }

    #[test]
    fn test_family_repr_matches_record_kind() {
        for family in DeviceFamily::ALL {
            assert_eq!(DeviceFamily::from_record_kind(family as u8), Some(family));
        }
    }

    #[test]
    fn test_family_display() {
        assert_eq!(format!("{}", DeviceFamily::VeBus), "VE.Bus");
        assert_eq!(format!("{}", DeviceFamily::SmartBatteryProtect), "Smart BatteryProtect");
    }

    // --- Vocabulary tests ---

    #[test]
    fn test_sensor_key_tokens() {
        assert_eq!(SensorKey::StateOfCharge.as_str(), "state_of_charge");
        assert_eq!(SensorKey::ConsumedAmpereHours.as_str(), "consumed_ampere_hours");
        assert_eq!(SensorKey::Cell1Voltage.as_str(), "cell_1_voltage");
        assert_eq!(SensorKey::Cell7Voltage.as_str(), "cell_7_voltage");
    }

    #[test]
    fn test_sensor_key_cell_lookup() {
        assert_eq!(SensorKey::cell_voltage(1), Some(SensorKey::Cell1Voltage));
        assert_eq!(SensorKey::cell_voltage(7), Some(SensorKey::Cell7Voltage));
        assert_eq!(SensorKey::cell_voltage(0), None);
        assert_eq!(SensorKey::cell_voltage(8), None);
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(Unit::Ampere.as_str(), "A");
        assert_eq!(Unit::Volt.as_str(), "V");
        assert_eq!(Unit::WattHour.as_str(), "Wh");
        assert_eq!(Unit::Percentage.as_str(), "%");
        assert_eq!(Unit::Watt.as_str(), "W");
        assert_eq!(Unit::Celsius.as_str(), "°C");
        assert_eq!(Unit::Minutes.as_str(), "min");
        assert_eq!(Unit::AmpereHour.as_str(), "Ah");
    }

    #[test]
    fn test_device_class_tokens() {
        assert_eq!(DeviceClass::CurrentFlow.as_str(), "current_flow");
        assert_eq!(DeviceClass::SignalStrength.as_str(), "signal_strength");
        assert_eq!(DeviceClass::Enum.as_str(), "enum");
    }

    // --- Record tests ---

    #[test]
    fn test_record_family_mapping() {
        let record = DecodedRecord::BatteryMonitor(BatteryMonitorRecord::default());
        assert_eq!(record.family(), DeviceFamily::BatteryMonitor);

        let record = DecodedRecord::SmartLithium(SmartLithiumRecord::default());
        assert_eq!(record.family(), DeviceFamily::SmartLithium);

        let record = DecodedRecord::VeBus(VeBusRecord::default());
        assert_eq!(record.family(), DeviceFamily::VeBus);
    }

    #[test]
    fn test_default_records_are_empty() {
        let record = BatteryMonitorRecord::default();
        assert!(record.soc.is_none());
        assert!(record.alarm.is_none());
        assert_eq!(record.aux_mode, AuxMode::Disabled);

        let record = SmartLithiumRecord::default();
        assert_eq!(record.cell_voltages, [None; 7]);
    }

    #[test]
    fn test_enum_labels_are_lowercase() {
        let labels: Vec<&str> = vec![
            AlarmReason::LowStarterVoltage.label(),
            OperationMode::EqualizeManual.label(),
            ChargerError::TemperatureBatteryHigh.label(),
            AuxMode::StarterVoltage.label(),
            OffReason::AnalysingInputVoltage.label(),
            OutputState::On.label(),
            MeterType::ShaftGenerator.label(),
            BalancerStatus::Imbalance.label(),
            AcInState::AcIn1.label(),
        ];
        for label in labels {
            assert_eq!(label, label.to_lowercase());
        }
    }

    #[test]
    fn test_enum_label_tokens() {
        assert_eq!(AlarmReason::LowVAcOut.label(), "low_v_ac_out");
        assert_eq!(OperationMode::ExternalControl.label(), "external_control");
        assert_eq!(AuxMode::MidpointVoltage.label(), "midpoint_voltage");
        assert_eq!(MeterType::DcDcCharger.label(), "dc_dc_charger");
        assert_eq!(AcInState::NotConnected.label(), "not_connected");
        assert_eq!(BalancerStatus::Unknown.label(), "unknown");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(format!("{}", OperationMode::Bulk), "bulk");
        assert_eq!(format!("{}", AlarmReason::HighVoltage), "high_voltage");
    }

    // --- Serialization tests ---

    #[test]
    fn test_record_serialization_roundtrip() {
        let record = DecodedRecord::SolarCharger(SolarChargerRecord {
            charge_state: Some(OperationMode::Bulk),
            battery_voltage: Some(13.2),
            battery_current: Some(4.5),
            yield_today: Some(120.0),
            solar_power: Some(60.0),
            external_device_load: None,
        });

        let json = serde_json::to_string(&record).unwrap();
        let back: DecodedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_family_serialization() {
        assert_eq!(
            serde_json::to_string(&DeviceFamily::BatteryMonitor).unwrap(),
            "\"BatteryMonitor\""
        );
    }
}

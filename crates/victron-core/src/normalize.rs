//! Projection of decoded records onto the observation vocabulary.
//!
//! One fixed extraction table per device family, dispatched by a single
//! match on the record union. [`normalize`] is a pure function: it returns
//! the full ordered observation sequence for one record and keeps no state,
//! so calling it twice on the same record yields identical output.
//!
//! Enumerated fields all flow through [`enum_token`]. The per-field default
//! policy is explicit there: only the battery monitor's and the DC energy
//! meter's alarm fields substitute `"no alarm"` for an empty alarm set; the
//! BatteryProtect's alarm — and every other optional enum — normalizes
//! absence to [`Value::None`]. That asymmetry is inherited device behavior
//! and is covered by tests; do not "fix" it here.

use victron_types::record::{
    BatteryMonitorRecord, DcDcConverterRecord, DcEnergyMeterRecord, SmartBatteryProtectRecord,
    SmartLithiumRecord, SolarChargerRecord, VeBusRecord,
};
use victron_types::{DecodedRecord, DeviceClass, EnumLabel, SensorKey, Unit};

use crate::observation::{Observation, Value};

/// Token emitted for an always-present alarm field whose alarm set is
/// empty.
pub const NO_ALARM: &str = "no alarm";

/// Normalize one decoded record into its family's observation sequence.
#[must_use]
pub fn normalize(record: &DecodedRecord) -> Vec<Observation> {
    match record {
        DecodedRecord::BatteryMonitor(r) => battery_monitor(r),
        DecodedRecord::DcDcConverter(r) => dc_dc_converter(r),
        DecodedRecord::DcEnergyMeter(r) => dc_energy_meter(r),
        DecodedRecord::SmartBatteryProtect(r) => smart_battery_protect(r),
        DecodedRecord::SmartLithium(r) => smart_lithium(r),
        DecodedRecord::SolarCharger(r) => solar_charger(r),
        DecodedRecord::VeBus(r) => ve_bus(r),
    }
}

/// Normalize an enumerated field value.
///
/// Present values become their canonical lowercase token. Absent values
/// become `default_on_empty` when the field defines one, else
/// [`Value::None`]. A label of `"unknown"` is the wire's way of saying
/// "no information" and is treated as absence.
fn enum_token<E: EnumLabel>(value: Option<E>, default_on_empty: Option<&'static str>) -> Value {
    match value.map(|v| v.label()) {
        Some(label) if label != "unknown" => Value::Text(label),
        _ => match default_on_empty {
            Some(default) => Value::Text(default),
            None => Value::None,
        },
    }
}

fn numeric(
    key: SensorKey,
    unit: Unit,
    value: Option<f32>,
    device_class: DeviceClass,
) -> Observation {
    Observation::new(key, Some(unit), Value::from(value), Some(device_class))
}

fn enumerated(key: SensorKey, value: Value) -> Observation {
    Observation::new(key, None, value, None)
}

fn battery_monitor(r: &BatteryMonitorRecord) -> Vec<Observation> {
    vec![
        numeric(
            SensorKey::RemainingMinutes,
            Unit::Minutes,
            r.remaining_minutes,
            DeviceClass::Duration,
        ),
        numeric(SensorKey::Current, Unit::Ampere, r.current, DeviceClass::Current),
        numeric(SensorKey::Voltage, Unit::Volt, r.voltage, DeviceClass::Voltage),
        numeric(
            SensorKey::StateOfCharge,
            Unit::Percentage,
            r.soc,
            DeviceClass::Battery,
        ),
        numeric(
            SensorKey::ConsumedAmpereHours,
            Unit::AmpereHour,
            r.consumed_ah,
            DeviceClass::CurrentFlow,
        ),
        enumerated(SensorKey::Alarm, enum_token(r.alarm, Some(NO_ALARM))),
        enumerated(SensorKey::AuxMode, enum_token(Some(r.aux_mode), None)),
        numeric(
            SensorKey::Temperature,
            Unit::Celsius,
            r.temperature,
            DeviceClass::Temperature,
        ),
        numeric(
            SensorKey::StarterVoltage,
            Unit::Volt,
            r.starter_voltage,
            DeviceClass::Voltage,
        ),
        numeric(
            SensorKey::MidpointVoltage,
            Unit::Volt,
            r.midpoint_voltage,
            DeviceClass::Voltage,
        ),
    ]
}

fn dc_dc_converter(r: &DcDcConverterRecord) -> Vec<Observation> {
    vec![
        enumerated(SensorKey::ChargeState, enum_token(r.charge_state, None)),
        enumerated(SensorKey::ChargerError, enum_token(r.charger_error, None)),
        numeric(
            SensorKey::InputVoltage,
            Unit::Volt,
            r.input_voltage,
            DeviceClass::Voltage,
        ),
        enumerated(SensorKey::OffReason, enum_token(r.off_reason, None)),
        numeric(
            SensorKey::OutputVoltage,
            Unit::Volt,
            r.output_voltage,
            DeviceClass::Voltage,
        ),
    ]
}

fn dc_energy_meter(r: &DcEnergyMeterRecord) -> Vec<Observation> {
    vec![
        enumerated(SensorKey::MeterType, enum_token(r.meter_type, None)),
        numeric(SensorKey::Current, Unit::Ampere, r.current, DeviceClass::Current),
        numeric(SensorKey::Voltage, Unit::Volt, r.voltage, DeviceClass::Voltage),
        enumerated(SensorKey::Alarm, enum_token(r.alarm, Some(NO_ALARM))),
        numeric(
            SensorKey::Temperature,
            Unit::Celsius,
            r.temperature,
            DeviceClass::Temperature,
        ),
        enumerated(SensorKey::AuxMode, enum_token(Some(r.aux_mode), None)),
        numeric(
            SensorKey::StarterVoltage,
            Unit::Volt,
            r.starter_voltage,
            DeviceClass::Voltage,
        ),
    ]
}

fn smart_battery_protect(r: &SmartBatteryProtectRecord) -> Vec<Observation> {
    vec![
        enumerated(SensorKey::DeviceState, enum_token(r.device_state, None)),
        enumerated(SensorKey::OutputState, enum_token(r.output_state, None)),
        enumerated(SensorKey::ErrorCode, enum_token(r.error_code, None)),
        // No "no alarm" default here, unlike the battery monitor.
        enumerated(SensorKey::Alarm, enum_token(r.alarm, None)),
        enumerated(SensorKey::Warning, enum_token(r.warning, None)),
        enumerated(SensorKey::OffReason, enum_token(r.off_reason, None)),
        numeric(
            SensorKey::InputVoltage,
            Unit::Volt,
            r.input_voltage,
            DeviceClass::Voltage,
        ),
        numeric(
            SensorKey::OutputVoltage,
            Unit::Volt,
            r.output_voltage,
            DeviceClass::Voltage,
        ),
    ]
}

fn smart_lithium(r: &SmartLithiumRecord) -> Vec<Observation> {
    let mut observations = vec![
        numeric(
            SensorKey::BatteryVoltage,
            Unit::Volt,
            r.battery_voltage,
            DeviceClass::Voltage,
        ),
        numeric(
            SensorKey::BatteryTemperature,
            Unit::Celsius,
            r.battery_temperature,
            DeviceClass::Temperature,
        ),
        enumerated(SensorKey::BalancerStatus, enum_token(r.balancer_status, None)),
    ];
    // Always all seven, in pack order, regardless of physical cell count.
    const CELL_KEYS: [SensorKey; 7] = [
        SensorKey::Cell1Voltage,
        SensorKey::Cell2Voltage,
        SensorKey::Cell3Voltage,
        SensorKey::Cell4Voltage,
        SensorKey::Cell5Voltage,
        SensorKey::Cell6Voltage,
        SensorKey::Cell7Voltage,
    ];
    for (key, cell) in CELL_KEYS.into_iter().zip(r.cell_voltages) {
        observations.push(numeric(key, Unit::Volt, cell, DeviceClass::Voltage));
    }
    observations
}

fn solar_charger(r: &SolarChargerRecord) -> Vec<Observation> {
    vec![
        enumerated(SensorKey::ChargeState, enum_token(r.charge_state, None)),
        numeric(
            SensorKey::BatteryVoltage,
            Unit::Volt,
            r.battery_voltage,
            DeviceClass::Voltage,
        ),
        numeric(
            SensorKey::BatteryCurrent,
            Unit::Ampere,
            r.battery_current,
            DeviceClass::Current,
        ),
        numeric(
            SensorKey::YieldToday,
            Unit::WattHour,
            r.yield_today,
            DeviceClass::Energy,
        ),
        numeric(SensorKey::SolarPower, Unit::Watt, r.solar_power, DeviceClass::Power),
        numeric(
            SensorKey::ExternalDeviceLoad,
            Unit::Ampere,
            r.external_device_load,
            DeviceClass::Current,
        ),
    ]
}

fn ve_bus(r: &VeBusRecord) -> Vec<Observation> {
    vec![
        enumerated(SensorKey::DeviceState, enum_token(r.device_state, None)),
        enumerated(SensorKey::AcInState, enum_token(r.ac_in_state, None)),
        numeric(SensorKey::AcInPower, Unit::Watt, r.ac_in_power, DeviceClass::Power),
        numeric(SensorKey::AcOutPower, Unit::Watt, r.ac_out_power, DeviceClass::Power),
        numeric(
            SensorKey::BatteryCurrent,
            Unit::Ampere,
            r.battery_current,
            DeviceClass::Current,
        ),
        numeric(
            SensorKey::BatteryVoltage,
            Unit::Volt,
            r.battery_voltage,
            DeviceClass::Voltage,
        ),
        numeric(
            SensorKey::BatteryTemperature,
            Unit::Celsius,
            r.battery_temperature,
            DeviceClass::Temperature,
        ),
        numeric(
            SensorKey::StateOfCharge,
            Unit::Percentage,
            r.soc,
            DeviceClass::Battery,
        ),
    ]
}

//! Decoded instant-readout records, one shape per device family.
//!
//! These are the typed records a decoder produces after decrypting an
//! instant-readout payload. Every field is an accessor the normalizer
//! projects onto the observation vocabulary in [`crate::keys`]. Absent
//! fields are `None`; the records never use sentinel numeric values.
//!
//! Enumerated fields use the status enums at the bottom of this module.
//! Zero-valued "no alarm"/"no error"/"no reason" wire values are not
//! modeled as variants: a decoder reports them as `None`.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::family::DeviceFamily;

/// A decoded telemetry record from one advertisement frame.
///
/// Tagged by device family; exactly one extraction table applies to each
/// variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecodedRecord {
    BatteryMonitor(BatteryMonitorRecord),
    DcDcConverter(DcDcConverterRecord),
    DcEnergyMeter(DcEnergyMeterRecord),
    SmartBatteryProtect(SmartBatteryProtectRecord),
    SmartLithium(SmartLithiumRecord),
    SolarCharger(SolarChargerRecord),
    VeBus(VeBusRecord),
}

impl DecodedRecord {
    /// The family whose extraction table applies to this record.
    #[must_use]
    pub fn family(&self) -> DeviceFamily {
        match self {
            DecodedRecord::BatteryMonitor(_) => DeviceFamily::BatteryMonitor,
            DecodedRecord::DcDcConverter(_) => DeviceFamily::DcDcConverter,
            DecodedRecord::DcEnergyMeter(_) => DeviceFamily::DcEnergyMeter,
            DecodedRecord::SmartBatteryProtect(_) => DeviceFamily::SmartBatteryProtect,
            DecodedRecord::SmartLithium(_) => DeviceFamily::SmartLithium,
            DecodedRecord::SolarCharger(_) => DeviceFamily::SolarCharger,
            DecodedRecord::VeBus(_) => DeviceFamily::VeBus,
        }
    }
}

/// SmartShunt / BMV battery monitor readout.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatteryMonitorRecord {
    /// Runtime left at present consumption, in minutes.
    pub remaining_minutes: Option<f32>,
    /// Main battery current in A (negative = discharge).
    pub current: Option<f32>,
    /// Main battery voltage in V.
    pub voltage: Option<f32>,
    /// State of charge, 0-100 %.
    pub soc: Option<f32>,
    /// Consumed charge in Ah.
    pub consumed_ah: Option<f32>,
    /// Active alarm, if any.
    pub alarm: Option<AlarmReason>,
    /// Configured function of the aux input. Always present on the wire.
    pub aux_mode: AuxMode,
    /// Aux temperature in °C (aux input in temperature mode).
    pub temperature: Option<f32>,
    /// Starter battery voltage in V (aux input in starter mode).
    pub starter_voltage: Option<f32>,
    /// Bank midpoint voltage in V (aux input in midpoint mode).
    pub midpoint_voltage: Option<f32>,
}

/// Orion Smart DC/DC converter readout.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcDcConverterRecord {
    pub charge_state: Option<OperationMode>,
    pub charger_error: Option<ChargerError>,
    /// Input voltage in V.
    pub input_voltage: Option<f32>,
    /// Why the output is off, when it is.
    pub off_reason: Option<OffReason>,
    /// Output voltage in V.
    pub output_voltage: Option<f32>,
}

/// SmartShunt in DC energy-meter mode.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcEnergyMeterRecord {
    /// What kind of source or load is being metered.
    pub meter_type: Option<MeterType>,
    /// Current in A.
    pub current: Option<f32>,
    /// Voltage in V.
    pub voltage: Option<f32>,
    pub alarm: Option<AlarmReason>,
    /// Aux temperature in °C.
    pub temperature: Option<f32>,
    /// Configured function of the aux input. Always present on the wire.
    pub aux_mode: AuxMode,
    /// Starter battery voltage in V.
    pub starter_voltage: Option<f32>,
}

/// Smart BatteryProtect low-voltage disconnect readout.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmartBatteryProtectRecord {
    pub device_state: Option<OperationMode>,
    pub output_state: Option<OutputState>,
    pub error_code: Option<ChargerError>,
    pub alarm: Option<AlarmReason>,
    pub warning: Option<AlarmReason>,
    pub off_reason: Option<OffReason>,
    /// Input voltage in V.
    pub input_voltage: Option<f32>,
    /// Output voltage in V.
    pub output_voltage: Option<f32>,
}

/// Smart Lithium battery readout.
///
/// The cell array is always seven entries, indexed in pack order; packs
/// with fewer physical cells report `None` in the trailing slots. Keeping
/// the array fixed is part of the decoder contract.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmartLithiumRecord {
    /// Pack voltage in V.
    pub battery_voltage: Option<f32>,
    /// Pack temperature in °C.
    pub battery_temperature: Option<f32>,
    pub balancer_status: Option<BalancerStatus>,
    /// Per-cell voltages in V, cells 1..=7.
    pub cell_voltages: [Option<f32>; 7],
}

/// SmartSolar / BlueSolar MPPT charger readout.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarChargerRecord {
    pub charge_state: Option<OperationMode>,
    /// Battery voltage in V.
    pub battery_voltage: Option<f32>,
    /// Battery charging current in A.
    pub battery_current: Option<f32>,
    /// Energy harvested today in Wh.
    pub yield_today: Option<f32>,
    /// Present PV power in W.
    pub solar_power: Option<f32>,
    /// Load output current in A, on models with a load output.
    pub external_device_load: Option<f32>,
}

/// VE.Bus inverter/charger readout.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VeBusRecord {
    pub device_state: Option<OperationMode>,
    pub ac_in_state: Option<AcInState>,
    /// AC input power in W.
    pub ac_in_power: Option<f32>,
    /// AC output power in W.
    pub ac_out_power: Option<f32>,
    /// Battery current in A.
    pub battery_current: Option<f32>,
    /// Battery voltage in V.
    pub battery_voltage: Option<f32>,
    /// Battery temperature in °C.
    pub battery_temperature: Option<f32>,
    /// State of charge, 0-100 %.
    pub soc: Option<f32>,
}

/// A status enum whose canonical lowercase token can be emitted as an
/// observation value.
pub trait EnumLabel {
    /// The canonical lowercase token for this value.
    fn label(&self) -> &'static str;
}

/// Alarm and warning conditions reported by battery monitors, energy
/// meters, and BatteryProtect devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u16)]
pub enum AlarmReason {
    LowVoltage = 0x0001,
    HighVoltage = 0x0002,
    LowSoc = 0x0004,
    LowStarterVoltage = 0x0008,
    HighStarterVoltage = 0x0010,
    LowTemperature = 0x0020,
    HighTemperature = 0x0040,
    MidVoltage = 0x0080,
    Overload = 0x0100,
    DcRipple = 0x0200,
    LowVAcOut = 0x0400,
    HighVAcOut = 0x0800,
    ShortCircuit = 0x1000,
    BmsLockout = 0x2000,
}

impl EnumLabel for AlarmReason {
    fn label(&self) -> &'static str {
        match self {
            AlarmReason::LowVoltage => "low_voltage",
            AlarmReason::HighVoltage => "high_voltage",
            AlarmReason::LowSoc => "low_soc",
            AlarmReason::LowStarterVoltage => "low_starter_voltage",
            AlarmReason::HighStarterVoltage => "high_starter_voltage",
            AlarmReason::LowTemperature => "low_temperature",
            AlarmReason::HighTemperature => "high_temperature",
            AlarmReason::MidVoltage => "mid_voltage",
            AlarmReason::Overload => "overload",
            AlarmReason::DcRipple => "dc_ripple",
            AlarmReason::LowVAcOut => "low_v_ac_out",
            AlarmReason::HighVAcOut => "high_v_ac_out",
            AlarmReason::ShortCircuit => "short_circuit",
            AlarmReason::BmsLockout => "bms_lockout",
        }
    }
}

/// Charger / converter operating state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum OperationMode {
    Off = 0,
    LowPower = 1,
    Fault = 2,
    Bulk = 3,
    Absorption = 4,
    Float = 5,
    Storage = 6,
    EqualizeManual = 7,
    Inverting = 9,
    PowerSupply = 11,
    StartingUp = 245,
    RepeatedAbsorption = 246,
    Recondition = 247,
    BatterySafe = 248,
    ExternalControl = 252,
}

impl EnumLabel for OperationMode {
    fn label(&self) -> &'static str {
        match self {
            OperationMode::Off => "off",
            OperationMode::LowPower => "low_power",
            OperationMode::Fault => "fault",
            OperationMode::Bulk => "bulk",
            OperationMode::Absorption => "absorption",
            OperationMode::Float => "float",
            OperationMode::Storage => "storage",
            OperationMode::EqualizeManual => "equalize_manual",
            OperationMode::Inverting => "inverting",
            OperationMode::PowerSupply => "power_supply",
            OperationMode::StartingUp => "starting_up",
            OperationMode::RepeatedAbsorption => "repeated_absorption",
            OperationMode::Recondition => "recondition",
            OperationMode::BatterySafe => "battery_safe",
            OperationMode::ExternalControl => "external_control",
        }
    }
}

/// Charger error codes, shared by solar chargers, DC/DC converters, and
/// BatteryProtect error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ChargerError {
    TemperatureBatteryHigh = 1,
    VoltageHigh = 2,
    RemoteTemperatureA = 3,
    RemoteTemperatureB = 4,
    RemoteTemperatureC = 5,
    RemoteBatteryA = 6,
    RemoteBatteryB = 7,
    RemoteBatteryC = 8,
    HighRipple = 11,
    TemperatureBatteryLow = 14,
    TemperatureCharger = 17,
    OverCurrent = 18,
    BulkTime = 20,
    CurrentSensor = 21,
    InternalTemperatureA = 22,
    InternalTemperatureB = 23,
    Fan = 24,
    Overheated = 26,
    ShortCircuit = 27,
    ConverterIssue = 28,
    OverCharge = 29,
    InputVoltage = 33,
    InputCurrent = 34,
    InputPower = 35,
    InputShutdownVoltage = 38,
    InputShutdownCurrent = 39,
    InputShutdownFailure = 40,
    CalibrationLost = 116,
    SettingsLost = 119,
    TesterFail = 121,
    InternalDcVoltageA = 200,
    InternalDcVoltageB = 201,
    SelfTest = 202,
    InternalSupplyA = 203,
    InternalSupplyB = 205,
    InternalSupplyC = 212,
    InternalSupplyD = 215,
}

impl EnumLabel for ChargerError {
    fn label(&self) -> &'static str {
        match self {
            ChargerError::TemperatureBatteryHigh => "temperature_battery_high",
            ChargerError::VoltageHigh => "voltage_high",
            ChargerError::RemoteTemperatureA => "remote_temperature_a",
            ChargerError::RemoteTemperatureB => "remote_temperature_b",
            ChargerError::RemoteTemperatureC => "remote_temperature_c",
            ChargerError::RemoteBatteryA => "remote_battery_a",
            ChargerError::RemoteBatteryB => "remote_battery_b",
            ChargerError::RemoteBatteryC => "remote_battery_c",
            ChargerError::HighRipple => "high_ripple",
            ChargerError::TemperatureBatteryLow => "temperature_battery_low",
            ChargerError::TemperatureCharger => "temperature_charger",
            ChargerError::OverCurrent => "over_current",
            ChargerError::BulkTime => "bulk_time",
            ChargerError::CurrentSensor => "current_sensor",
            ChargerError::InternalTemperatureA => "internal_temperature_a",
            ChargerError::InternalTemperatureB => "internal_temperature_b",
            ChargerError::Fan => "fan",
            ChargerError::Overheated => "overheated",
            ChargerError::ShortCircuit => "short_circuit",
            ChargerError::ConverterIssue => "converter_issue",
            ChargerError::OverCharge => "over_charge",
            ChargerError::InputVoltage => "input_voltage",
            ChargerError::InputCurrent => "input_current",
            ChargerError::InputPower => "input_power",
            ChargerError::InputShutdownVoltage => "input_shutdown_voltage",
            ChargerError::InputShutdownCurrent => "input_shutdown_current",
            ChargerError::InputShutdownFailure => "input_shutdown_failure",
            ChargerError::CalibrationLost => "calibration_lost",
            ChargerError::SettingsLost => "settings_lost",
            ChargerError::TesterFail => "tester_fail",
            ChargerError::InternalDcVoltageA => "internal_dc_voltage_a",
            ChargerError::InternalDcVoltageB => "internal_dc_voltage_b",
            ChargerError::SelfTest => "self_test",
            ChargerError::InternalSupplyA => "internal_supply_a",
            ChargerError::InternalSupplyB => "internal_supply_b",
            ChargerError::InternalSupplyC => "internal_supply_c",
            ChargerError::InternalSupplyD => "internal_supply_d",
        }
    }
}

/// Configured function of a battery monitor's aux input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum AuxMode {
    StarterVoltage = 0,
    MidpointVoltage = 1,
    Temperature = 2,
    #[default]
    Disabled = 3,
}

impl EnumLabel for AuxMode {
    fn label(&self) -> &'static str {
        match self {
            AuxMode::StarterVoltage => "starter_voltage",
            AuxMode::MidpointVoltage => "midpoint_voltage",
            AuxMode::Temperature => "temperature",
            AuxMode::Disabled => "disabled",
        }
    }
}

/// Why a converter or BatteryProtect output is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum OffReason {
    NoInputPower = 0x0000_0001,
    SwitchedOffPowerSwitch = 0x0000_0002,
    SwitchedOffRegister = 0x0000_0004,
    RemoteInput = 0x0000_0008,
    ProtectionActive = 0x0000_0010,
    Paygo = 0x0000_0020,
    Bms = 0x0000_0040,
    EngineShutdownDetection = 0x0000_0080,
    AnalysingInputVoltage = 0x0000_0100,
}

impl EnumLabel for OffReason {
    fn label(&self) -> &'static str {
        match self {
            OffReason::NoInputPower => "no_input_power",
            OffReason::SwitchedOffPowerSwitch => "switched_off_power_switch",
            OffReason::SwitchedOffRegister => "switched_off_register",
            OffReason::RemoteInput => "remote_input",
            OffReason::ProtectionActive => "protection_active",
            OffReason::Paygo => "paygo",
            OffReason::Bms => "bms",
            OffReason::EngineShutdownDetection => "engine_shutdown_detection",
            OffReason::AnalysingInputVoltage => "analysing_input_voltage",
        }
    }
}

/// BatteryProtect output relay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum OutputState {
    Off = 0,
    On = 1,
}

impl EnumLabel for OutputState {
    fn label(&self) -> &'static str {
        match self {
            OutputState::Off => "off",
            OutputState::On => "on",
        }
    }
}

/// Kind of source or load a DC energy meter is attached to.
///
/// Negative discriminants are sources, positive are loads, matching the
/// signed byte on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i8)]
pub enum MeterType {
    SolarCharger = -9,
    WindCharger = -8,
    ShaftGenerator = -7,
    Alternator = -6,
    FuelCell = -5,
    WaterGenerator = -4,
    DcDcCharger = -3,
    AcCharger = -2,
    GenericSource = -1,
    GenericLoad = 1,
    ElectricDrive = 2,
    Fridge = 3,
    WaterPump = 4,
    BilgePump = 5,
    DcSystem = 6,
    Inverter = 7,
    WaterHeater = 8,
}

impl EnumLabel for MeterType {
    fn label(&self) -> &'static str {
        match self {
            MeterType::SolarCharger => "solar_charger",
            MeterType::WindCharger => "wind_charger",
            MeterType::ShaftGenerator => "shaft_generator",
            MeterType::Alternator => "alternator",
            MeterType::FuelCell => "fuel_cell",
            MeterType::WaterGenerator => "water_generator",
            MeterType::DcDcCharger => "dc_dc_charger",
            MeterType::AcCharger => "ac_charger",
            MeterType::GenericSource => "generic_source",
            MeterType::GenericLoad => "generic_load",
            MeterType::ElectricDrive => "electric_drive",
            MeterType::Fridge => "fridge",
            MeterType::WaterPump => "water_pump",
            MeterType::BilgePump => "bilge_pump",
            MeterType::DcSystem => "dc_system",
            MeterType::Inverter => "inverter",
            MeterType::WaterHeater => "water_heater",
        }
    }
}

/// Smart Lithium cell balancer status.
///
/// `Unknown` is a real wire value; the normalizer treats it as absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum BalancerStatus {
    Unknown = 0,
    Balanced = 1,
    Balancing = 2,
    Imbalance = 3,
}

impl EnumLabel for BalancerStatus {
    fn label(&self) -> &'static str {
        match self {
            BalancerStatus::Unknown => "unknown",
            BalancerStatus::Balanced => "balanced",
            BalancerStatus::Balancing => "balancing",
            BalancerStatus::Imbalance => "imbalance",
        }
    }
}

/// Which AC input a VE.Bus system is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum AcInState {
    AcIn1 = 0,
    AcIn2 = 1,
    NotConnected = 2,
}

impl EnumLabel for AcInState {
    fn label(&self) -> &'static str {
        match self {
            AcInState::AcIn1 => "ac_in_1",
            AcInState::AcIn2 => "ac_in_2",
            AcInState::NotConnected => "not_connected",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),* $(,)?) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(
    AlarmReason,
    OperationMode,
    ChargerError,
    AuxMode,
    OffReason,
    OutputState,
    MeterType,
    BalancerStatus,
    AcInState,
);

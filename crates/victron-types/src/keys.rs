//! The tag vocabulary used to route observations to the sensor sink.
//!
//! These three enumerations are fixed, versioned data: a semantic key per
//! field the seven device families can report, the unit symbols attached to
//! numeric fields, and the device classes the home-automation platform uses
//! for display and statistics.
//!
//! **Note:** serde serialization uses the variant names; the wire tokens the
//! sink expects come from the `as_str()` methods.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Semantic identifier of a single telemetry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorKey {
    AcInPower,
    AcInState,
    AcOutPower,
    /// Defined in the vocabulary for completeness; no supported family
    /// currently emits it.
    AcOutState,
    Alarm,
    AuxMode,
    BalancerStatus,
    BatteryCurrent,
    BatteryTemperature,
    BatteryVoltage,
    Cell1Voltage,
    Cell2Voltage,
    Cell3Voltage,
    Cell4Voltage,
    Cell5Voltage,
    Cell6Voltage,
    Cell7Voltage,
    ChargeState,
    ChargerError,
    ConsumedAmpereHours,
    Current,
    DeviceState,
    ErrorCode,
    ExternalDeviceLoad,
    InputVoltage,
    MeterType,
    MidpointVoltage,
    OffReason,
    OutputState,
    OutputVoltage,
    RemainingMinutes,
    SolarPower,
    StarterVoltage,
    StateOfCharge,
    Temperature,
    Voltage,
    Warning,
    YieldToday,
}

impl SensorKey {
    /// The snake_case token used by the sink.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKey::AcInPower => "ac_in_power",
            SensorKey::AcInState => "ac_in_state",
            SensorKey::AcOutPower => "ac_out_power",
            SensorKey::AcOutState => "ac_out_state",
            SensorKey::Alarm => "alarm",
            SensorKey::AuxMode => "aux_mode",
            SensorKey::BalancerStatus => "balancer_status",
            SensorKey::BatteryCurrent => "battery_current",
            SensorKey::BatteryTemperature => "battery_temperature",
            SensorKey::BatteryVoltage => "battery_voltage",
            SensorKey::Cell1Voltage => "cell_1_voltage",
            SensorKey::Cell2Voltage => "cell_2_voltage",
            SensorKey::Cell3Voltage => "cell_3_voltage",
            SensorKey::Cell4Voltage => "cell_4_voltage",
            SensorKey::Cell5Voltage => "cell_5_voltage",
            SensorKey::Cell6Voltage => "cell_6_voltage",
            SensorKey::Cell7Voltage => "cell_7_voltage",
            SensorKey::ChargeState => "charge_state",
            SensorKey::ChargerError => "charger_error",
            SensorKey::ConsumedAmpereHours => "consumed_ampere_hours",
            SensorKey::Current => "current",
            SensorKey::DeviceState => "device_state",
            SensorKey::ErrorCode => "error_code",
            SensorKey::ExternalDeviceLoad => "external_device_load",
            SensorKey::InputVoltage => "input_voltage",
            SensorKey::MeterType => "meter_type",
            SensorKey::MidpointVoltage => "midpoint_voltage",
            SensorKey::OffReason => "off_reason",
            SensorKey::OutputState => "output_state",
            SensorKey::OutputVoltage => "output_voltage",
            SensorKey::RemainingMinutes => "remaining_minutes",
            SensorKey::SolarPower => "solar_power",
            SensorKey::StarterVoltage => "starter_voltage",
            SensorKey::StateOfCharge => "state_of_charge",
            SensorKey::Temperature => "temperature",
            SensorKey::Voltage => "voltage",
            SensorKey::Warning => "warning",
            SensorKey::YieldToday => "yield_today",
        }
    }

    /// Look up the cell-voltage key for a 1-based cell index (1..=7).
    #[must_use]
    pub fn cell_voltage(index: usize) -> Option<Self> {
        match index {
            1 => Some(SensorKey::Cell1Voltage),
            2 => Some(SensorKey::Cell2Voltage),
            3 => Some(SensorKey::Cell3Voltage),
            4 => Some(SensorKey::Cell4Voltage),
            5 => Some(SensorKey::Cell5Voltage),
            6 => Some(SensorKey::Cell6Voltage),
            7 => Some(SensorKey::Cell7Voltage),
            _ => None,
        }
    }
}

impl fmt::Display for SensorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of measurement attached to a numeric observation.
///
/// Units are metadata tags only; the normalizer performs no conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Unit {
    Ampere,
    Volt,
    WattHour,
    Percentage,
    Watt,
    Celsius,
    Minutes,
    AmpereHour,
}

impl Unit {
    /// The unit symbol the sink expects.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Ampere => "A",
            Unit::Volt => "V",
            Unit::WattHour => "Wh",
            Unit::Percentage => "%",
            Unit::Watt => "W",
            Unit::Celsius => "°C",
            Unit::Minutes => "min",
            Unit::AmpereHour => "Ah",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device class routing hint for the home-automation platform.
///
/// `CurrentFlow` and `Enum` are Victron-specific extensions of the
/// platform's stock class set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceClass {
    Battery,
    Current,
    CurrentFlow,
    Duration,
    Energy,
    Power,
    SignalStrength,
    Temperature,
    Voltage,
    Enum,
}

impl DeviceClass {
    /// The snake_case token the sink expects.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Battery => "battery",
            DeviceClass::Current => "current",
            DeviceClass::CurrentFlow => "current_flow",
            DeviceClass::Duration => "duration",
            DeviceClass::Energy => "energy",
            DeviceClass::Power => "power",
            DeviceClass::SignalStrength => "signal_strength",
            DeviceClass::Temperature => "temperature",
            DeviceClass::Voltage => "voltage",
            DeviceClass::Enum => "enum",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Device family identification for Victron instant-readout records.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Product family of a Victron device, as declared by the record-kind byte
/// of its instant-readout advertisement.
///
/// This is a closed set: these are the seven families whose decrypted field
/// layouts the normalizer understands. Victron broadcasts further record
/// kinds (inverters, AC chargers, Lynx Smart BMS, Orion XS); those are
/// rejected at detection time rather than half-decoded.
///
/// The discriminant of each variant is its on-air record-kind byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum DeviceFamily {
    /// SmartSolar / BlueSolar MPPT charger.
    SolarCharger = 0x01,
    /// SmartShunt / BMV battery monitor.
    BatteryMonitor = 0x02,
    /// Orion Smart DC/DC converter.
    DcDcConverter = 0x04,
    /// Smart Lithium battery.
    SmartLithium = 0x05,
    /// Smart BatteryProtect low-voltage disconnect.
    SmartBatteryProtect = 0x09,
    /// VE.Bus inverter/charger (MultiPlus, Quattro).
    VeBus = 0x0C,
    /// SmartShunt configured as a DC energy meter.
    DcEnergyMeter = 0x0D,
}

impl DeviceFamily {
    /// Map an on-air record-kind byte to a supported family.
    ///
    /// Returns `None` for record kinds that exist in the Victron protocol
    /// but are not part of this set (e.g. 0x03 inverter, 0x08 AC charger,
    /// 0x0A Lynx Smart BMS).
    ///
    /// # Examples
    ///
    /// ```
    /// use victron_types::DeviceFamily;
    ///
    /// assert_eq!(DeviceFamily::from_record_kind(0x02), Some(DeviceFamily::BatteryMonitor));
    /// assert_eq!(DeviceFamily::from_record_kind(0x0A), None);
    /// ```
    #[must_use]
    pub fn from_record_kind(kind: u8) -> Option<Self> {
        match kind {
            0x01 => Some(DeviceFamily::SolarCharger),
            0x02 => Some(DeviceFamily::BatteryMonitor),
            0x04 => Some(DeviceFamily::DcDcConverter),
            0x05 => Some(DeviceFamily::SmartLithium),
            0x09 => Some(DeviceFamily::SmartBatteryProtect),
            0x0C => Some(DeviceFamily::VeBus),
            0x0D => Some(DeviceFamily::DcEnergyMeter),
            _ => None,
        }
    }

    /// The device-type label written to the sensor sink.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DeviceFamily::SolarCharger => "SolarCharger",
            DeviceFamily::BatteryMonitor => "BatteryMonitor",
            DeviceFamily::DcDcConverter => "DcDcConverter",
            DeviceFamily::SmartLithium => "SmartLithium",
            DeviceFamily::SmartBatteryProtect => "SmartBatteryProtect",
            DeviceFamily::VeBus => "VEBus",
            DeviceFamily::DcEnergyMeter => "DcEnergyMeter",
        }
    }

    /// All supported families, in record-kind order.
    pub const ALL: [DeviceFamily; 7] = [
        DeviceFamily::SolarCharger,
        DeviceFamily::BatteryMonitor,
        DeviceFamily::DcDcConverter,
        DeviceFamily::SmartLithium,
        DeviceFamily::SmartBatteryProtect,
        DeviceFamily::VeBus,
        DeviceFamily::DcEnergyMeter,
    ];
}

impl TryFrom<u8> for DeviceFamily {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_record_kind(value).ok_or(ParseError::UnknownRecordKind(value))
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceFamily::SolarCharger => write!(f, "Solar Charger"),
            DeviceFamily::BatteryMonitor => write!(f, "Battery Monitor"),
            DeviceFamily::DcDcConverter => write!(f, "DC/DC Converter"),
            DeviceFamily::SmartLithium => write!(f, "Smart Lithium"),
            DeviceFamily::SmartBatteryProtect => write!(f, "Smart BatteryProtect"),
            DeviceFamily::VeBus => write!(f, "VE.Bus"),
            DeviceFamily::DcEnergyMeter => write!(f, "DC Energy Meter"),
        }
    }
}

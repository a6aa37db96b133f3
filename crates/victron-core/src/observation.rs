//! The unit-tagged, device-class-tagged observation emitted for each field.

use core::fmt;

use serde::Serialize;

use victron_types::{DeviceClass, SensorKey, Unit};

/// A single normalized telemetry value.
///
/// `Text` values are always canonical lowercase tokens from the record
/// enums (or a field's defined default such as `"no alarm"`), so they
/// borrow `'static` data. `None` is data, not an error: it means the
/// device did not report the field in this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric reading, passed through from the decoder unchanged.
    Numeric(f32),
    /// A normalized enum token.
    Text(&'static str),
    /// The field is defined for this family but absent in this frame.
    None,
}

impl Value {
    /// True when the field was absent.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// The numeric reading, if this is one.
    #[must_use]
    pub fn as_numeric(&self) -> Option<f32> {
        match self {
            Value::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    /// The token, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&'static str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Option<f32>> for Value {
    fn from(value: Option<f32>) -> Self {
        match value {
            Some(n) => Value::Numeric(n),
            None => Value::None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric(n) => write!(f, "{n}"),
            Value::Text(t) => f.write_str(t),
            Value::None => f.write_str("-"),
        }
    }
}

/// One normalized telemetry field, ready for the sensor sink.
///
/// Observations are emitted in the deterministic per-family table order and
/// never stored by this crate; accumulation is the sink's concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Semantic field identifier.
    pub key: SensorKey,
    /// Unit tag, for numeric fields that carry one.
    pub unit: Option<Unit>,
    /// The normalized value.
    pub value: Value,
    /// Device-class routing hint.
    pub device_class: Option<DeviceClass>,
}

impl Observation {
    /// Create an observation.
    #[must_use]
    pub fn new(
        key: SensorKey,
        unit: Option<Unit>,
        value: Value,
        device_class: Option<DeviceClass>,
    ) -> Self {
        Self {
            key,
            unit,
            value,
            device_class,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)?;
        if let Some(unit) = self.unit {
            write!(f, " {unit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_optional() {
        assert_eq!(Value::from(Some(12.5)), Value::Numeric(12.5));
        assert_eq!(Value::from(None), Value::None);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Numeric(1.0).as_numeric(), Some(1.0));
        assert_eq!(Value::Text("bulk").as_text(), Some("bulk"));
        assert!(Value::None.is_none());
        assert!(Value::Text("bulk").as_numeric().is_none());
    }

    #[test]
    fn test_value_serialization() {
        assert_eq!(serde_json::to_string(&Value::Numeric(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&Value::Text("bulk")).unwrap(), "\"bulk\"");
        assert_eq!(serde_json::to_string(&Value::None).unwrap(), "null");
    }

    #[test]
    fn test_observation_display() {
        let obs = Observation::new(
            SensorKey::BatteryVoltage,
            Some(Unit::Volt),
            Value::Numeric(13.2),
            Some(DeviceClass::Voltage),
        );
        assert_eq!(obs.to_string(), "battery_voltage=13.2 V");

        let obs = Observation::new(SensorKey::Alarm, None, Value::None, None);
        assert_eq!(obs.to_string(), "alarm=-");
    }
}

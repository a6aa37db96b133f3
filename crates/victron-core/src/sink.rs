//! The sensor-sink contract of the host platform.
//!
//! The gate only ever calls these four methods; storage, deduplication,
//! and entity lifecycle are the sink's concern. [`MemorySink`] is the
//! in-crate implementation used by tests and by the passive monitor to
//! collect one frame's worth of output before broadcasting it.

use serde::Serialize;

use victron_types::{DeviceClass, SensorKey, Unit};

use crate::observation::{Observation, Value};

/// Receiver for device metadata and normalized observations.
pub trait SensorSink {
    /// Record the device's manufacturer name.
    fn set_device_manufacturer(&mut self, manufacturer: &str);

    /// Record the device's declared name, if it declared one.
    fn set_device_name(&mut self, name: Option<&str>);

    /// Record the detected device-type label.
    fn set_device_type(&mut self, device_type: &str);

    /// Deliver one normalized observation.
    fn update_sensor(
        &mut self,
        key: SensorKey,
        unit: Option<Unit>,
        value: Value,
        device_class: Option<DeviceClass>,
    );
}

/// A sink that records everything it is given.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemorySink {
    /// Last manufacturer written, if any.
    pub manufacturer: Option<String>,
    /// Last device name written. Outer `None` = never written;
    /// inner `None` = written as absent.
    pub device_name: Option<Option<String>>,
    /// Last device-type label written, if any.
    pub device_type: Option<String>,
    /// Observations in delivery order.
    pub observations: Vec<Observation>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no metadata and no observations have been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none()
            && self.device_name.is_none()
            && self.device_type.is_none()
            && self.observations.is_empty()
    }

    /// Look up the last observation written for a key.
    #[must_use]
    pub fn observation(&self, key: SensorKey) -> Option<&Observation> {
        self.observations.iter().rev().find(|obs| obs.key == key)
    }

    /// Drop all recorded state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl SensorSink for MemorySink {
    fn set_device_manufacturer(&mut self, manufacturer: &str) {
        self.manufacturer = Some(manufacturer.to_string());
    }

    fn set_device_name(&mut self, name: Option<&str>) {
        self.device_name = Some(name.map(str::to_string));
    }

    fn set_device_type(&mut self, device_type: &str) {
        self.device_type = Some(device_type.to_string());
    }

    fn update_sensor(
        &mut self,
        key: SensorKey,
        unit: Option<Unit>,
        value: Value,
        device_class: Option<DeviceClass>,
    ) {
        self.observations
            .push(Observation::new(key, unit, value, device_class));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_metadata() {
        let mut sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.set_device_manufacturer("Victron");
        sink.set_device_name(None);
        sink.set_device_type("BatteryMonitor");

        assert_eq!(sink.manufacturer.as_deref(), Some("Victron"));
        assert_eq!(sink.device_name, Some(None));
        assert_eq!(sink.device_type.as_deref(), Some("BatteryMonitor"));
        assert!(!sink.is_empty());
    }

    #[test]
    fn test_memory_sink_records_observations_in_order() {
        let mut sink = MemorySink::new();
        sink.update_sensor(
            SensorKey::Voltage,
            Some(Unit::Volt),
            Value::Numeric(12.8),
            Some(DeviceClass::Voltage),
        );
        sink.update_sensor(SensorKey::Alarm, None, Value::Text("no alarm"), None);

        assert_eq!(sink.observations.len(), 2);
        assert_eq!(sink.observations[0].key, SensorKey::Voltage);
        assert_eq!(
            sink.observation(SensorKey::Alarm).unwrap().value,
            Value::Text("no alarm")
        );
        assert!(sink.observation(SensorKey::Current).is_none());
    }

    #[test]
    fn test_memory_sink_clear() {
        let mut sink = MemorySink::new();
        sink.set_device_type("VEBus");
        sink.clear();
        assert!(sink.is_empty());
    }
}

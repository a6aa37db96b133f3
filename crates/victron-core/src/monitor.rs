//! Passive monitoring of Victron advertisements.
//!
//! A [`PassiveMonitor`] watches the adapter's advertisement event stream,
//! routes each manufacturer-data frame to the gate registered for that
//! device identity, and broadcasts the resulting observations. Devices
//! without a registered key are ignored at trace level; everything a gate
//! rejects is already logged by the gate itself.
//!
//! # Example
//!
//! ```ignore
//! use victron_core::{AdvertisementKey, MonitorOptions, PassiveMonitor};
//! use tokio_util::sync::CancellationToken;
//!
//! let mut monitor = PassiveMonitor::new(decoder, MonitorOptions::default());
//! monitor.register_key("ED:13:09:B6:27:40", AdvertisementKey::new("..."));
//! let monitor = std::sync::Arc::new(monitor);
//!
//! let cancel = CancellationToken::new();
//! let handle = monitor.start(cancel.clone());
//!
//! let mut rx = monitor.subscribe();
//! while let Ok(update) = rx.recv().await {
//!     println!("{}: {} observations", update.device_id, update.observations.len());
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use btleplug::api::{Central, CentralEvent, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, PeripheralId};
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{info, trace, warn};

use victron_types::DeviceFamily;
use victron_types::ble::MANUFACTURER_ID;

use crate::decoder::RecordDecoder;
use crate::error::Result;
use crate::frame::RawFrame;
use crate::gate::{DeviceGate, Outcome};
use crate::key::AdvertisementKey;
use crate::observation::Observation;
use crate::scan::{create_identifier, get_adapter};
use crate::sink::{MemorySink, SensorSink};

/// One device's worth of normalized telemetry from one frame.
#[derive(Debug, Clone)]
pub struct TelemetryUpdate {
    /// Stable device identifier (address, or peripheral ID on macOS).
    pub device_id: String,
    /// Device name from the advertisement, if declared.
    pub device_name: Option<String>,
    /// RSSI signal strength at reception.
    pub rssi: Option<i16>,
    /// The detected family.
    pub family: DeviceFamily,
    /// Observations in table order.
    pub observations: Vec<Observation>,
    /// When the frame was processed.
    pub received_at: Instant,
}

/// Options for passive monitoring.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Channel capacity for telemetry updates.
    pub channel_capacity: usize,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            channel_capacity: 100,
        }
    }
}

impl MonitorOptions {
    /// Create new options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the broadcast channel capacity.
    #[must_use]
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }
}

/// Passive monitor: one gate per registered device, one shared decoder.
///
/// Frames from different devices are independent; each frame is fully
/// gated and normalized before the next event is taken from the stream.
pub struct PassiveMonitor<D> {
    decoder: Arc<D>,
    gates: HashMap<String, DeviceGate<Arc<D>>>,
    sender: broadcast::Sender<TelemetryUpdate>,
}

impl<D: RecordDecoder + Send + Sync + 'static> PassiveMonitor<D> {
    /// Create a monitor around a decoder.
    pub fn new(decoder: D, options: MonitorOptions) -> Self {
        let (sender, _) = broadcast::channel(options.channel_capacity);
        Self {
            decoder: Arc::new(decoder),
            gates: HashMap::new(),
            sender,
        }
    }

    /// Bind an advertisement key to a device identifier.
    ///
    /// Frames from identifiers without a key are not processed at all; the
    /// key is immutable for the life of the gate, matching the
    /// one-gate-per-device ownership model.
    pub fn register_key(&mut self, device_id: impl Into<String>, key: AdvertisementKey) {
        self.gates.insert(
            device_id.into(),
            DeviceGate::with_key(Arc::clone(&self.decoder), key),
        );
    }

    /// Identifiers with registered keys.
    #[must_use]
    pub fn registered_devices(&self) -> Vec<&str> {
        self.gates.keys().map(String::as_str).collect()
    }

    /// Subscribe to telemetry updates.
    pub fn subscribe(&self) -> broadcast::Receiver<TelemetryUpdate> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Start the monitor.
    ///
    /// Spawns a background task that consumes the adapter's advertisement
    /// events until the cancellation token is triggered.
    pub fn start(self: &Arc<Self>, cancel_token: CancellationToken) -> tokio::task::JoinHandle<()> {
        let monitor = Arc::clone(self);

        tokio::spawn(async move {
            info!(devices = monitor.gates.len(), "starting passive monitor");

            if let Err(e) = monitor.event_loop(cancel_token).await {
                warn!("passive monitor stopped with error: {e}");
            }
        })
    }

    async fn event_loop(&self, cancel_token: CancellationToken) -> Result<()> {
        let adapter = get_adapter().await?;
        let mut events = adapter.events().await?;
        adapter.start_scan(ScanFilter::default()).await?;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("passive monitor cancelled");
                    break;
                }
                event = events.next() => {
                    let Some(event) = event else { break };
                    if let CentralEvent::ManufacturerDataAdvertisement { id, manufacturer_data } = event {
                        if manufacturer_data.contains_key(&MANUFACTURER_ID) {
                            self.handle_advertisement(&adapter, &id, manufacturer_data).await;
                        }
                    }
                }
            }
        }

        adapter.stop_scan().await?;
        Ok(())
    }

    async fn handle_advertisement(
        &self,
        adapter: &Adapter,
        id: &PeripheralId,
        manufacturer_data: HashMap<u16, Vec<u8>>,
    ) {
        // Name/address/RSSI come from the peripheral cache; a miss only
        // costs us the metadata, not the frame.
        let (name, rssi, address) = match adapter.peripheral(id).await {
            Ok(peripheral) => match peripheral.properties().await {
                Ok(Some(props)) => (props.local_name, props.rssi, props.address.to_string()),
                _ => (None, None, String::new()),
            },
            Err(_) => (None, None, String::new()),
        };
        let device_id = create_identifier(&address, id);

        let Some(gate) = self.gates.get(&device_id) else {
            trace!(%device_id, "no key registered, skipping");
            return;
        };

        let frame = RawFrame::new(manufacturer_data, name, None);
        let mut sink = MemorySink::new();
        if let Outcome::Published { family, .. } = gate.process(&frame, &mut sink) {
            let update = TelemetryUpdate {
                device_id,
                device_name: frame.name,
                rssi,
                family,
                observations: sink.observations,
                received_at: Instant::now(),
            };
            // Ignore send errors: no receivers is fine.
            let _ = self.sender.send(update);
        }
    }

    /// Process one frame synchronously, outside the scan loop.
    ///
    /// Useful when the caller owns the transport (tests, replay from a
    /// capture). Writes to `sink` and broadcasts on success, exactly as
    /// the live loop does.
    pub fn process_frame<S: SensorSink>(
        &self,
        device_id: &str,
        frame: &RawFrame,
        sink: &mut S,
    ) -> Outcome {
        let Some(gate) = self.gates.get(device_id) else {
            trace!(%device_id, "no key registered, skipping");
            return Outcome::Filtered;
        };

        let mut memory = MemorySink::new();
        let outcome = gate.process(frame, &mut memory);

        // Replay the recorded calls into the caller's sink.
        if let Some(manufacturer) = &memory.manufacturer {
            sink.set_device_manufacturer(manufacturer);
        }
        if let Some(device_name) = &memory.device_name {
            sink.set_device_name(device_name.as_deref());
        }
        if let Some(device_type) = &memory.device_type {
            sink.set_device_type(device_type);
        }
        for obs in &memory.observations {
            sink.update_sensor(obs.key, obs.unit, obs.value, obs.device_class);
        }

        if let Outcome::Published { family, .. } = outcome {
            let update = TelemetryUpdate {
                device_id: device_id.to_string(),
                device_name: frame.name.clone(),
                rssi: None,
                family,
                observations: memory.observations,
                received_at: Instant::now(),
            };
            let _ = self.sender.send(update);
        }

        outcome
    }
}

impl<D> std::fmt::Debug for PassiveMonitor<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassiveMonitor")
            .field("devices", &self.gates.len())
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

//! The advertisement gate: filter, detect, validate key, decode, publish.
//!
//! One [`DeviceGate`] exists per physical device identity, with that
//! device's advertisement key bound at construction. A gate is
//! synchronous, keeps no per-frame state, and fully recovers every failure
//! locally: [`process`](DeviceGate::process) reports what happened in its
//! return value and never panics or propagates an error, whatever bytes
//! arrive off the air.

use tracing::{debug, error};

use victron_types::DeviceFamily;

use crate::advertisement::{detect_family, parse_envelope};
use crate::decoder::RecordDecoder;
use crate::error::RejectReason;
use crate::frame::RawFrame;
use crate::key::AdvertisementKey;
use crate::normalize::normalize;
use crate::sink::SensorSink;

/// What a single call to [`DeviceGate::process`] did with the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// Not Victron instant-readout traffic. No side effects, no logging at
    /// normal verbosity.
    Filtered,
    /// Recognized traffic that could not be used; see the reason for which
    /// stage dropped it.
    Rejected(RejectReason),
    /// The frame was decoded and its observations were delivered.
    Published {
        /// The detected family.
        family: DeviceFamily,
        /// How many observations were delivered to the sink.
        observations: usize,
    },
}

impl Outcome {
    /// True when observations were delivered.
    #[must_use]
    pub fn is_published(&self) -> bool {
        matches!(self, Outcome::Published { .. })
    }
}

/// Advertisement gate for one device identity.
pub struct DeviceGate<D> {
    decoder: D,
    key: Option<AdvertisementKey>,
}

impl<D: RecordDecoder> DeviceGate<D> {
    /// Create a gate with no key. Frames will pass filtering and detection
    /// but be rejected at the key-plausibility stage.
    pub fn new(decoder: D) -> Self {
        Self { decoder, key: None }
    }

    /// Create a gate with the device's advertisement key.
    pub fn with_key(decoder: D, key: AdvertisementKey) -> Self {
        Self {
            decoder,
            key: Some(key),
        }
    }

    /// The bound key, if one was provided.
    #[must_use]
    pub fn key(&self) -> Option<&AdvertisementKey> {
        self.key.as_ref()
    }

    /// Gate one advertisement frame.
    ///
    /// Stages, in order:
    ///
    /// 1. Filter: no Victron payload or wrong marker byte → [`Outcome::Filtered`],
    ///    silently.
    /// 2. Detect the family from the payload alone; unsniffable or
    ///    unsupported records are rejected at debug level.
    /// 3. Write device metadata to the sink. This happens before key
    ///    validation: the device's identity is known even when its key is
    ///    wrong.
    /// 4. Key plausibility: first encrypted byte vs. first key byte.
    ///    Missing key, bad hex, and mismatch are separate reasons, logged
    ///    at error level — a misconfigured key is the dominant operational
    ///    failure and must be loud without being fatal.
    /// 5. Full decode via the bound [`RecordDecoder`]; failures are
    ///    rejected at debug level.
    /// 6. Normalize and deliver every observation.
    pub fn process<S: SensorSink>(&self, frame: &RawFrame, sink: &mut S) -> Outcome {
        let Some(payload) = frame.victron_payload() else {
            return Outcome::Filtered;
        };
        if !frame.is_instant_readout() {
            return Outcome::Filtered;
        }

        let Some(family) = detect_family(payload) else {
            debug!(payload = %hex::encode(payload), "ignoring unsupported advertisement");
            return Outcome::Rejected(RejectReason::UnsupportedRecord);
        };

        sink.set_device_manufacturer(frame.manufacturer.as_deref().unwrap_or("Victron"));
        sink.set_device_name(frame.name.as_deref());
        sink.set_device_type(family.label());

        let key_bytes = match self.validate_key(payload) {
            Ok(bytes) => bytes,
            Err(reason) => {
                error!(%reason, "dropping frame");
                return Outcome::Rejected(reason);
            }
        };

        let record = match self.decoder.decode(family, payload, &key_bytes) {
            Ok(record) => record,
            Err(err) => {
                debug!(%err, %family, "unable to decode record");
                return Outcome::Rejected(RejectReason::DecodeFailed);
            }
        };

        let observations = normalize(&record);
        let count = observations.len();
        for obs in observations {
            sink.update_sensor(obs.key, obs.unit, obs.value, obs.device_class);
        }

        Outcome::Published {
            family,
            observations: count,
        }
    }

    /// Run the key-plausibility check, returning the decoded key bytes for
    /// the subsequent full decode.
    ///
    /// Three independent causes, one outward effect: the frame is dropped.
    fn validate_key(&self, payload: &[u8]) -> Result<Vec<u8>, RejectReason> {
        let Some(key) = &self.key else {
            return Err(RejectReason::MissingKey);
        };
        let key_bytes = key.to_bytes().map_err(|_| RejectReason::MalformedKey)?;

        // detect_family has already enforced the envelope minimum length.
        let envelope = parse_envelope(payload).map_err(|_| RejectReason::UnsupportedRecord)?;
        if envelope.encrypted.first() != key_bytes.first() {
            return Err(RejectReason::KeyMismatch);
        }

        Ok(key_bytes)
    }
}

impl<D: std::fmt::Debug> std::fmt::Debug for DeviceGate<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceGate")
            .field("decoder", &self.decoder)
            .field("has_key", &self.key.is_some())
            .finish()
    }
}

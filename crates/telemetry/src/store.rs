// crates/telemetry/src/store.rs
//! Per-device rolling state: current value, running min/max, thresholds,
//! bounded history, and the GPS pseudo-device with its position trail.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::alert::{severity, Severity};
use crate::descriptor::DeviceDescriptor;

/// Maximum scalar history points retained per device.
pub const HISTORY_CAP: usize = 200;
/// Maximum GPS trail points retained for path rendering.
pub const TRAIL_CAP: usize = 500;
/// Seconds without a reading before a device is considered stale (fade only).
pub const DEVICE_STALE_AFTER_SECS: i64 = 60;

/// One timestamped history sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// State for one logical sensor, created on first reading.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub name: String,
    /// Unit/polarity/color, resolved once at creation from the name.
    pub descriptor: DeviceDescriptor,
    pub current_value: f64,
    pub running_min: f64,
    pub running_max: f64,
    pub max_range: f64,
    pub alert_low: f64,
    pub alert_med: f64,
    pub last_seen_at: DateTime<Utc>,
    history: VecDeque<HistoryPoint>,
}

impl DeviceRecord {
    fn new(name: &str, value: f64, received_at: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            descriptor: DeviceDescriptor::resolve(name),
            current_value: value,
            running_min: value,
            running_max: value,
            max_range: 0.0,
            alert_low: 0.0,
            alert_med: 0.0,
            last_seen_at: received_at,
            history: VecDeque::new(),
        }
    }

    /// Bounded history, oldest first.
    pub fn history(&self) -> &VecDeque<HistoryPoint> {
        &self.history
    }

    /// Advisory: no reading for over a minute. Does not clear the record.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        (now - self.last_seen_at).num_seconds() > DEVICE_STALE_AFTER_SECS
    }
}

/// Last known position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsState {
    pub lat: f64,
    pub lon: f64,
    pub last_seen_at: DateTime<Utc>,
}

impl GpsState {
    /// Advisory: no fix for over a minute. Same threshold as scalar devices.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        (now - self.last_seen_at).num_seconds() > DEVICE_STALE_AFTER_SECS
    }
}

/// Owner of all device records. Single-threaded on the consuming side —
/// callers pass `received_at`/`now` in, so time-driven behavior is testable.
#[derive(Debug, Default)]
pub struct DeviceStore {
    devices: HashMap<String, DeviceRecord>,
    gps: Option<GpsState>,
    trail: VecDeque<(f64, f64)>,
}

impl DeviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one reading into the store, creating the record on first sight.
    /// Returns the updated record and its freshly computed severity.
    ///
    /// Invariant: `running_min <= current_value <= running_max` afterwards.
    pub fn apply_reading(
        &mut self,
        name: &str,
        value: f64,
        max: f64,
        alert_low: f64,
        alert_med: f64,
        received_at: DateTime<Utc>,
    ) -> (&DeviceRecord, Severity) {
        let record = self
            .devices
            .entry(name.to_string())
            .or_insert_with(|| DeviceRecord::new(name, value, received_at));

        record.last_seen_at = received_at;
        record.running_min = record.running_min.min(value);
        record.running_max = record.running_max.max(value);
        record.current_value = value;
        record.max_range = max;
        record.alert_low = alert_low;
        record.alert_med = alert_med;

        record.history.push_back(HistoryPoint {
            value,
            timestamp: received_at,
        });
        if record.history.len() > HISTORY_CAP {
            record.history.pop_front();
        }

        let sev = severity(value, alert_low, alert_med, record.descriptor.inverted);
        (&*record, sev)
    }

    /// Update the GPS pseudo-device: position only, no scalar history, no
    /// min/max, never any alert. The trail is appended separately for path
    /// rendering, capped at [`TRAIL_CAP`] points.
    pub fn apply_gps_fix(&mut self, lat: f64, lon: f64, received_at: DateTime<Utc>) {
        self.gps = Some(GpsState {
            lat,
            lon,
            last_seen_at: received_at,
        });
        self.trail.push_back((lat, lon));
        if self.trail.len() > TRAIL_CAP {
            self.trail.pop_front();
        }
    }

    pub fn get(&self, name: &str) -> Option<&DeviceRecord> {
        self.devices.get(name)
    }

    pub fn gps(&self) -> Option<&GpsState> {
        self.gps.as_ref()
    }

    /// GPS positions, oldest first.
    pub fn trail(&self) -> &VecDeque<(f64, f64)> {
        &self.trail
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Names of devices past the staleness threshold, for fade indication.
    /// The GPS pseudo-device fades on the same sweep as the scalar tiles.
    pub fn stale_names(&self, now: DateTime<Utc>) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .devices
            .values()
            .filter(|d| d.is_stale(now))
            .map(|d| d.name.as_str())
            .collect();
        if self.gps.as_ref().is_some_and(|g| g.is_stale(now)) {
            names.push("GPS");
        }
        names.sort_unstable();
        names
    }
}

// crates/telemetry/src/motor.rs
//! The two-slot motor temperature store.
//!
//! Motor temps feed a single status banner rather than a chart, so they get
//! a deliberately simpler store than [`crate::store::DeviceStore`]: fixed
//! identity, no history, no min/max.

use chrono::{DateTime, Utc};

use crate::alert::{severity, Severity};

/// The fixed motor slot names. Readings with these names route here instead
/// of the generic device store.
pub const MOTOR_SLOTS: [&str; 2] = ["Temp1", "Temp2"];

/// Seconds without a reading before one motor counts as silent.
pub const MOTOR_OFFLINE_AFTER_SECS: i64 = 30;

/// Latest reading for one motor slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorRecord {
    pub current_value: f64,
    pub max_range: f64,
    pub alert_low: f64,
    pub alert_med: f64,
    pub last_received_at: DateTime<Utc>,
}

/// Exactly two slots, keyed by [`MOTOR_SLOTS`]. A slot that has never
/// received a reading counts as offline.
#[derive(Debug, Default)]
pub struct MotorStore {
    slots: [Option<MotorRecord>; 2],
}

impl MotorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a reading with this name belongs to the motor store.
    pub fn is_motor(name: &str) -> bool {
        MOTOR_SLOTS.contains(&name)
    }

    /// Fold a motor reading in. Returns `None` when the name is not a motor
    /// slot, otherwise the freshly computed severity (motors are never
    /// inverted).
    pub fn apply_reading(
        &mut self,
        name: &str,
        value: f64,
        max: f64,
        alert_low: f64,
        alert_med: f64,
        received_at: DateTime<Utc>,
    ) -> Option<Severity> {
        let idx = MOTOR_SLOTS.iter().position(|slot| *slot == name)?;
        self.slots[idx] = Some(MotorRecord {
            current_value: value,
            max_range: max,
            alert_low,
            alert_med,
            last_received_at: received_at,
        });
        Some(severity(value, alert_low, alert_med, false))
    }

    pub fn get(&self, name: &str) -> Option<&MotorRecord> {
        let idx = MOTOR_SLOTS.iter().position(|slot| *slot == name)?;
        self.slots[idx].as_ref()
    }

    /// True only when *every* slot has been silent for over
    /// [`MOTOR_OFFLINE_AFTER_SECS`] — an AND across all motors, driving one
    /// status banner rather than per-motor warnings.
    pub fn all_offline(&self, now: DateTime<Utc>) -> bool {
        !self.slots.iter().any(|slot| match slot {
            Some(record) => {
                (now - record.last_received_at).num_seconds() < MOTOR_OFFLINE_AFTER_SECS
            }
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn t0() -> DateTime<Utc> {
        "2026-08-29T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn only_fixed_slots_are_motors() {
        assert!(MotorStore::is_motor("Temp1"));
        assert!(MotorStore::is_motor("Temp2"));
        assert!(!MotorStore::is_motor("Temp3"));
        assert!(!MotorStore::is_motor("temp1"));
        assert!(!MotorStore::is_motor("Bilge"));
    }

    #[test]
    fn non_motor_name_is_rejected() {
        let mut store = MotorStore::new();
        assert!(store
            .apply_reading("Bat1", 12.0, 15.0, 11.0, 12.0, t0())
            .is_none());
        assert!(store.get("Bat1").is_none());
    }

    #[test]
    fn reading_overwrites_slot_without_history() {
        let mut store = MotorStore::new();
        store.apply_reading("Temp1", 40.0, 100.0, 20.0, 40.0, t0());
        store.apply_reading("Temp1", 45.0, 100.0, 20.0, 40.0, t0());
        let record = store.get("Temp1").unwrap();
        assert_eq!(record.current_value, 45.0);
    }

    #[test]
    fn motor_severity_is_never_inverted() {
        let mut store = MotorStore::new();
        let sev = store
            .apply_reading("Temp1", 10.0, 100.0, 20.0, 40.0, t0())
            .unwrap();
        assert_eq!(sev, Severity::High);
    }

    #[test]
    fn all_offline_is_an_and_across_slots() {
        let mut store = MotorStore::new();
        // Nothing seen yet: banner shows.
        assert!(store.all_offline(t0()));

        // One fresh motor keeps the banner hidden.
        store.apply_reading("Temp1", 10.0, 100.0, 20.0, 40.0, t0());
        store.apply_reading("Temp1", 5.0, 100.0, 20.0, 40.0, t0() + TimeDelta::seconds(5));
        assert!(!store.all_offline(t0() + TimeDelta::seconds(10)));

        // 31s after the last Temp1 reading, with Temp2 never seen: offline.
        assert!(store.all_offline(t0() + TimeDelta::seconds(5 + 31)));

        // A fresh Temp2 reading alone brings the banner back down.
        let later = t0() + TimeDelta::seconds(60);
        store.apply_reading("Temp2", 30.0, 100.0, 20.0, 40.0, later);
        assert!(!store.all_offline(later + TimeDelta::seconds(10)));
    }
}

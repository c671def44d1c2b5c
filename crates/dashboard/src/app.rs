// crates/dashboard/src/app.rs
//! The message-to-state pipeline: one decoded chat text in, one
//! [`DashboardEvent`] out, with all device/motor/GPS state folded along the
//! way. Callers pass `now` in, so every time-driven behavior is testable.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::warn;

use helmview_telemetry::{
    command, decode, should_sound, DeviceStore, MotorStore, Severity, SwitchState, TelemetryEvent,
};

use crate::settings::Settings;

/// What one inbound chat text did to the dashboard. The consuming chrome
/// renders from this; the headless client logs it.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A generic device updated. `sound` is true when the audible alarm
    /// should fire (High severity and not silenced).
    DeviceUpdated {
        name: String,
        value: f64,
        severity: Severity,
        sound: bool,
    },
    /// A motor temperature slot updated (status banner, no chart).
    MotorUpdated {
        name: String,
        value: f64,
        severity: Severity,
    },
    /// Position fix applied; trail extended. Never alerts.
    GpsUpdated { lat: f64, lon: f64 },
    /// A device confirmed an IO switch.
    IoAcknowledged {
        name: String,
        pin: u16,
        state: SwitchState,
    },
    /// A device confirmed a reset.
    ResetAcknowledged { name: String },
    /// The global mute flag changed (local toggle or wire echo).
    SilenceChanged { silenced: bool },
    /// Matched no known pattern. Nothing mutated.
    Unrecognized { raw: String },
}

/// Client-side state owner: device store, motor slots, pin states, and the
/// persisted settings. Owned by the single client task — no locking.
pub struct Dashboard {
    devices: DeviceStore,
    motors: MotorStore,
    settings: Settings,
    pin_states: HashMap<u16, SwitchState>,
}

impl Dashboard {
    pub fn new(settings: Settings) -> Self {
        Self {
            devices: DeviceStore::new(),
            motors: MotorStore::new(),
            settings,
            pin_states: HashMap::new(),
        }
    }

    /// Decode one chat text and fold it into the state model.
    pub fn handle_text(&mut self, text: &str, now: DateTime<Utc>) -> DashboardEvent {
        match decode(text) {
            TelemetryEvent::Silence(silenced) => {
                self.set_silence(silenced);
                DashboardEvent::SilenceChanged { silenced }
            }
            TelemetryEvent::Reading {
                name,
                value,
                max,
                alert_low,
                alert_med,
            } => {
                // Motor slots feed the banner store, everything else the
                // generic device store.
                if let Some(severity) =
                    self.motors
                        .apply_reading(&name, value, max, alert_low, alert_med, now)
                {
                    DashboardEvent::MotorUpdated {
                        name,
                        value,
                        severity,
                    }
                } else {
                    let (_, severity) =
                        self.devices
                            .apply_reading(&name, value, max, alert_low, alert_med, now);
                    DashboardEvent::DeviceUpdated {
                        name,
                        value,
                        severity,
                        sound: should_sound(severity, self.settings.silence),
                    }
                }
            }
            TelemetryEvent::IoAck { name, pin, state } => {
                self.pin_states.insert(pin, state);
                DashboardEvent::IoAcknowledged { name, pin, state }
            }
            TelemetryEvent::ResetAck { name } => DashboardEvent::ResetAcknowledged { name },
            TelemetryEvent::GpsFix { lat, lon } => {
                self.devices.apply_gps_fix(lat, lon, now);
                DashboardEvent::GpsUpdated { lat, lon }
            }
            TelemetryEvent::Unknown { raw } => DashboardEvent::Unrecognized { raw },
        }
    }

    /// Flip the local mute flag, persist it, and return the command to echo
    /// to every other participant.
    pub fn toggle_silence(&mut self) -> String {
        let silenced = !self.settings.silence;
        self.set_silence(silenced);
        command::silence(silenced)
    }

    pub fn silenced(&self) -> bool {
        self.settings.silence
    }

    fn set_silence(&mut self, silenced: bool) {
        self.settings.silence = silenced;
        if let Err(e) = self.settings.save() {
            warn!(error = %e, "failed to persist settings");
        }
    }

    /// Whether the "all motors offline" banner should show: every motor
    /// slot silent for over 30 seconds.
    pub fn motor_banner_visible(&self, now: DateTime<Utc>) -> bool {
        self.motors.all_offline(now)
    }

    /// Reset commands for every known device, one per name.
    pub fn reset_all_commands(&self) -> Vec<String> {
        let mut commands: Vec<String> =
            self.devices.iter().map(|d| command::reset(&d.name)).collect();
        commands.sort_unstable();
        commands
    }

    pub fn devices(&self) -> &DeviceStore {
        &self.devices
    }

    pub fn motors(&self) -> &MotorStore {
        &self.motors
    }

    pub fn pin_state(&self, pin: u16) -> Option<SwitchState> {
        self.pin_states.get(&pin).copied()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

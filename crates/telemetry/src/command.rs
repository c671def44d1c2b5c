// crates/telemetry/src/command.rs
//! Outbound command builders — the reverse direction of [`crate::decode`].
//!
//! The dashboard emits these strings inside chat envelopes; the relay fans
//! them out to every connection, devices included.

use crate::decode::SwitchState;

/// `hal: silence <true|false>` — global alarm-mute toggle, echoed to every
/// participant so all dashboards agree (last message wins).
pub fn silence(enabled: bool) -> String {
    format!("hal: silence {enabled}")
}

/// `io: <device> <pin> <on|off>` — switch a controllable pin.
pub fn io_switch(device: &str, pin: u16, state: SwitchState) -> String {
    format!("io: {} {} {}", device.to_lowercase(), pin, state.as_str())
}

/// `hal: <name> reset` — ask a device to reset its sensor.
pub fn reset(name: &str) -> String {
    format!("hal: {} reset", name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_command_format() {
        assert_eq!(silence(true), "hal: silence true");
        assert_eq!(silence(false), "hal: silence false");
    }

    #[test]
    fn io_command_lowercases_device() {
        assert_eq!(io_switch("Temp", 26, SwitchState::On), "io: temp 26 on");
        assert_eq!(io_switch("Temp", 27, SwitchState::Off), "io: temp 27 off");
    }

    #[test]
    fn reset_command_lowercases_name() {
        assert_eq!(reset("Bilge"), "hal: bilge reset");
    }
}

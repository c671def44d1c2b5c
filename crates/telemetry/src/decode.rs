// crates/telemetry/src/decode.rs
//! Ordered matchers for the text sub-protocol carried inside chat envelopes.
//!
//! The grammar is ambiguous if tried in the wrong order: `hal: silence true`
//! would parse as a reading for a device named "silence". The matchers are
//! therefore an explicit priority list, tried in a fixed sequence, first
//! match wins. All patterns are case-insensitive.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Default full-scale range when a reading carries no `max=`.
pub const DEFAULT_MAX_RANGE: f64 = 100.0;
/// Default critical threshold when a reading carries no `alertLow=`.
pub const DEFAULT_ALERT_LOW: f64 = 20.0;
/// Default warning threshold when a reading carries no `alertMed=`.
pub const DEFAULT_ALERT_MED: f64 = 40.0;

/// One decoded telemetry payload. Every input string maps to exactly one
/// variant; anything unparseable is `Unknown`, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    /// Global alarm-mute toggle, `hal: silence <true|false>`.
    Silence(bool),
    /// A sensor reading, `hal: <name> <value>` with optional threshold args.
    Reading {
        name: String,
        value: f64,
        max: f64,
        alert_low: f64,
        alert_med: f64,
    },
    /// Device confirming a pin switch, `io_ack: <name> <pin> <on|off>`.
    IoAck {
        name: String,
        pin: u16,
        state: SwitchState,
    },
    /// Device confirming a reset, `hal: <name> reset_ack`.
    ResetAck { name: String },
    /// Position fix, `hal: GPS <lat>,<lon>`.
    GpsFix { lat: f64, lon: f64 },
    /// No pattern matched. Logged by the caller, mutates nothing.
    Unknown { raw: String },
}

/// On/off state of a controllable IO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn as_str(self) -> &'static str {
        match self {
            SwitchState::On => "on",
            SwitchState::Off => "off",
        }
    }
}

struct Matchers {
    silence: Regex,
    reading: Regex,
    io_ack: Regex,
    reset_ack: Regex,
    gps: Regex,
}

fn matchers() -> &'static Matchers {
    static MATCHERS: OnceLock<Matchers> = OnceLock::new();
    MATCHERS.get_or_init(|| Matchers {
        silence: Regex::new(r"(?i)^hal:\s*silence\s*(true|false)").unwrap(),
        reading: Regex::new(
            r"(?i)^hal:\s*(\w+)\s+(-?\d+(?:\.\d+)?)(?:\s+max=(\d+(?:\.\d+)?))?(?:\s+alertLow=(\d+(?:\.\d+)?))?(?:\s+alertMed=(\d+(?:\.\d+)?))?",
        )
        .unwrap(),
        io_ack: Regex::new(r"(?i)^io_ack:\s*(\w+)\s*(\d+)\s*(on|off)").unwrap(),
        reset_ack: Regex::new(r"(?i)^hal:\s*(\w+)\s*reset_ack").unwrap(),
        gps: Regex::new(r"(?i)^hal:\s*GPS\s*(-?\d+\.\d+),(-?\d+\.\d+)").unwrap(),
    })
}

/// Decode one chat `text` payload into a [`TelemetryEvent`].
///
/// Priority order (part of the contract, see module docs):
/// silence, generic reading, io ack, reset ack, GPS fix, unknown.
/// A pattern that matches structurally but whose number fails to parse is
/// treated as a non-match and falls through to the next matcher.
pub fn decode(text: &str) -> TelemetryEvent {
    let m = matchers();
    let text = text.trim();

    if let Some(caps) = m.silence.captures(text) {
        return TelemetryEvent::Silence(caps[1].eq_ignore_ascii_case("true"));
    }

    if let Some(caps) = m.reading.captures(text) {
        // GPS has its own incompatible grammar; the exact token (any case)
        // falls through. Near-misses like "GPSX" still match here on purpose.
        if !caps[1].eq_ignore_ascii_case("gps") {
            if let Ok(value) = caps[2].parse::<f64>() {
                let max = opt_field(caps.get(3), DEFAULT_MAX_RANGE);
                let alert_low = opt_field(caps.get(4), DEFAULT_ALERT_LOW);
                let alert_med = opt_field(caps.get(5), DEFAULT_ALERT_MED);
                return TelemetryEvent::Reading {
                    name: caps[1].to_string(),
                    value,
                    max,
                    alert_low,
                    alert_med,
                };
            }
        }
    }

    if let Some(caps) = m.io_ack.captures(text) {
        // A pin number too large for u16 falls through as a non-match.
        if let Ok(pin) = caps[2].parse::<u16>() {
            let state = if caps[3].eq_ignore_ascii_case("on") {
                SwitchState::On
            } else {
                SwitchState::Off
            };
            return TelemetryEvent::IoAck {
                name: caps[1].to_string(),
                pin,
                state,
            };
        }
    }

    if let Some(caps) = m.reset_ack.captures(text) {
        return TelemetryEvent::ResetAck {
            name: caps[1].to_string(),
        };
    }

    if let Some(caps) = m.gps.captures(text) {
        if let (Ok(lat), Ok(lon)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            return TelemetryEvent::GpsFix { lat, lon };
        }
    }

    TelemetryEvent::Unknown {
        raw: text.to_string(),
    }
}

fn opt_field(cap: Option<regex_lite::Match<'_>>, default: f64) -> f64 {
    cap.and_then(|m| m.as_str().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn silence_wins_over_generic_reading() {
        // "silence" must never be parsed as a device name.
        assert_eq!(decode("hal: silence true"), TelemetryEvent::Silence(true));
        assert_eq!(decode("hal: silence false"), TelemetryEvent::Silence(false));
        assert_eq!(decode("HAL: SILENCE TRUE"), TelemetryEvent::Silence(true));
    }

    #[test]
    fn bare_reading_gets_default_thresholds() {
        assert_eq!(
            decode("hal: Temp1 42.5"),
            TelemetryEvent::Reading {
                name: "Temp1".into(),
                value: 42.5,
                max: DEFAULT_MAX_RANGE,
                alert_low: DEFAULT_ALERT_LOW,
                alert_med: DEFAULT_ALERT_MED,
            }
        );
    }

    #[test]
    fn reading_with_all_threshold_args() {
        assert_eq!(
            decode("hal: Bat1 12.6 max=15 alertLow=11.5 alertMed=12"),
            TelemetryEvent::Reading {
                name: "Bat1".into(),
                value: 12.6,
                max: 15.0,
                alert_low: 11.5,
                alert_med: 12.0,
            }
        );
    }

    #[test]
    fn reading_accepts_negative_and_integer_values() {
        assert_eq!(
            decode("hal: Freezer -18"),
            TelemetryEvent::Reading {
                name: "Freezer".into(),
                value: -18.0,
                max: DEFAULT_MAX_RANGE,
                alert_low: DEFAULT_ALERT_LOW,
                alert_med: DEFAULT_ALERT_MED,
            }
        );
    }

    #[test]
    fn gps_token_is_excluded_from_generic_reading() {
        // "hal: GPS 5" is neither a reading (excluded token) nor a fix
        // (requires "<lat>,<lon>" with fractional parts).
        assert_eq!(
            decode("hal: GPS 5"),
            TelemetryEvent::Unknown {
                raw: "hal: GPS 5".into()
            }
        );
        assert_eq!(
            decode("hal: gps 5"),
            TelemetryEvent::Unknown {
                raw: "hal: gps 5".into()
            }
        );
    }

    #[test]
    fn gps_near_miss_still_matches_generic_reading() {
        // Documented loose behavior: only the exact token is excluded.
        match decode("hal: GPSX 5") {
            TelemetryEvent::Reading { name, value, .. } => {
                assert_eq!(name, "GPSX");
                assert_eq!(value, 5.0);
            }
            other => panic!("expected reading, got {other:?}"),
        }
    }

    #[test]
    fn gps_fix_parses_signed_decimals() {
        assert_eq!(
            decode("hal: GPS 51.500000,-0.100000"),
            TelemetryEvent::GpsFix {
                lat: 51.5,
                lon: -0.1
            }
        );
    }

    #[test]
    fn io_ack_parses() {
        assert_eq!(
            decode("io_ack: temp 26 on"),
            TelemetryEvent::IoAck {
                name: "temp".into(),
                pin: 26,
                state: SwitchState::On,
            }
        );
        assert_eq!(
            decode("IO_ACK: temp 27 OFF"),
            TelemetryEvent::IoAck {
                name: "temp".into(),
                pin: 27,
                state: SwitchState::Off,
            }
        );
    }

    #[test]
    fn io_ack_with_oversized_pin_falls_through() {
        assert_eq!(
            decode("io_ack: temp 99999999 on"),
            TelemetryEvent::Unknown {
                raw: "io_ack: temp 99999999 on".into()
            }
        );
    }

    #[test]
    fn reset_ack_parses() {
        assert_eq!(
            decode("hal: temp1 reset_ack"),
            TelemetryEvent::ResetAck {
                name: "temp1".into()
            }
        );
    }

    #[test]
    fn reset_ack_is_not_swallowed_by_generic_reading() {
        // "reset_ack" is not a number, so the reading matcher passes it by.
        assert!(matches!(
            decode("hal: Bilge reset_ack"),
            TelemetryEvent::ResetAck { .. }
        ));
    }

    #[test]
    fn garbage_maps_to_unknown() {
        assert_eq!(
            decode("hello world"),
            TelemetryEvent::Unknown {
                raw: "hello world".into()
            }
        );
        assert_eq!(
            decode("hal:"),
            TelemetryEvent::Unknown { raw: "hal:".into() }
        );
        assert_eq!(decode(""), TelemetryEvent::Unknown { raw: "".into() });
    }

    #[test]
    fn numeric_fields_round_trip_within_tolerance() {
        for (value, max, low, med) in [
            (0.0_f64, 100.0_f64, 20.0_f64, 40.0_f64),
            (12.65, 15.0, 11.5, 12.0),
            (-3.25, 50.0, 5.0, 10.0),
        ] {
            let text = format!("hal: Bat1 {value} max={max} alertLow={low} alertMed={med}");
            match decode(&text) {
                TelemetryEvent::Reading {
                    value: v,
                    max: m,
                    alert_low: l,
                    alert_med: d,
                    ..
                } => {
                    assert!((v - value).abs() < 1e-9);
                    assert!((m - max).abs() < 1e-9);
                    assert!((l - low).abs() < 1e-9);
                    assert!((d - med).abs() < 1e-9);
                }
                other => panic!("expected reading for {text:?}, got {other:?}"),
            }
        }
    }
}

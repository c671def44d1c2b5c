// crates/telemetry/src/alert.rs
//! Alert severity derivation.
//!
//! Severity is never stored — it is recomputed from the current value and
//! threshold pair on every update, so there is no stale alert state to clear.

/// Derived alert level for a reading.
///
/// `None` is the terminal "green" state. For normal devices lower readings
/// are worse (battery voltage, temperature); for inverted devices higher
/// readings are worse (bilge fill level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    None,
    Medium,
    High,
}

impl Severity {
    /// Background color the dashboard paints for this level.
    pub fn color(self) -> &'static str {
        match self {
            Severity::None => "green",
            Severity::Medium => "orange",
            Severity::High => "red",
        }
    }
}

/// Compute severity from a value, its threshold pair, and polarity.
///
/// Non-inverted: `value < alert_low` is High, `value < alert_med` is Medium.
/// Inverted: `value > alert_med` is High, `value > alert_low` is Medium.
pub fn severity(value: f64, alert_low: f64, alert_med: f64, inverted: bool) -> Severity {
    if inverted {
        if value > alert_med {
            Severity::High
        } else if value > alert_low {
            Severity::Medium
        } else {
            Severity::None
        }
    } else if value < alert_low {
        Severity::High
    } else if value < alert_med {
        Severity::Medium
    } else {
        Severity::None
    }
}

/// Whether the audible alarm should fire: only on High, and only while the
/// global silence flag is off.
pub fn should_sound(severity: Severity, silenced: bool) -> bool {
    severity == Severity::High && !silenced
}

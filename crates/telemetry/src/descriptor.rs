// crates/telemetry/src/descriptor.rs
//! Name-pattern to display-descriptor resolution.
//!
//! Unit, polarity, and chart color all follow from the device name by
//! convention (devices announce nothing else about themselves). The mapping
//! is resolved once when a device record is created and cached on the
//! record, never re-derived by string matching afterwards.

/// Display and behavior traits of a device, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Display unit suffix, empty when no rule matches.
    pub unit: &'static str,
    /// Higher readings are worse (fill levels) when set.
    pub inverted: bool,
    /// Stable chart/border color, hashed from the name.
    pub color: &'static str,
}

/// Substring rules tried in order against the lowercased name.
const UNIT_RULES: &[(&str, &str, bool)] = &[
    ("temp", "°C", false),
    ("bat", "V", false),
    ("bilge", "Level", true),
    ("current", "A", false),
    ("rpm", "RPM", false),
];

const PALETTE: [&str; 20] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3",
    "#808000", "#ffd8b1", "#000075", "#808080",
];

impl DeviceDescriptor {
    /// Resolve the descriptor for a device name.
    pub fn resolve(name: &str) -> Self {
        let lower = name.to_lowercase();
        let (unit, inverted) = UNIT_RULES
            .iter()
            .find(|(pattern, _, _)| lower.contains(pattern))
            .map(|&(_, unit, inverted)| (unit, inverted))
            .unwrap_or(("", false));

        let hash: usize = name.bytes().map(usize::from).sum();
        Self {
            unit,
            inverted,
            color: PALETTE[hash % PALETTE.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_follow_name_substrings() {
        assert_eq!(DeviceDescriptor::resolve("Temp1").unit, "°C");
        assert_eq!(DeviceDescriptor::resolve("Bat2").unit, "V");
        assert_eq!(DeviceDescriptor::resolve("BilgeFwd").unit, "Level");
        assert_eq!(DeviceDescriptor::resolve("ShoreCurrent").unit, "A");
        assert_eq!(DeviceDescriptor::resolve("EngineRPM").unit, "RPM");
        assert_eq!(DeviceDescriptor::resolve("Mystery").unit, "");
    }

    #[test]
    fn only_fill_levels_are_inverted() {
        assert!(DeviceDescriptor::resolve("Bilge").inverted);
        assert!(DeviceDescriptor::resolve("bilgeAft").inverted);
        assert!(!DeviceDescriptor::resolve("Temp1").inverted);
        assert!(!DeviceDescriptor::resolve("Bat1").inverted);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(DeviceDescriptor::resolve("TEMP1").unit, "°C");
        assert_eq!(DeviceDescriptor::resolve("BILGE").unit, "Level");
    }

    #[test]
    fn color_is_stable_per_name() {
        let a = DeviceDescriptor::resolve("Bat1");
        let b = DeviceDescriptor::resolve("Bat1");
        assert_eq!(a.color, b.color);
        assert!(PALETTE.contains(&a.color));
    }
}

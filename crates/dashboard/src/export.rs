// crates/dashboard/src/export.rs
//! CSV export of device history.

use std::fmt::Write;

use helmview_telemetry::DeviceStore;

/// Render every device's history as `Device,Timestamp,Value` rows, devices
/// in name order, samples oldest first.
pub fn history_csv(store: &DeviceStore) -> String {
    let mut csv = String::from("Device,Timestamp,Value\n");

    let mut devices: Vec<_> = store.iter().collect();
    devices.sort_by(|a, b| a.name.cmp(&b.name));

    for device in devices {
        for point in device.history() {
            // Write into a String cannot fail.
            let _ = writeln!(
                csv,
                "{},\"{}\",\"{}\"",
                device.name,
                point.timestamp.to_rfc3339(),
                point.value
            );
        }
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        "2026-08-29T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn empty_store_exports_header_only() {
        assert_eq!(history_csv(&DeviceStore::new()), "Device,Timestamp,Value\n");
    }

    #[test]
    fn rows_are_grouped_by_device_in_name_order() {
        let mut store = DeviceStore::new();
        store.apply_reading("Temp", 21.0, 100.0, 20.0, 40.0, t0());
        store.apply_reading("Bat1", 12.5, 15.0, 11.5, 12.0, t0());
        store.apply_reading("Bat1", 12.6, 15.0, 11.5, 12.0, t0());

        let csv = history_csv(&store);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Device,Timestamp,Value");
        assert_eq!(lines[1], "Bat1,\"2026-08-29T12:00:00+00:00\",\"12.5\"");
        assert_eq!(lines[2], "Bat1,\"2026-08-29T12:00:00+00:00\",\"12.6\"");
        assert_eq!(lines[3], "Temp,\"2026-08-29T12:00:00+00:00\",\"21\"");
    }

    #[test]
    fn gps_contributes_no_rows() {
        let mut store = DeviceStore::new();
        store.apply_gps_fix(51.5, -0.1, t0());
        assert_eq!(history_csv(&store), "Device,Timestamp,Value\n");
    }
}

// crates/types/src/lib.rs
//! Shared wire types for the helm-view relay and dashboard.
//!
//! The protocol is deliberately small: a JSON envelope over WebSocket text
//! frames, externally tagged by `type`. Sensor devices and browser dashboards
//! speak the exact same envelope — the telemetry sub-protocol lives inside
//! the `text` field of a chat envelope and is opaque to the relay.

use serde::{Deserialize, Serialize};

/// Display name used for connections that never sent a `setName` envelope.
pub const DEFAULT_USERNAME: &str = "Unknown";

/// The outer wire message.
///
/// Inbound, clients send either variant. Outbound, the relay only ever fans
/// out `Chat` envelopes, stamped with the sender's display name and a
/// server-assigned wall-clock time. The relay never rewrites `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Envelope {
    /// Sets the per-connection display name used to stamp future broadcasts.
    /// Does not broadcast by itself.
    SetName {
        #[serde(default)]
        username: Option<String>,
    },
    /// A telemetry or command payload. `username` and `time` are absent on
    /// inbound frames and filled in by the relay before fan-out.
    Chat {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
    },
}

impl Envelope {
    /// An unstamped chat envelope, as a client would send it.
    pub fn chat(text: impl Into<String>) -> Self {
        Envelope::Chat {
            text: text.into(),
            username: None,
            time: None,
        }
    }

    /// A stamped chat envelope, as the relay broadcasts it.
    pub fn stamped_chat(
        text: impl Into<String>,
        username: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Envelope::Chat {
            text: text.into(),
            username: Some(username.into()),
            time: Some(time.into()),
        }
    }
}

// crates/relay/src/state.rs
//! Connection registry and broadcast fan-out.
//!
//! The registry tracks open sockets from both populations (sensor devices
//! and browser dashboards) with no protocol distinction between them: once
//! accepted, every connection receives every broadcast through the same
//! path. Device/browser state lives entirely on the consuming side — the
//! relay retains nothing but membership and a display name.

use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use helmview_types::{Envelope, DEFAULT_USERNAME};

/// Which listening endpoint a connection arrived on. Informational only —
/// both populations share the registry and the fan-out path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    /// Plaintext endpoint for constrained sensor devices.
    Device,
    /// TLS endpoint for human dashboards.
    Browser,
}

impl Population {
    pub fn label(self) -> &'static str {
        match self {
            Population::Device => "device",
            Population::Browser => "browser",
        }
    }
}

/// A registered client's sending half and stamp metadata.
pub struct ClientConnection {
    pub population: Population,
    /// Display name stamped onto this connection's outbound broadcasts.
    pub username: String,
    /// Queue into the per-connection writer task; fire-and-forget so one
    /// slow consumer never blocks delivery to the rest.
    pub tx: mpsc::UnboundedSender<String>,
    pub connected_at: Instant,
}

/// Shared relay state.
#[derive(Clone, Default)]
pub struct RelayState {
    /// Active connections, keyed by a per-socket id.
    connections: Arc<DashMap<Uuid, ClientConnection>>,
}

impl RelayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to the registry, returning its id.
    pub fn register(&self, population: Population, tx: mpsc::UnboundedSender<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.connections.insert(
            id,
            ClientConnection {
                population,
                username: DEFAULT_USERNAME.to_string(),
                tx,
                connected_at: Instant::now(),
            },
        );
        id
    }

    /// Remove a connection. No-op when already removed.
    pub fn unregister(&self, id: Uuid) {
        self.connections.remove(&id);
    }

    /// Update the display name used to stamp this connection's future
    /// broadcasts. Does not broadcast by itself.
    pub fn set_name(&self, id: Uuid, username: &str) {
        if let Some(mut conn) = self.connections.get_mut(&id) {
            conn.username = username.to_string();
        }
    }

    /// The sender's current display name, defaulting to "Unknown".
    pub fn username(&self, id: Uuid) -> String {
        self.connections
            .get(&id)
            .map(|c| c.username.clone())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
    }

    /// Wrap an inbound chat text in a stamped envelope: sender's last-set
    /// username plus a server-assigned wall-clock time. `text` is untouched.
    pub fn stamp(&self, sender: Uuid, text: String) -> Envelope {
        Envelope::stamped_chat(text, self.username(sender), wall_clock_time())
    }

    /// Serialize once and fan out to every open connection. Best-effort: a
    /// failed send is logged and skipped, never aborting the rest. Dead
    /// connections prune themselves on their own close/error path.
    /// Returns the number of queues the message reached.
    pub fn broadcast(&self, envelope: &Envelope) -> usize {
        let msg = match serde_json::to_string(envelope) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(error = %e, "failed to serialize broadcast envelope");
                return 0;
            }
        };

        let mut delivered = 0;
        for conn in self.connections.iter() {
            if conn.tx.send(msg.clone()).is_ok() {
                delivered += 1;
            } else {
                debug!(id = %conn.key(), "skipping closed connection during fan-out");
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

fn wall_clock_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

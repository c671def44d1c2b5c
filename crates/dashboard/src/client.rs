// crates/dashboard/src/client.rs
//! WebSocket client: connects to the relay, feeds inbound chat texts through
//! the pipeline, pushes queued outbound commands, and runs the periodic
//! staleness sweeps. Reconnects with capped exponential backoff.

use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use helmview_types::Envelope;

use crate::app::{Dashboard, DashboardEvent};

pub struct ClientConfig {
    /// Relay WebSocket URL, e.g. `wss://host:3003/ws`.
    pub relay_url: String,
    /// Display name announced via `setName` on connect.
    pub username: String,
    pub max_reconnect_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: "ws://127.0.0.1:3003/ws".to_string(),
            username: "Helm Dashboard".to_string(),
            max_reconnect_delay: Duration::from_secs(30),
        }
    }
}

/// Run the client until the process dies. `commands` carries outbound chat
/// texts (silence toggles, IO switches, resets) queued by the caller.
pub async fn run(
    dashboard: &mut Dashboard,
    config: &ClientConfig,
    commands: &mut mpsc::UnboundedReceiver<String>,
) -> anyhow::Result<()> {
    let mut backoff = Duration::from_secs(1);
    loop {
        match connect_and_stream(dashboard, config, commands).await {
            Ok(()) => {
                info!("relay connection closed");
                backoff = Duration::from_secs(1);
            }
            Err(e) => {
                warn!(backoff_secs = backoff.as_secs(), "relay connection failed: {e:#}");
            }
        }
        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(config.max_reconnect_delay);
    }
}

async fn connect_and_stream(
    dashboard: &mut Dashboard,
    config: &ClientConfig,
    commands: &mut mpsc::UnboundedReceiver<String>,
) -> anyhow::Result<()> {
    let (ws_stream, _) = connect_async(config.relay_url.as_str())
        .await
        .context("WS connect failed")?;
    let (mut sink, mut stream) = ws_stream.split();

    let set_name = serde_json::to_string(&Envelope::SetName {
        username: Some(config.username.clone()),
    })?;
    sink.send(Message::Text(set_name.into()))
        .await
        .context("setName send failed")?;
    info!(relay = %config.relay_url, "connected to relay");

    // Fade sweep every 10s, motor banner check every 5s.
    let mut fade_tick = tokio::time::interval(Duration::from_secs(10));
    let mut banner_tick = tokio::time::interval(Duration::from_secs(5));
    let mut banner_visible = dashboard.motor_banner_visible(Utc::now());

    loop {
        tokio::select! {
            msg = stream.next() => match msg {
                Some(Ok(Message::Text(text))) => handle_incoming(dashboard, &text),
                Some(Ok(Message::Close(_))) | None => return Ok(()),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("WS read failed"),
            },
            Some(text) = commands.recv() => {
                let envelope = serde_json::to_string(&Envelope::chat(text))?;
                sink.send(Message::Text(envelope.into()))
                    .await
                    .context("command send failed")?;
            }
            _ = fade_tick.tick() => {
                for name in dashboard.devices().stale_names(Utc::now()) {
                    debug!(device = name, "no reading for over a minute, fading");
                }
            }
            _ = banner_tick.tick() => {
                let visible = dashboard.motor_banner_visible(Utc::now());
                if visible != banner_visible {
                    banner_visible = visible;
                    if visible {
                        warn!("all motors offline");
                    } else {
                        info!("motor telemetry restored");
                    }
                }
            }
        }
    }
}

/// Parse one inbound frame and run it through the pipeline, logging where a
/// browser would paint.
fn handle_incoming(dashboard: &mut Dashboard, raw: &str) {
    let envelope = match serde_json::from_str::<Envelope>(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, raw, "dropping malformed frame");
            return;
        }
    };

    let Envelope::Chat {
        text,
        username,
        time,
    } = envelope
    else {
        // setName is client→relay only; ignore if echoed.
        return;
    };

    let from = username.unwrap_or_default();
    let at = time.unwrap_or_default();

    match dashboard.handle_text(&text, Utc::now()) {
        DashboardEvent::DeviceUpdated {
            name,
            value,
            severity,
            sound,
        } => {
            info!(device = %name, value, color = severity.color(), from = %from, "device updated");
            if sound {
                warn!(device = %name, value, "ALARM: critical reading");
            }
        }
        DashboardEvent::MotorUpdated {
            name,
            value,
            severity,
        } => {
            info!(motor = %name, value, color = severity.color(), "motor temperature updated");
        }
        DashboardEvent::GpsUpdated { lat, lon } => {
            info!(lat, lon, "position updated");
        }
        DashboardEvent::IoAcknowledged { pin, state, .. } => {
            info!(pin, state = state.as_str(), "IO state acknowledged");
        }
        DashboardEvent::ResetAcknowledged { name } => {
            info!(device = %name, "reset acknowledged");
        }
        DashboardEvent::SilenceChanged { silenced } => {
            info!(silenced, "alarm mute changed");
        }
        DashboardEvent::Unrecognized { raw } => {
            debug!(raw, at = %at, "message matched no known pattern");
        }
    }
}

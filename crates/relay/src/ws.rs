// crates/relay/src/ws.rs
//! Per-socket handling: accept, register, read frames, fan out, prune.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use helmview_types::{Envelope, DEFAULT_USERNAME};

use crate::state::{Population, RelayState};

pub async fn browser_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<RelayState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state, Population::Browser))
}

pub async fn device_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<RelayState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state, Population::Device))
}

async fn handle_socket(socket: WebSocket, state: RelayState, population: Population) {
    let (mut sink, mut stream) = socket.split();

    // Writer task drains the per-connection queue into the sink, so the
    // read loop (and the fan-out path) never awaits a slow consumer.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let id = state.register(population, tx);
    info!(%id, endpoint = population.label(), "client connected");

    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Each inbound frame is handled to completion before the next is read,
    // so messages from one connection broadcast in arrival order.
    while let Some(Ok(msg)) = stream.next().await {
        match msg {
            Message::Text(text) => handle_frame(&state, id, population, &text),
            Message::Close(_) => break,
            // Pong replies are handled by axum.
            _ => {}
        }
    }

    state.unregister(id);
    writer.abort();
    info!(%id, endpoint = population.label(), "client disconnected");
}

/// Decode one inbound frame and act on it. Malformed payloads are dropped
/// with a diagnostic; the connection stays open.
fn handle_frame(state: &RelayState, id: Uuid, population: Population, raw: &str) {
    match serde_json::from_str::<Envelope>(raw) {
        Ok(Envelope::SetName { username }) => {
            let name = username
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
            info!(%id, endpoint = population.label(), name = %name, "client set name");
            state.set_name(id, &name);
        }
        Ok(Envelope::Chat { text, .. }) => {
            // Inbound username/time stamps are ignored; the relay assigns
            // its own before fan-out and never rewrites the text.
            let stamped = state.stamp(id, text);
            let delivered = state.broadcast(&stamped);
            debug!(%id, delivered, "chat fanned out");
        }
        Err(e) => {
            warn!(
                %id,
                endpoint = population.label(),
                error = %e,
                raw,
                "dropping malformed frame"
            );
        }
    }
}

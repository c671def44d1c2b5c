// crates/relay/src/lib.rs
//! The helm-view relay: a single hub that accepts WebSocket connections from
//! sensor devices and browser dashboards, and broadcasts every chat envelope
//! to all of them.
//!
//! Two listening endpoints terminate into the identical socket logic: the
//! browser endpoint additionally serves the static dashboard assets (and TLS
//! when configured), the device endpoint is plaintext WebSocket only so
//! constrained microcontrollers can skip transport security. Devices receive
//! dashboard commands through the exact same fan-out path browsers receive
//! telemetry.

pub mod config;
pub mod state;
pub mod tls;
pub mod ws;

use std::path::Path;

use axum::{routing::get, Router};
use state::RelayState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Router for the browser endpoint: `/ws`, `/health`, and the static
/// dashboard assets when a directory is configured (API-only otherwise).
pub fn browser_app(state: RelayState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/ws", get(ws::browser_ws_handler));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router for the plaintext device endpoint: WebSocket and health only, no
/// files.
pub fn device_app(state: RelayState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/ws", get(ws::device_ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

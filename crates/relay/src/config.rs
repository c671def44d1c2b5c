// crates/relay/src/config.rs
//! Relay configuration from CLI flags with env-var fallbacks.

use std::path::PathBuf;

use clap::Parser;

/// Default port for the browser (WSS + static assets) endpoint.
pub const DEFAULT_BROWSER_PORT: u16 = 3003;
/// Default port for the plaintext device endpoint.
pub const DEFAULT_DEVICE_PORT: u16 = 3002;

#[derive(Debug, Parser)]
#[command(name = "helmview-relay", about = "Boat telemetry relay server")]
pub struct RelayConfig {
    /// Port for the browser endpoint (serves static assets, TLS when
    /// configured).
    #[arg(long, env = "HELMVIEW_BROWSER_PORT", default_value_t = DEFAULT_BROWSER_PORT)]
    pub browser_port: u16,

    /// Port for the plaintext device endpoint (WebSocket only).
    #[arg(long, env = "HELMVIEW_DEVICE_PORT", default_value_t = DEFAULT_DEVICE_PORT)]
    pub device_port: u16,

    /// Directory of static dashboard assets. Omit for API-only mode.
    #[arg(long, env = "HELMVIEW_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// PEM certificate chain for the browser endpoint. Without a cert/key
    /// pair the browser endpoint serves plain HTTP (dev mode).
    #[arg(long, env = "HELMVIEW_TLS_CERT", requires = "tls_key")]
    pub tls_cert: Option<PathBuf>,

    /// PEM private key for the browser endpoint.
    #[arg(long, env = "HELMVIEW_TLS_KEY", requires = "tls_cert")]
    pub tls_key: Option<PathBuf>,
}

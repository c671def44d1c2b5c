// crates/relay/src/main.rs
use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use helmview_relay::config::RelayConfig;
use helmview_relay::state::RelayState;
use helmview_relay::{browser_app, device_app, tls};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,helmview_relay=info".into()),
        )
        .init();

    let config = RelayConfig::parse();
    let state = RelayState::new();

    let browser_app = browser_app(state.clone(), config.static_dir.as_deref());
    let device_app = device_app(state);

    // Device endpoint: plaintext, runs in the background.
    let device_addr = SocketAddr::from(([0, 0, 0, 0], config.device_port));
    let device_listener = tokio::net::TcpListener::bind(device_addr)
        .await
        .with_context(|| format!("binding device endpoint {device_addr}"))?;
    info!("device endpoint listening on {device_addr} (plaintext)");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(device_listener, device_app).await {
            tracing::error!(error = %e, "device endpoint exited");
        }
    });

    // Browser endpoint: TLS when a cert/key pair is configured.
    let browser_addr = SocketAddr::from(([0, 0, 0, 0], config.browser_port));
    let browser_listener = tokio::net::TcpListener::bind(browser_addr)
        .await
        .with_context(|| format!("binding browser endpoint {browser_addr}"))?;

    match (&config.tls_cert, &config.tls_key) {
        (Some(cert), Some(key)) => {
            let acceptor = tls::load_acceptor(cert, key)?;
            info!("browser endpoint listening on {browser_addr} (TLS)");
            tls::serve(browser_listener, acceptor, browser_app).await?;
        }
        _ => {
            info!("browser endpoint listening on {browser_addr} (plaintext, no TLS configured)");
            axum::serve(browser_listener, browser_app).await?;
        }
    }

    Ok(())
}

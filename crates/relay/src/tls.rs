// crates/relay/src/tls.rs
//! TLS termination for the browser endpoint.
//!
//! The relay runs on the boat's router with Let's Encrypt PEM files on disk;
//! no reverse proxy in front. Accepted streams are handshaken with
//! tokio-rustls and then served through hyper-util's auto builder, which
//! keeps WebSocket upgrades working over the TLS stream.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::debug;

/// Build a TLS acceptor from PEM certificate chain and private key files.
pub fn load_acceptor(cert_path: &Path, key_path: &Path) -> anyhow::Result<TlsAcceptor> {
    let mut cert_reader = BufReader::new(
        File::open(cert_path)
            .with_context(|| format!("opening certificate {}", cert_path.display()))?,
    );
    let certs = rustls_pemfile::certs(&mut cert_reader)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("reading certificate chain {}", cert_path.display()))?;

    let mut key_reader = BufReader::new(
        File::open(key_path)
            .with_context(|| format!("opening private key {}", key_path.display()))?,
    );
    let key = rustls_pemfile::private_key(&mut key_reader)
        .with_context(|| format!("reading private key {}", key_path.display()))?
        .with_context(|| format!("no private key found in {}", key_path.display()))?;

    let config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("building TLS server config")?;

    Ok(TlsAcceptor::from(Arc::new(config)))
}

/// Accept loop for the TLS browser endpoint. Each connection gets its own
/// task; a failed handshake only costs that connection.
pub async fn serve(
    listener: TcpListener,
    acceptor: TlsAcceptor,
    app: Router,
) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let acceptor = acceptor.clone();
        let app = app.clone();

        tokio::spawn(async move {
            let tls_stream = match acceptor.accept(stream).await {
                Ok(tls_stream) => tls_stream,
                Err(e) => {
                    debug!(%peer, error = %e, "TLS handshake failed");
                    return;
                }
            };

            let service = TowerToHyperService::new(app);
            if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                .serve_connection_with_upgrades(TokioIo::new(tls_stream), service)
                .await
            {
                debug!(%peer, error = %e, "connection closed with error");
            }
        });
    }
}

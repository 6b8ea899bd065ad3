//! HTTP/HTTPS server startup logic.
//!
//! Binds `0.0.0.0:<port>` and serves until the handle is shut down (or the
//! process receives SIGTERM/SIGINT). Any failure to provision or load TLS
//! material is fatal; there is no fallback to plain HTTP.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Once;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::{ServerConfig, TlsMode};
use crate::tls;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Failed to provision dev certificate: {0}")]
    Provision(#[from] tls::TlsError),

    #[error("Failed to load TLS configuration: {0}")]
    TlsConfig(String),

    #[error("Server error: {0}")]
    Server(String),
}

static CRYPTO_PROVIDER: Once = Once::new();

/// Pin the process-level rustls CryptoProvider to aws-lc-rs. rustls refuses
/// to choose when another linked crate enables a second provider, so this
/// must run before any TLS config is built.
fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    });
}

/// Start the HTTP/HTTPS server based on configuration.
///
/// Blocks until the server shuts down. The `handle` can be used by the
/// caller to shut the listener down deterministically and to learn the
/// bound address (`handle.listening()`).
pub async fn start_server(
    app: Router,
    config: &ServerConfig,
    handle: Handle,
) -> Result<(), ServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    match config.tls_mode() {
        TlsMode::None => start_plain_server(app, addr, handle).await,
        TlsMode::Dev => {
            let (cert, key) = tls::ensure_dev_certificate(&config.root_dir)?;
            tracing::warn!(
                "Serving with a self-signed certificate - browsers will show an \
                 untrusted-certificate warning; proceed via 'Advanced' to continue"
            );
            start_tls_server(app, addr, &cert, &key, handle).await
        }
        TlsMode::Manual { cert, key } => start_tls_server(app, addr, &cert, &key, handle).await,
    }
}

/// Start a plain HTTP server (no TLS).
async fn start_plain_server(
    app: Router,
    addr: SocketAddr,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server (no TLS)");
    tracing::info!("Access at: http://localhost:{}", addr.port());

    shutdown::setup_shutdown_handler(handle.clone());

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}

/// Start an HTTPS server with the given certificate chain and private key.
async fn start_tls_server(
    app: Router,
    addr: SocketAddr,
    cert_path: &Path,
    key_path: &Path,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::info!(
        %addr,
        cert = %cert_path.display(),
        key = %key_path.display(),
        "Starting HTTPS server"
    );
    tracing::info!("Access at: https://localhost:{}", addr.port());

    install_crypto_provider();

    let rustls_config = RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(|e| ServerError::TlsConfig(format!("Failed to load certificates: {}", e)))?;

    shutdown::setup_shutdown_handler(handle.clone());

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}

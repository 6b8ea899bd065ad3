//! HTTP server module with TLS support.
//!
//! Supports three TLS modes:
//! - **Dev**: Self-signed certificate, generated in the served directory on
//!   first run and reused afterwards
//! - **Manual**: User-provided certificate and key files
//! - **None**: Plain HTTP
//!
//! The server includes graceful shutdown on SIGTERM/SIGINT; the
//! `axum_server::Handle` passed to [`start_server`] doubles as a
//! deterministic shutdown hook for embedding code and tests.

mod server;
mod shutdown;
mod static_files;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use server::{start_server, ServerError};
pub use static_files::create_static_service;

/// Build the application router: every path falls through to the static
/// file service rooted at the configured directory.
pub fn create_router(config: &ServerConfig) -> Router {
    Router::new()
        .fallback_service(create_static_service(&config.root_dir))
        .layer(TraceLayer::new_for_http())
}

//! Signal-driven shutdown.
//!
//! Ctrl+C or SIGTERM stops the listener and drains in-flight connections
//! before the process exits. Embedders and tests bypass signals entirely by
//! calling into the `Handle` themselves.

use axum_server::Handle;

/// Upper bound on connection draining once shutdown starts
const SHUTDOWN_GRACE_SECS: u64 = 5;

/// Install the signal listener that shuts the server down.
///
/// The first Ctrl+C or SIGTERM makes the handle stop accepting new
/// connections; in-flight requests get the grace period to finish.
pub fn setup_shutdown_handler(handle: Handle) {
    tokio::spawn(async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C, initiating graceful shutdown");
            }
            _ = terminate => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown");
            }
        }

        handle.graceful_shutdown(Some(std::time::Duration::from_secs(SHUTDOWN_GRACE_SECS)));
        tracing::info!(
            "Graceful shutdown initiated, waiting up to {} seconds for connections to close",
            SHUTDOWN_GRACE_SECS
        );
    });
}

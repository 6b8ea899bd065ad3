//! devserve: a static-file HTTP/HTTPS server for local development.
//!
//! This is the application entry point. It initializes tracing, resolves the
//! server configuration from the command line and environment, builds the
//! static-file router, and starts the HTTP/HTTPS server.

use std::path::PathBuf;

use axum_server::Handle;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devserve::config::{ServerConfig, DEFAULT_LOG_FILTER};
use devserve::http::{create_router, start_server};

/// devserve: serve a directory over HTTP or HTTPS
#[derive(Parser, Debug)]
#[command(name = "devserve", version, about)]
struct Args {
    /// Port to listen on (default 8000)
    #[arg(allow_hyphen_values = true)]
    port: Option<String>,

    /// Directory to serve; also where dev-mode certificates are kept
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Log level filter (e.g., "devserve=debug,tower_http=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Resolve configuration; a bad port or cert/key pairing is reported on
    // stdout and terminates before any socket is opened
    let config = match ServerConfig::resolve(args.port.as_deref(), args.dir) {
        Ok(config) => config,
        Err(e) => {
            println!("{e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        dir = %config.root_dir.display(),
        scheme = config.scheme(),
        dev_mode = config.dev_mode,
        "Resolved configuration"
    );

    let app = create_router(&config);
    let handle = Handle::new();

    if let Err(e) = start_server(app, &config, handle).await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

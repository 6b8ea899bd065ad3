//! devserve - a static-file HTTP/HTTPS server for local development.
//!
//! Serves the contents of a directory over HTTP, or HTTPS using either a
//! self-signed certificate generated on first run (dev mode) or an
//! operator-supplied certificate/key pair.

pub mod config;
pub mod http;
pub mod tls;

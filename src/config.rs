//! Configuration resolution and constants.
//!
//! Assembles a `ServerConfig` once at startup from the command line and
//! environment, then never mutates it. TLS is driven by two mutually
//! exclusive sources: the dev-mode flag (self-signed certificate, generated
//! on first run) or an explicit certificate/key pair given via environment
//! variables. Dev mode wins when both are present.

use std::env;
use std::path::PathBuf;

// =============================================================================
// Defaults and environment variable names
// =============================================================================

/// Port used when no argument is given
pub const DEFAULT_PORT: u16 = 8000;

/// Dev-mode flag; truthy only on an exact case-insensitive "true"
pub const ENV_DEV_MODE: &str = "DEVSERVE_DEV";

/// Path to a PEM certificate chain (ignored in dev mode)
pub const ENV_CERT_PATH: &str = "DEVSERVE_CERT";

/// Path to a PEM private key (ignored in dev mode)
pub const ENV_KEY_PATH: &str = "DEVSERVE_KEY";

/// Well-known certificate file written/reused in dev mode, relative to the root
pub const DEV_CERT_FILE: &str = "cert.pem";

/// Well-known key file written/reused in dev mode, relative to the root
pub const DEV_KEY_FILE: &str = "key.pem";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "devserve=info,tower_http=info";

/// Fully-resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (all interfaces)
    pub port: u16,
    /// Directory served as static content; also where dev certs live
    pub root_dir: PathBuf,
    /// Self-signed certificate mode
    pub dev_mode: bool,
    /// Operator-supplied certificate chain (non-dev mode only)
    pub cert_path: Option<PathBuf>,
    /// Operator-supplied private key (non-dev mode only)
    pub key_path: Option<PathBuf>,
}

/// How the listener is (or is not) wrapped in TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Plain HTTP
    None,
    /// Self-signed certificate in the root directory, generated if absent
    Dev,
    /// Operator-supplied certificate and key files
    Manual { cert: PathBuf, key: PathBuf },
}

impl ServerConfig {
    /// Resolve configuration from the given CLI values and the process
    /// environment. Reads environment and argument state only, no other
    /// side effects.
    pub fn resolve(port_arg: Option<&str>, root_dir: PathBuf) -> Result<Self, ConfigError> {
        Self::resolve_from(
            port_arg,
            root_dir,
            env::var(ENV_DEV_MODE).ok(),
            env::var(ENV_CERT_PATH).ok(),
            env::var(ENV_KEY_PATH).ok(),
        )
    }

    /// Resolution with environment values passed explicitly (testable without
    /// touching process-wide env state).
    fn resolve_from(
        port_arg: Option<&str>,
        root_dir: PathBuf,
        dev_var: Option<String>,
        cert_var: Option<String>,
        key_var: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match port_arg {
            Some(raw) => parse_port(raw)?,
            None => DEFAULT_PORT,
        };

        let dev_mode = dev_var
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        // Explicit paths are only consulted outside dev mode; empty values
        // count as unset.
        let (cert_path, key_path) = if dev_mode {
            (None, None)
        } else {
            (non_empty_path(cert_var), non_empty_path(key_var))
        };

        if cert_path.is_some() && key_path.is_none() {
            return Err(ConfigError::Validation(format!(
                "{ENV_KEY_PATH} must be set when {ENV_CERT_PATH} is set"
            )));
        }
        if key_path.is_some() && cert_path.is_none() {
            return Err(ConfigError::Validation(format!(
                "{ENV_CERT_PATH} must be set when {ENV_KEY_PATH} is set"
            )));
        }

        Ok(Self {
            port,
            root_dir,
            dev_mode,
            cert_path,
            key_path,
        })
    }

    /// True iff the listener will be wrapped in TLS.
    pub fn tls_enabled(&self) -> bool {
        self.dev_mode || self.cert_path.is_some()
    }

    /// The resolved TLS mode. Dev mode takes precedence over explicit paths.
    pub fn tls_mode(&self) -> TlsMode {
        if self.dev_mode {
            TlsMode::Dev
        } else {
            match (&self.cert_path, &self.key_path) {
                (Some(cert), Some(key)) => TlsMode::Manual {
                    cert: cert.clone(),
                    key: key.clone(),
                },
                _ => TlsMode::None,
            }
        }
    }

    /// URL scheme implied by the TLS mode, for the startup banner.
    pub fn scheme(&self) -> &'static str {
        if self.tls_enabled() {
            "https"
        } else {
            "http"
        }
    }
}

/// Parse a port argument. Rejects anything that is not an integer in
/// 1..=65535; the error message carries the literal offending value.
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidPort(raw.to_string())),
        Ok(port) => Ok(port),
    }
}

fn non_empty_path(var: Option<String>) -> Option<PathBuf> {
    var.filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(
        port: Option<&str>,
        dev: Option<&str>,
        cert: Option<&str>,
        key: Option<&str>,
    ) -> Result<ServerConfig, ConfigError> {
        ServerConfig::resolve_from(
            port,
            PathBuf::from("."),
            dev.map(String::from),
            cert.map(String::from),
            key.map(String::from),
        )
    }

    #[test]
    fn default_port_when_no_argument() {
        let config = resolve(None, None, None, None).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.tls_enabled());
        assert_eq!(config.tls_mode(), TlsMode::None);
    }

    #[test]
    fn explicit_port_argument() {
        let config = resolve(Some("3000"), None, None, None).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn non_integer_port_is_rejected_with_literal_value() {
        let err = parse_port("eighty").unwrap_err();
        assert_eq!(err.to_string(), "Invalid port number: eighty");
    }

    #[test]
    fn out_of_range_port_is_rejected() {
        assert_eq!(
            parse_port("70000").unwrap_err().to_string(),
            "Invalid port number: 70000"
        );
        assert_eq!(
            parse_port("-1").unwrap_err().to_string(),
            "Invalid port number: -1"
        );
        assert_eq!(
            parse_port("0").unwrap_err().to_string(),
            "Invalid port number: 0"
        );
    }

    #[test]
    fn port_range_bounds() {
        assert_eq!(parse_port("1").unwrap(), 1);
        assert_eq!(parse_port("65535").unwrap(), 65535);
    }

    #[test]
    fn dev_flag_is_case_insensitive_true_only() {
        for value in ["true", "TRUE", "True"] {
            let config = resolve(None, Some(value), None, None).unwrap();
            assert!(config.dev_mode);
            assert_eq!(config.tls_mode(), TlsMode::Dev);
        }
        for value in ["1", "yes", "on", "false", ""] {
            let config = resolve(None, Some(value), None, None).unwrap();
            assert!(!config.dev_mode, "{value:?} should not enable dev mode");
        }
    }

    #[test]
    fn dev_mode_takes_precedence_over_explicit_paths() {
        let config = resolve(None, Some("true"), Some("/tmp/c.pem"), Some("/tmp/k.pem")).unwrap();
        assert_eq!(config.tls_mode(), TlsMode::Dev);
        assert!(config.cert_path.is_none());
        assert!(config.key_path.is_none());
    }

    #[test]
    fn explicit_paths_select_manual_mode() {
        let config = resolve(None, None, Some("/tmp/c.pem"), Some("/tmp/k.pem")).unwrap();
        assert!(config.tls_enabled());
        assert_eq!(
            config.tls_mode(),
            TlsMode::Manual {
                cert: PathBuf::from("/tmp/c.pem"),
                key: PathBuf::from("/tmp/k.pem"),
            }
        );
    }

    #[test]
    fn cert_without_key_is_a_config_error() {
        let err = resolve(None, None, Some("/tmp/c.pem"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn key_without_cert_is_a_config_error() {
        let err = resolve(None, None, None, Some("/tmp/k.pem")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn empty_path_values_count_as_unset() {
        let config = resolve(None, None, Some(""), Some("")).unwrap();
        assert!(!config.tls_enabled());
        assert_eq!(config.tls_mode(), TlsMode::None);
    }
}

//! Dev-mode certificate provisioning.
//!
//! Ensures a self-signed certificate and private key exist at the well-known
//! paths in the served directory before TLS startup. An existing pair is
//! reused unchanged, so repeated runs never regenerate it. Generation happens
//! in-process with rcgen rather than shelling out to openssl, so a failure is
//! a typed error instead of a silently ignored child-process exit.

use std::path::{Path, PathBuf};

use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};

use crate::config::{DEV_CERT_FILE, DEV_KEY_FILE};

/// Validity window for generated certificates
const DEV_CERT_VALIDITY_DAYS: i64 = 365;

/// Subject and SAN for generated certificates
const DEV_CERT_COMMON_NAME: &str = "localhost";

/// Certificate provisioning error
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("Failed to generate self-signed certificate: {0}")]
    Generate(#[from] rcgen::Error),

    #[error("Failed to write certificate material: {0}")]
    Io(#[from] std::io::Error),
}

/// Ensure a usable self-signed certificate/key pair exists under `root_dir`,
/// generating one if either file is missing. Returns the resolved paths.
pub fn ensure_dev_certificate(root_dir: &Path) -> Result<(PathBuf, PathBuf), TlsError> {
    let cert_path = root_dir.join(DEV_CERT_FILE);
    let key_path = root_dir.join(DEV_KEY_FILE);

    if cert_path.exists() && key_path.exists() {
        tracing::debug!(
            cert = %cert_path.display(),
            key = %key_path.display(),
            "Reusing existing self-signed certificate"
        );
        return Ok((cert_path, key_path));
    }

    tracing::info!("Generating self-signed certificate...");

    let (cert_pem, key_pem) = generate_self_signed()?;
    std::fs::write(&cert_path, cert_pem)?;
    std::fs::write(&key_path, key_pem)?;

    tracing::info!(
        cert = %cert_path.display(),
        key = %key_path.display(),
        cn = DEV_CERT_COMMON_NAME,
        days = DEV_CERT_VALIDITY_DAYS,
        "Generated self-signed certificate"
    );

    Ok((cert_path, key_path))
}

/// Generate a self-signed certificate for `localhost` with an unencrypted
/// private key, both PEM-encoded.
fn generate_self_signed() -> Result<(String, String), rcgen::Error> {
    let mut params = CertificateParams::new(vec![DEV_CERT_COMMON_NAME.to_string()])?;
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, DEV_CERT_COMMON_NAME);
    params.not_before = time::OffsetDateTime::now_utc();
    params.not_after = params.not_before + time::Duration::days(DEV_CERT_VALIDITY_DAYS);

    let key_pair = KeyPair::generate()?;
    let cert = params.self_signed(&key_pair)?;

    Ok((cert.pem(), key_pair.serialize_pem()))
}

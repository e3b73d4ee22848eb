//! Server settings loaded via OrthoConfig and the session key they point at.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Shortest key file accepted; `Key::derive_from` needs at least 32 bytes.
pub(crate) const SESSION_KEY_MIN_LEN: usize = 64;

/// Settings for the HTTP server, read from `WISHLIST_*` variables, CLI
/// flags and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WISHLIST")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// File holding the cookie signing key.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`. Read from files and the environment
    /// only: a `SetTrue` flag would always report `false` when absent.
    #[ortho_config(default = true, skip_cli)]
    pub cookie_secure: bool,
    /// Fall back to a generated key when the key file is unreadable.
    #[ortho_config(default = false, skip_cli)]
    pub allow_ephemeral_key: bool,
    /// Pepper mixed into credential digests.
    pub credential_pepper: Option<String>,
}

/// Errors raised while preparing the session key.
#[derive(thiserror::Error, Debug)]
pub enum SessionKeyError {
    /// Reading the key file failed and no fallback was allowed.
    #[error("failed to read session key at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file is too short to derive a signing key from.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    TooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

impl ServerSettings {
    /// Socket address to bind, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`std::net::AddrParseError`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port.unwrap_or(DEFAULT_PORT);
        Ok(SocketAddr::new(host.parse()?, port))
    }

    /// Key file path, falling back to the mounted secret location.
    pub fn session_key_path(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH))
    }

    /// Pepper fed to the credential hasher; empty when unset.
    pub fn credential_pepper(&self) -> &str {
        self.credential_pepper.as_deref().unwrap_or_default()
    }

    /// Load the session signing key.
    ///
    /// Debug builds and `allow_ephemeral_key` tolerate a missing key file
    /// by generating a throwaway key. A present but short file is always
    /// rejected.
    ///
    /// # Errors
    /// Returns [`SessionKeyError`] when the key cannot be used.
    pub fn session_key(&self) -> Result<Key, SessionKeyError> {
        load_session_key(
            &self.session_key_path(),
            cfg!(debug_assertions) || self.allow_ephemeral_key,
        )
    }
}

fn load_session_key(path: &Path, allow_ephemeral: bool) -> Result<Key, SessionKeyError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionKeyError::TooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionKeyError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

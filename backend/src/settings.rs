//! Application configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `RISK_APPETITE_*` environment variables, and
//! configuration files, merged by OrthoConfig. Most values are optional on
//! the wire and accessors supply the defaults; the two switches carry their
//! defaults in the derive.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Credentials, CredentialsValidationError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_PATH: &str = "risk_appetite.sqlite3";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address did not parse as `host:port`.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        /// The rejected value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// Only one half of the administrator credentials was configured.
    #[error("admin_username and admin_password must be set together")]
    PartialAdmin,
    /// The configured administrator credentials are not acceptable.
    #[error("invalid administrator credentials: {0}")]
    AdminCredentials(#[from] CredentialsValidationError),
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RISK_APPETITE")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// SQLite database file holding registered accounts.
    pub database_path: Option<PathBuf>,
    /// Upper bound on pooled SQLite connections.
    pub pool_max_size: Option<u32>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`. Environment or file only; there is
    /// no CLI switch.
    #[ortho_config(default = true, skip_cli)]
    pub cookie_secure: bool,
    /// `SameSite` policy for the session cookie: `lax`, `strict`, or `none`.
    pub same_site: Option<String>,
    /// Permit a throwaway session key when the key file is unreadable.
    #[ortho_config(default = false, skip_cli)]
    pub allow_ephemeral_session_key: bool,
    /// Administrator account registered at startup when absent.
    pub admin_username: Option<String>,
    /// Password for [`AppSettings::admin_username`].
    pub admin_password: Option<String>,
}

impl AppSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database file, falling back to `risk_appetite.sqlite3`.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    /// Session key file, falling back to the mounted secret path.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie carries the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    /// Administrator credentials, when bootstrap is configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::PartialAdmin`] when only one of the two values
    /// is present, and [`SettingsError::AdminCredentials`] when they fail
    /// validation.
    pub fn admin_credentials(&self) -> Result<Option<Credentials>, SettingsError> {
        match (&self.admin_username, &self.admin_password) {
            (None, None) => Ok(None),
            (Some(username), Some(password)) => {
                Ok(Some(Credentials::try_from_parts(username, password)?))
            }
            _ => Err(SettingsError::PartialAdmin),
        }
    }
}

//! Session cookie configuration derived from [`AppSettings`].
//!
//! Validates the cookie toggles and loads the signing key so misconfiguration
//! fails at startup rather than on the first login.

pub mod fingerprint;

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

use crate::settings::AppSettings;

/// Minimum session key file length in bytes.
pub const SESSION_KEY_MIN_LEN: usize = 64;
const SAME_SITE_EXPECTED: &str = "lax|strict|none";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds may opt into a throwaway key.
    Debug,
    /// Release builds always require a key file.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated session cookie settings.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// The `SameSite` value is not recognised.
    #[error("invalid same_site value '{value}'; expected {expected}")]
    InvalidSameSite {
        /// The rejected value.
        value: String,
        /// Accepted spellings.
        expected: &'static str,
    },
    /// `SameSite=None` without the `Secure` attribute.
    #[error("same_site=none requires cookie_secure=true")]
    InsecureSameSiteNone,
    /// Reading the session key file failed and no fallback is permitted.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Key file location.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The key file is shorter than [`SESSION_KEY_MIN_LEN`].
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file location.
        path: PathBuf,
        /// Bytes found.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
    /// Release builds must not allow ephemeral session keys.
    #[error("allow_ephemeral_session_key must be false in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from application configuration.
///
/// # Errors
/// Returns [`SessionConfigError`] when the `SameSite` policy is unknown or
/// unsafe, when the key file is short, or when it is unreadable and no
/// ephemeral key is permitted.
///
/// # Examples
/// ```rust
/// use risk_appetite::inbound::http::session_config::{BuildMode, session_settings};
/// use risk_appetite::settings::AppSettings;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("risk_appetite_session_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
///
/// let settings = AppSettings {
///     bind_addr: None,
///     database_path: None,
///     pool_max_size: None,
///     session_key_file: Some(key_path.clone()),
///     cookie_secure: true,
///     same_site: Some("strict".into()),
///     allow_ephemeral_session_key: false,
///     admin_username: None,
///     admin_password: None,
/// };
/// let session = session_settings(&settings, BuildMode::Release)?;
/// assert!(session.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    settings: &AppSettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = settings.cookie_secure();
    let same_site = parse_same_site(settings.same_site.as_deref(), cookie_secure)?;
    if mode == BuildMode::Release && settings.allow_ephemeral_session_key {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = load_key(
        settings.session_key_file(),
        settings.allow_ephemeral_session_key,
    )?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn parse_same_site(value: Option<&str>, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
    let Some(value) = value else {
        return Ok(SameSite::Lax);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ => Err(SessionConfigError::InvalidSameSite {
            value: value.to_owned(),
            expected: SAME_SITE_EXPECTED,
        }),
    }
}

fn load_key(path: PathBuf, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
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
                "using temporary session key; sessions will not survive a restart"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

#[cfg(test)]
mod tests;

//! Driving port for registration and login.
//!
//! Inbound adapters call this port to create accounts and check passwords
//! without knowing how hashes are produced or where accounts live. HTTP
//! handler tests substitute a double instead of wiring SQLite.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{Credentials, Error};

use super::define_port_error;

define_port_error! {
    /// Failures surfaced by the credential store.
    pub enum CredentialStoreError {
        /// The username already belongs to an account.
        UsernameTaken { username: String } => "username `{username}` is already registered",
        /// Storage could not be reached.
        StorageUnavailable { message: String } => "credential storage unavailable: {message}",
        /// Storage was reached but the operation failed.
        StorageFailure { message: String } => "credential storage failed: {message}",
        /// The hashing policy could not produce or read a digest.
        Hashing { message: String } => "credential hashing failed: {message}",
    }
}

/// Domain use-case port for the credential store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create an account; an existing username is never overwritten.
    async fn register(&self, credentials: &Credentials) -> Result<(), CredentialStoreError>;

    /// Return `true` only when the account exists and the password matches.
    async fn validate(&self, credentials: &Credentials) -> Result<bool, CredentialStoreError>;
}

impl From<CredentialStoreError> for Error {
    fn from(err: CredentialStoreError) -> Self {
        match err {
            CredentialStoreError::UsernameTaken { username } => {
                Error::conflict("username already registered")
                    .with_details(json!({ "field": "username", "username": username }))
            }
            CredentialStoreError::StorageUnavailable { message } => {
                Error::service_unavailable(format!("credential storage unavailable: {message}"))
            }
            CredentialStoreError::StorageFailure { message }
            | CredentialStoreError::Hashing { message } => Error::internal(message),
        }
    }
}

//! Credential store domain service.
//!
//! Combines the user repository with the password hashing policy to
//! implement the [`CredentialStore`] driving port. Username uniqueness is left
//! to the repository's storage constraint; the service never checks for an
//! existing account before inserting.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CredentialStore, CredentialStoreError, PasswordHashError, PasswordHasher, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Credentials, UserAccount};

fn map_persistence_error(error: UserPersistenceError) -> CredentialStoreError {
    match error {
        UserPersistenceError::Connection { message } => {
            CredentialStoreError::storage_unavailable(message)
        }
        UserPersistenceError::Query { message } => CredentialStoreError::storage_failure(message),
        UserPersistenceError::DuplicateUsername { username } => {
            CredentialStoreError::username_taken(username)
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> CredentialStoreError {
    CredentialStoreError::hashing(error.to_string())
}

/// Result of seeding the configured administrator account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The account did not exist and was registered.
    Created,
    /// An account with that username already existed and was left untouched.
    AlreadyPresent,
}

/// Credential store backed by a user repository and a password hasher.
#[derive(Clone)]
pub struct CredentialService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> CredentialService<R, H> {
    /// Create a new service from its collaborators.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<R, H> CredentialService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    /// Register the configured administrator unless the username exists.
    ///
    /// An existing account keeps its stored password even when the
    /// configured one differs.
    pub async fn bootstrap_admin(
        &self,
        credentials: &Credentials,
    ) -> Result<BootstrapOutcome, CredentialStoreError> {
        match self.register(credentials).await {
            Ok(()) => Ok(BootstrapOutcome::Created),
            Err(CredentialStoreError::UsernameTaken { .. }) => Ok(BootstrapOutcome::AlreadyPresent),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl<R, H> CredentialStore for CredentialService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, credentials: &Credentials) -> Result<(), CredentialStoreError> {
        let digest = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hash_error)?;
        let account = UserAccount::new(credentials.username().clone(), digest);

        self.users
            .insert(&account)
            .await
            .map_err(map_persistence_error)?;

        info!(username = %account.username(), "account registered");
        Ok(())
    }

    async fn validate(&self, credentials: &Credentials) -> Result<bool, CredentialStoreError> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_persistence_error)?
        else {
            debug!(username = %credentials.username(), "login for unknown account");
            return Ok(false);
        };

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_digest())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            debug!(username = %credentials.username(), "password mismatch");
        }
        Ok(matches)
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;

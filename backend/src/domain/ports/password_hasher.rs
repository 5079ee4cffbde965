//! Port for the password hashing policy.
use async_trait::async_trait;

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a digest failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// One-way password hashing with salted, self-describing digests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a cleartext password with a fresh random salt.
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Check a cleartext password against a stored digest.
    ///
    /// A mismatch is `Ok(false)`; errors are reserved for unusable digests.
    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError>;
}

//! Port abstraction for user account persistence and its errors.
use async_trait::async_trait;

use crate::domain::{UserAccount, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The storage uniqueness constraint rejected the username.
        DuplicateUsername { username: String } => "username `{username}` is already registered",
    }
}

/// Storage for registered accounts.
///
/// Implementations must enforce username uniqueness atomically in storage;
/// callers never check for existence before inserting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, failing with
    /// [`UserPersistenceError::DuplicateUsername`] if the name exists.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;
}

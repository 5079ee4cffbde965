//! SQLite-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username uniqueness is enforced by the `UNIQUE` constraint on
//! `users.username`; a violation surfaces as
//! [`UserPersistenceError::DuplicateUsername`]. Two concurrent inserts of
//! the same name therefore yield exactly one success.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordDigest, UserAccount, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn map_insert_error(error: DieselError, username: &Username) -> UserPersistenceError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_username(username.as_ref())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let username = Username::new(&row.username)
        .map_err(|err| UserPersistenceError::query(format!("stored username invalid: {err}")))?;
    let digest = PasswordDigest::new(row.password_hash)
        .map_err(|err| UserPersistenceError::query(format!("stored digest invalid: {err}")))?;
    Ok(UserAccount::new(username, digest))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let username = account.username().clone();
        let digest = account.password_digest().as_str().to_owned();
        let key = username.clone();

        self.pool
            .run(move |conn| {
                diesel::insert_into(users::table)
                    .values(&NewUserRow {
                        username: key.as_ref(),
                        password_hash: &digest,
                    })
                    .execute(conn)
            })
            .await
            .map_err(map_pool_error)?
            .map_err(|err| map_insert_error(err, &username))?;

        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let key = username.as_ref().to_owned();

        let row = self
            .pool
            .run(move |conn| {
                users::table
                    .filter(users::username.eq(key))
                    .select(UserRow::as_select())
                    .first(conn)
                    .optional()
            })
            .await
            .map_err(map_pool_error)?
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }
}

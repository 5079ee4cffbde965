//! Connection pool for Diesel SQLite connections.
//!
//! Diesel's SQLite backend is synchronous, so the pool is an `r2d2` pool and
//! every operation runs on Tokio's blocking thread pool via [`DbPool::run`].
//! Actix workers never wait on SQLite locks or disk I/O directly.
//!
//! # Design
//!
//! - Each connection gets `busy_timeout` and WAL journaling on checkout so
//!   concurrent writers queue instead of failing with `SQLITE_BUSY`.
//! - Embedded migrations run once when the pool is built; they only create
//!   tables that are absent.
//! - All failures are mapped to [`PoolError`] variants.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use diesel::result::QueryResult;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Path understood by SQLite as a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout {
        /// Underlying failure description.
        message: String,
    },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build {
        /// Underlying failure description.
        message: String,
    },

    /// Failed to apply schema migrations.
    #[error("failed to apply migrations: {message}")]
    Migration {
        /// Underlying failure description.
        message: String,
    },

    /// The blocking task running the operation did not complete.
    #[error("database task failed: {message}")]
    Task {
        /// Underlying failure description.
        message: String,
    },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Create a migration error with the given message.
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration {
            message: message.into(),
        }
    }

    /// Create a task error with the given message.
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }
}

/// Configuration for the SQLite connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use risk_appetite::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("data/users.sqlite3")
///     .with_max_size(4)
///     .with_busy_timeout(Duration::from_secs(2));
/// assert_eq!(config.database_path(), "data/users.sqlite3");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_path: String,
    max_size: u32,
    connection_timeout: Duration,
    busy_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration for the given database file.
    ///
    /// Defaults: 8 connections, 30 second checkout timeout, 5 second busy
    /// timeout. An in-memory path forces a single connection so every
    /// checkout sees the same database.
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            max_size: 8,
            connection_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Set how long SQLite waits on a locked database before failing.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Get the database path.
    pub fn database_path(&self) -> &str {
        &self.database_path
    }

    fn effective_max_size(&self) -> u32 {
        if self.database_path == IN_MEMORY {
            1
        } else {
            self.max_size.max(1)
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        // busy_timeout first so the WAL switch itself waits on a locked file.
        let pragmas = format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;",
            self.busy_timeout.as_millis()
        );
        conn.batch_execute(&pragmas).map_err(r2d2::Error::QueryError)
    }
}

/// Blocking-pool-backed connection pool for SQLite via Diesel.
///
/// # Example
///
/// ```ignore
/// let pool = DbPool::new(PoolConfig::new("users.sqlite3")).await?;
/// let count = pool
///     .run(|conn| users::table.count().get_result::<i64>(conn))
///     .await??;
/// ```
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<ConnectionManager<SqliteConnection>>,
}

impl DbPool {
    /// Build the pool and apply pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the database cannot be opened and
    /// `PoolError::Migration` if the schema cannot be created.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        tokio::task::spawn_blocking(move || Self::build_blocking(&config))
            .await
            .map_err(|err| PoolError::task(err.to_string()))?
    }

    fn build_blocking(config: &PoolConfig) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_path());
        let inner = Pool::builder()
            .max_size(config.effective_max_size())
            .connection_timeout(config.connection_timeout)
            .connection_customizer(Box::new(SqlitePragmas {
                busy_timeout: config.busy_timeout,
            }))
            .build(manager)
            .map_err(|err| PoolError::build(err.to_string()))?;

        let mut pooled = inner
            .get()
            .map_err(|err| PoolError::checkout(err.to_string()))?;
        let conn: &mut SqliteConnection = &mut pooled;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| PoolError::migration(err.to_string()))?;
        info!(
            database = config.database_path(),
            migrations_applied = applied.len(),
            "database ready"
        );

        Ok(Self { inner })
    }

    /// Run a Diesel operation on a pooled connection off the async runtime.
    ///
    /// The outer result reports pool and task failures; the inner one is the
    /// operation's own Diesel result.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if no connection becomes available within
    /// the configured timeout and `PoolError::Task` if the blocking task
    /// panics or is cancelled.
    pub async fn run<T, F>(&self, operation: F) -> Result<QueryResult<T>, PoolError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|err| PoolError::checkout(err.to_string()))?;
            Ok(operation(&mut *conn))
        })
        .await
        .map_err(|err| PoolError::task(err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_default_values() {
        let config = PoolConfig::new("users.sqlite3");

        assert_eq!(config.database_path(), "users.sqlite3");
        assert_eq!(config.max_size, 8);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn pool_config_builder_pattern() {
        let config = PoolConfig::new("users.sqlite3")
            .with_max_size(2)
            .with_connection_timeout(Duration::from_secs(3))
            .with_busy_timeout(Duration::from_millis(250));

        assert_eq!(config.max_size, 2);
        assert_eq!(config.connection_timeout, Duration::from_secs(3));
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }

    #[rstest]
    #[case(IN_MEMORY, 8, 1)]
    #[case("users.sqlite3", 0, 1)]
    #[case("users.sqlite3", 4, 4)]
    fn effective_size(#[case] path: &str, #[case] requested: u32, #[case] expected: u32) {
        let config = PoolConfig::new(path).with_max_size(requested);
        assert_eq!(config.effective_max_size(), expected);
    }

    #[rstest]
    fn pool_error_display() {
        assert!(PoolError::checkout("timed out").to_string().contains("timed out"));
        assert!(PoolError::migration("syntax").to_string().contains("migrations"));
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_pool_runs_migrations() {
        use diesel::prelude::*;

        let pool = DbPool::new(PoolConfig::new(IN_MEMORY))
            .await
            .expect("in-memory pool");
        let count = pool
            .run(|conn| {
                crate::outbound::persistence::schema::users::table
                    .count()
                    .get_result::<i64>(conn)
            })
            .await
            .expect("checkout")
            .expect("query");
        assert_eq!(count, 0);
    }
}

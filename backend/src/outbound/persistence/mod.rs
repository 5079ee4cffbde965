//! SQLite persistence adapters using Diesel ORM.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain types.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Blocking isolation**: Diesel's synchronous SQLite connections are
//!   pooled with `r2d2` and driven from Tokio's blocking pool.
//! - **Strongly typed errors**: database failures are mapped to the port's
//!   persistence error variants.
//!
//! # Example
//!
//! ```ignore
//! use risk_appetite::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("users.sqlite3")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, IN_MEMORY, MIGRATIONS, PoolConfig, PoolError};

//! Belajar Storage
//!
//! MySQL access exercises built on `sqlx`: connection setup, raw SQL,
//! row scanning, struct CRUD, batch inserts, transactions and query
//! building.
//!
//! SQL generation, pooling and transaction semantics belong to `sqlx` and
//! the server; this crate only wires them to the exercise schema.
//!
//! # Example
//!
//! ```rust,no_run
//! use belajar_core::User;
//! use belajar_storage::{users, Database, DatabaseConfig, UserQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect(&DatabaseConfig::load()?).await?;
//! belajar_storage::run_migrations(db.pool()).await?;
//!
//! users::create(db.pool(), &User::new("1", "Adib", "adib123")).await?;
//!
//! let page = UserQuery::new()
//!     .order("id asc")
//!     .limit(5)
//!     .offset(5)
//!     .find(db.pool())
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod database;
mod error;

pub mod logging;
pub mod query;
pub mod raw;
pub mod samples;
pub mod users;

pub use config::DatabaseConfig;
pub use database::{create_pool, open_connection, Database};
pub use error::{Result, StorageError};
pub use query::UserQuery;

use sqlx::migrate::Migrator;
use sqlx::mysql::MySqlPool;

/// Embedded schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

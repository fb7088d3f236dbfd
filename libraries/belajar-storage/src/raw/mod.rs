//! Raw statement execution
//!
//! Statements are passed through to the server untouched; only the
//! positional `?` parameters are bound.

use crate::error::Result;
use sqlx::{Executor, MySql};
use tracing::debug;

/// Execute a raw statement and return the number of affected rows
///
/// # Example
///
/// ```rust,no_run
/// # async fn example(pool: &sqlx::MySqlPool) -> belajar_storage::Result<()> {
/// belajar_storage::raw::execute(
///     pool,
///     "INSERT INTO users (id, first_name, password) VALUES (?, ?, ?)",
///     &["2", "adib", "adib123"],
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn execute<'e, E>(executor: E, sql: &str, params: &[&str]) -> Result<u64>
where
    E: Executor<'e, Database = MySql>,
{
    debug!(sql, params = params.len(), "Executing raw statement");

    let mut query = sqlx::query(sql);
    for param in params {
        query = query.bind(*param);
    }

    let result = query.execute(executor).await?;

    Ok(result.rows_affected())
}

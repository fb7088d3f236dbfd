//! Struct-based user persistence

use crate::error::Result;
use crate::query::UserQuery;
use belajar_core::User;
use sqlx::{Executor, MySql, QueryBuilder};
use tracing::debug;

const INSERT_USER: &str = "INSERT INTO users (id, first_name, middle_name, last_name, password) \
                           VALUES (?, ?, ?, ?, ?)";

/// Insert one user
///
/// `information` is never written. Returns the number of affected rows.
///
/// # Arguments
///
/// * `executor` - Pool, connection, or `&mut *tx` inside a transaction
/// * `user` - User to insert
pub async fn create<'e, E>(executor: E, user: &User) -> Result<u64>
where
    E: Executor<'e, Database = MySql>,
{
    let result = sqlx::query(INSERT_USER)
        .bind(&user.id)
        .bind(user.name.first_name.as_deref())
        .bind(user.name.middle_name.as_deref())
        .bind(user.name.last_name.as_deref())
        .bind(&user.password)
        .execute(executor)
        .await?;

    debug!(id = %user.id, rows = result.rows_affected(), "Created user");

    Ok(result.rows_affected())
}

/// Insert many users in one multi-row statement
///
/// An empty slice issues no statement and returns 0.
pub async fn create_batch<'e, E>(executor: E, users: &[User]) -> Result<u64>
where
    E: Executor<'e, Database = MySql>,
{
    if users.is_empty() {
        return Ok(0);
    }

    let mut builder =
        QueryBuilder::new("INSERT INTO users (id, first_name, middle_name, last_name, password) ");
    builder.push_values(users, |mut b, user| {
        b.push_bind(&user.id)
            .push_bind(user.name.first_name.as_deref())
            .push_bind(user.name.middle_name.as_deref())
            .push_bind(user.name.last_name.as_deref())
            .push_bind(&user.password);
    });

    let result = builder.build().execute(executor).await?;

    debug!(
        count = users.len(),
        rows = result.rows_affected(),
        "Created users in batch"
    );

    Ok(result.rows_affected())
}

/// First user ordered by ID
pub async fn first<'e, E>(executor: E) -> Result<User>
where
    E: Executor<'e, Database = MySql>,
{
    UserQuery::new().first(executor).await
}

/// Last user ordered by ID
///
/// IDs are strings, so `"9"` sorts after `"15"`.
pub async fn last<'e, E>(executor: E) -> Result<User>
where
    E: Executor<'e, Database = MySql>,
{
    UserQuery::new().last(executor).await
}

/// First user matching an inline condition, e.g. `("id = ?", "5")`
pub async fn first_where<'e, E>(executor: E, clause: &str, value: &str) -> Result<User>
where
    E: Executor<'e, Database = MySql>,
{
    UserQuery::new().where_(clause, [value]).first(executor).await
}

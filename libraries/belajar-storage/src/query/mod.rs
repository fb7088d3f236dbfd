//! Chainable query over the `users` table
//!
//! `UserQuery` only records what was asked for. SQL text and parameter
//! binding are produced by [`sqlx::QueryBuilder`] when the query runs.
//!
//! # Example
//!
//! ```rust,no_run
//! use belajar_core::UserResponse;
//! use belajar_storage::UserQuery;
//!
//! # async fn example(pool: &sqlx::MySqlPool) -> belajar_storage::Result<()> {
//! let users = UserQuery::new()
//!     .where_("first_name LIKE ?", ["%User%"])
//!     .or("password = ?", ["Rahasia123"])
//!     .find(pool)
//!     .await?;
//!
//! let responses: Vec<UserResponse> = UserQuery::new()
//!     .select(["id", "first_name", "last_name"])
//!     .find_as(pool)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, StorageError};
use belajar_core::User;
use sqlx::mysql::MySqlRow;
use sqlx::{Executor, FromRow, MySql, QueryBuilder};
use tracing::debug;

pub(crate) const TABLE: &str = "users";

/// Primary key column, used by `first`/`last`
pub(crate) const PRIMARY_KEY: &str = "id";

/// Every persisted `users` column
pub const USER_COLUMNS: [&str; 5] = ["id", "first_name", "middle_name", "last_name", "password"];

// MySQL has no OFFSET without LIMIT; this is the documented "all rows" bound
const NO_LIMIT: u64 = u64::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

#[derive(Debug, Clone)]
struct Condition {
    connective: Connective,
    clause: String,
    args: Vec<String>,
}

/// Conditions, select list, ordering and paging for a `users` query
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    columns: Vec<String>,
    conditions: Vec<Condition>,
    order: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl UserQuery {
    /// Empty query: every column, every row
    pub fn new() -> Self {
        Self::default()
    }

    /// AND a raw condition; each `?` in `clause` takes the next argument
    ///
    /// Placeholders are counted literally, so a `?` inside a quoted string
    /// in `clause` counts too.
    pub fn where_<I, S>(self, clause: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_condition(Connective::And, clause.into(), args)
    }

    /// OR a raw condition onto everything before it
    pub fn or<I, S>(self, clause: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_condition(Connective::Or, clause.into(), args)
    }

    /// AND an equality condition for every non-empty field of `user`
    ///
    /// Empty strings and `None` are skipped, so a default `User` adds
    /// nothing. `information` is never a condition.
    pub fn where_struct(mut self, user: &User) -> Self {
        let fields = [
            ("id", Some(user.id.as_str())),
            ("first_name", user.name.first_name.as_deref()),
            ("middle_name", user.name.middle_name.as_deref()),
            ("last_name", user.name.last_name.as_deref()),
            ("password", Some(user.password.as_str())),
        ];

        for (column, value) in fields {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                self = self.push_condition(Connective::And, format!("{column} = ?"), [value]);
            }
        }

        self
    }

    /// Restrict the select list (default: every user column)
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Raw ORDER BY expression, e.g. `"id asc, first_name desc"`
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Return at most `limit` rows
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` rows
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Fetch every matching user
    pub async fn find<'e, E>(&self, executor: E) -> Result<Vec<User>>
    where
        E: Executor<'e, Database = MySql>,
    {
        self.find_as(executor).await
    }

    /// Fetch every matching row into an arbitrary row shape
    pub async fn find_as<'e, T, E>(&self, executor: E) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
        E: Executor<'e, Database = MySql>,
    {
        let mut builder = self.build()?;
        debug!(sql = builder.sql(), "Running user query");

        let rows = builder.build_query_as::<T>().fetch_all(executor).await?;

        Ok(rows)
    }

    /// First match ordered by primary key
    pub async fn first<'e, E>(&self, executor: E) -> Result<User>
    where
        E: Executor<'e, Database = MySql>,
    {
        self.single(executor, "ASC").await
    }

    /// Last match ordered by primary key
    pub async fn last<'e, E>(&self, executor: E) -> Result<User>
    where
        E: Executor<'e, Database = MySql>,
    {
        self.single(executor, "DESC").await
    }

    /// Render the SQL text with `?` placeholders
    pub fn to_sql(&self) -> Result<String> {
        Ok(self.build()?.sql().to_string())
    }

    async fn single<'e, E>(&self, executor: E, direction: &str) -> Result<User>
    where
        E: Executor<'e, Database = MySql>,
    {
        let key_order = format!("{PRIMARY_KEY} {direction}");
        let mut query = self.clone().limit(1);
        query.order = Some(match query.order.take() {
            Some(order) => format!("{order}, {key_order}"),
            None => key_order,
        });

        let mut builder = query.build()?;
        debug!(sql = builder.sql(), "Running single user query");

        builder
            .build_query_as::<User>()
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| StorageError::not_found("User", self.describe()))
    }

    fn push_condition<I, S>(mut self, connective: Connective, clause: String, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.push(Condition {
            connective,
            clause,
            args: args.into_iter().map(Into::into).collect(),
        });
        self
    }

    fn build(&self) -> Result<QueryBuilder<'static, MySql>> {
        let mut builder = QueryBuilder::new("SELECT ");

        if self.columns.is_empty() {
            builder.push(USER_COLUMNS.join(", "));
        } else {
            builder.push(self.columns.join(", "));
        }
        builder.push(" FROM ");
        builder.push(TABLE);

        for (index, condition) in self.conditions.iter().enumerate() {
            let pieces: Vec<&str> = condition.clause.split('?').collect();
            if pieces.len() - 1 != condition.args.len() {
                return Err(StorageError::query(format!(
                    "`{}` has {} placeholder(s) but {} argument(s)",
                    condition.clause,
                    pieces.len() - 1,
                    condition.args.len()
                )));
            }

            // A leading OR has nothing to join onto and acts as WHERE
            builder.push(match (index, condition.connective) {
                (0, _) => " WHERE (",
                (_, Connective::And) => " AND (",
                (_, Connective::Or) => " OR (",
            });

            builder.push(pieces[0]);
            for (arg, piece) in condition.args.iter().zip(&pieces[1..]) {
                builder.push_bind(arg.clone());
                builder.push(*piece);
            }
            builder.push(")");
        }

        if let Some(order) = &self.order {
            builder.push(" ORDER BY ");
            builder.push(order);
        }

        match (self.limit, self.offset) {
            (Some(limit), _) => {
                builder.push(" LIMIT ");
                builder.push(limit);
            }
            (None, Some(_)) => {
                builder.push(" LIMIT ");
                builder.push(NO_LIMIT);
            }
            (None, None) => {}
        }

        if let Some(offset) = self.offset {
            builder.push(" OFFSET ");
            builder.push(offset);
        }

        Ok(builder)
    }

    fn describe(&self) -> String {
        if self.conditions.is_empty() {
            return "<any>".to_string();
        }

        self.conditions
            .iter()
            .map(|c| format!("{} {:?}", c.clause, c.args))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

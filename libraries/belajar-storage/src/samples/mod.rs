//! Raw queries against the `sample` table
//!
//! Four ways of getting rows out: scan one row into a struct, scan a
//! whole result into a list, walk a row stream copying columns by
//! position, and walk a row stream mapping each row through `FromRow`.

use crate::error::Result;
use belajar_core::Sample;
use futures::TryStreamExt;
use sqlx::{Executor, FromRow, MySql, Row};

const SELECT_BY_ID: &str = "SELECT id, name FROM sample WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name FROM sample";

/// Get one sample by ID
pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Sample>>
where
    E: Executor<'e, Database = MySql>,
{
    let sample = sqlx::query_as::<_, Sample>(SELECT_BY_ID)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(sample)
}

/// Get all samples
pub async fn get_all<'e, E>(executor: E) -> Result<Vec<Sample>>
where
    E: Executor<'e, Database = MySql>,
{
    let samples = sqlx::query_as::<_, Sample>(SELECT_ALL)
        .fetch_all(executor)
        .await?;

    Ok(samples)
}

/// Get all samples by reading each row's columns positionally
pub async fn get_all_by_rows<'e, E>(executor: E) -> Result<Vec<Sample>>
where
    E: Executor<'e, Database = MySql>,
{
    let mut rows = sqlx::query(SELECT_ALL).fetch(executor);
    let mut samples = Vec::new();

    while let Some(row) = rows.try_next().await? {
        let id: String = row.try_get(0)?;
        let name: String = row.try_get(1)?;

        samples.push(Sample { id, name });
    }

    Ok(samples)
}

/// Get all samples by mapping each streamed row into the struct
pub async fn get_all_scan_rows<'e, E>(executor: E) -> Result<Vec<Sample>>
where
    E: Executor<'e, Database = MySql>,
{
    let mut rows = sqlx::query(SELECT_ALL).fetch(executor);
    let mut samples = Vec::new();

    while let Some(row) = rows.try_next().await? {
        samples.push(Sample::from_row(&row)?);
    }

    Ok(samples)
}

//! Deletion audit log.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

use fairway_core::{DeletionLogId, UserId};

use super::RepositoryError;
use crate::models::DeletionLog;

/// Raw `deletion_log` row.
#[derive(sqlx::FromRow)]
struct DeletionLogRow {
    id: i32,
    entity_type: String,
    entity_id: String,
    snapshot: serde_json::Value,
    deleted_by: i32,
    deleted_at: DateTime<Utc>,
}

/// Record a deletion snapshot inside the caller's transaction.
///
/// Runs on a transaction rather than the pool so the snapshot commits (or
/// rolls back) together with the soft-delete it documents.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn record(
    tx: &mut Transaction<'_, Postgres>,
    entity_type: &str,
    entity_id: &str,
    snapshot: &serde_json::Value,
    deleted_by: UserId,
) -> Result<DeletionLog, RepositoryError> {
    let row = sqlx::query_as::<Postgres, DeletionLogRow>(
        "INSERT INTO deletion_log (entity_type, entity_id, snapshot, deleted_by)
         VALUES ($1, $2, $3, $4)
         RETURNING id, entity_type, entity_id, snapshot, deleted_by, deleted_at",
    )
    .bind(entity_type)
    .bind(entity_id)
    .bind(snapshot)
    .bind(deleted_by.as_i32())
    .fetch_one(&mut **tx)
    .await?;

    Ok(DeletionLog {
        id: DeletionLogId::new(row.id),
        entity_type: row.entity_type,
        entity_id: row.entity_id,
        snapshot: row.snapshot,
        deleted_by: UserId::new(row.deleted_by),
        deleted_at: row.deleted_at,
    })
}

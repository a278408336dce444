//! Deletion audit log domain type.

use chrono::{DateTime, Utc};

use fairway_core::{DeletionLogId, UserId};

/// Append-only audit record written when an entity is soft-deleted.
///
/// `snapshot` is the full pre-deletion state of the entity as JSON, so
/// support can answer "what was in that bag" after the fact.
#[derive(Debug, Clone)]
pub struct DeletionLog {
    pub id: DeletionLogId,
    /// Entity type tag, e.g. `"favourite_set"`.
    pub entity_type: String,
    /// ID of the deleted entity, stringified.
    pub entity_id: String,
    pub snapshot: serde_json::Value,
    pub deleted_by: UserId,
    pub deleted_at: DateTime<Utc>,
}

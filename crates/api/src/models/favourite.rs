//! Favourite set ("bag") domain type.

use chrono::{DateTime, Utc};

use fairway_core::{FavouriteSetId, UserId};

/// A user-named collection of club ID references.
///
/// Club IDs are opaque Booqable product IDs; the referenced products are
/// enriched from the live catalogue at read time and never stored here.
/// Ordering is preserved and duplicates are kept as sent by the client.
///
/// Sets are soft-deleted: the row stays, `deleted` flips, and a
/// [`super::DeletionLog`] snapshot is written in the same transaction.
#[derive(Debug, Clone)]
pub struct FavouriteSet {
    pub id: FavouriteSetId,
    pub user_id: UserId,
    pub set_name: String,
    pub club_ids: Vec<String>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

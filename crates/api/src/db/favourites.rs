//! Favourite-set ("bag") repository.
//!
//! All reads and writes are scoped to the owning user and to
//! `deleted = FALSE`; a non-matching ID surfaces as `None`, never as an
//! error, because the API folds "not found" into a 200 response.

use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;

use fairway_core::{FavouriteSetId, UserId};

use super::{RepositoryError, deletion_log};
use crate::models::FavouriteSet;

/// Raw `favourite_sets` row.
#[derive(sqlx::FromRow)]
struct FavouriteSetRow {
    id: i32,
    user_id: i32,
    set_name: String,
    club_ids: Vec<String>,
    deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FavouriteSetRow> for FavouriteSet {
    fn from(row: FavouriteSetRow) -> Self {
        Self {
            id: FavouriteSetId::new(row.id),
            user_id: UserId::new(row.user_id),
            set_name: row.set_name,
            club_ids: row.club_ids,
            deleted: row.deleted,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SET_COLUMNS: &str =
    "id, user_id, set_name, club_ids, deleted, deleted_at, created_at, updated_at";

/// Repository for favourite-set database operations.
pub struct FavouriteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavouriteRepository<'a> {
    /// Create a new favourite-set repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new set for the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        set_name: &str,
        club_ids: &[String],
    ) -> Result<FavouriteSet, RepositoryError> {
        let row = sqlx::query_as::<_, FavouriteSetRow>(&format!(
            "INSERT INTO favourite_sets (user_id, set_name, club_ids)
             VALUES ($1, $2, $3)
             RETURNING {SET_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(set_name)
        .bind(club_ids)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// All non-deleted sets for the user, newest-updated first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self, user_id: UserId) -> Result<Vec<FavouriteSet>, RepositoryError> {
        let rows = sqlx::query_as::<_, FavouriteSetRow>(&format!(
            "SELECT {SET_COLUMNS} FROM favourite_sets
             WHERE user_id = $1 AND deleted = FALSE
             ORDER BY updated_at DESC"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// One non-deleted set, scoped to the owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active(
        &self,
        user_id: UserId,
        id: FavouriteSetId,
    ) -> Result<Option<FavouriteSet>, RepositoryError> {
        let row = sqlx::query_as::<_, FavouriteSetRow>(&format!(
            "SELECT {SET_COLUMNS} FROM favourite_sets
             WHERE id = $1 AND user_id = $2 AND deleted = FALSE"
        ))
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Rename a set and/or replace its club IDs. `None` fields are left
    /// untouched (COALESCE in the query).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        user_id: UserId,
        id: FavouriteSetId,
        set_name: Option<&str>,
        club_ids: Option<&[String]>,
    ) -> Result<Option<FavouriteSet>, RepositoryError> {
        let row = sqlx::query_as::<_, FavouriteSetRow>(&format!(
            "UPDATE favourite_sets
             SET set_name = COALESCE($3, set_name),
                 club_ids = COALESCE($4, club_ids),
                 updated_at = now()
             WHERE id = $1 AND user_id = $2 AND deleted = FALSE
             RETURNING {SET_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .bind(set_name)
        .bind(club_ids)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Soft-delete a set and write its audit snapshot in one transaction.
    ///
    /// Returns the pre-deletion state, or `None` when the set does not
    /// exist, is already deleted, or belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; on error
    /// the transaction rolls back and neither write is visible.
    pub async fn soft_delete(
        &self,
        user_id: UserId,
        id: FavouriteSetId,
    ) -> Result<Option<FavouriteSet>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, FavouriteSetRow>(&format!(
            "SELECT {SET_COLUMNS} FROM favourite_sets
             WHERE id = $1 AND user_id = $2 AND deleted = FALSE
             FOR UPDATE"
        ))
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let set = FavouriteSet::from(row);

        sqlx::query(
            "UPDATE favourite_sets
             SET deleted = TRUE, deleted_at = now(), updated_at = now()
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .execute(&mut *tx)
        .await?;

        let snapshot = json!({
            "id": set.id,
            "userId": set.user_id,
            "setName": set.set_name,
            "clubIds": set.club_ids,
            "createdAt": set.created_at,
            "updatedAt": set.updated_at,
        });
        deletion_log::record(&mut tx, "favourite_set", &set.id.to_string(), &snapshot, user_id)
            .await?;

        tx.commit().await?;

        Ok(Some(set))
    }
}

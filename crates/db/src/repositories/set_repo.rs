//! Repository for the `sets` table.
//!
//! Sets are ordered within their event through [`EVENT_SETS`]. Deleting a
//! set cascades to its performances.

use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::set::{CreateEventSet, EventSet};
use crate::ordinal::EVENT_SETS;

const COLUMNS: &str = "id, event_id, name, is_encore, position, created_at, updated_at";

/// Provides ordered operations on an event's sets.
pub struct SetRepo;

impl SetRepo {
    /// Find a set by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EventSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sets WHERE id = $1");
        sqlx::query_as::<_, EventSet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an event's sets in position order.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<EventSet>, sqlx::Error> {
        sqlx::query_as::<_, EventSet>(&list_query())
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Add a set to an event, appending unless a position is given.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateEventSet,
    ) -> Result<EventSet, DbError> {
        let mut tx = pool.begin().await?;
        let position = EVENT_SETS
            .prepare_insert(&mut *tx, event_id, input.position)
            .await?;

        let query = format!(
            "INSERT INTO sets (event_id, name, is_encore, position) \
             VALUES ($1, $2, COALESCE($3, false), $4) \
             RETURNING {COLUMNS}"
        );
        let set = sqlx::query_as::<_, EventSet>(&query)
            .bind(event_id)
            .bind(&input.name)
            .bind(input.is_encore)
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;

        EVENT_SETS.verify_contiguous(&mut *tx, event_id).await?;
        tx.commit().await?;
        Ok(set)
    }

    /// Remove a set (and its performances) and close the gap it leaves.
    pub async fn delete(pool: &PgPool, event_id: DbId, set_id: DbId) -> Result<EventSet, DbError> {
        let mut tx = pool.begin().await?;
        let position = EVENT_SETS
            .prepare_removal(&mut *tx, event_id, set_id)
            .await?;

        let query = format!("DELETE FROM sets WHERE id = $1 RETURNING {COLUMNS}");
        let set = sqlx::query_as::<_, EventSet>(&query)
            .bind(set_id)
            .fetch_one(&mut *tx)
            .await?;

        EVENT_SETS
            .compact_after_removal(&mut *tx, event_id, position)
            .await?;
        tx.commit().await?;
        Ok(set)
    }

    /// Renumber an event's sets to follow `set_ids`.
    pub async fn reorder(
        pool: &PgPool,
        event_id: DbId,
        set_ids: &[DbId],
    ) -> Result<Vec<EventSet>, DbError> {
        let mut tx = pool.begin().await?;
        EVENT_SETS.reorder(&mut *tx, event_id, set_ids).await?;
        let sets = sqlx::query_as::<_, EventSet>(&list_query())
            .bind(event_id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(sets)
    }
}

fn list_query() -> String {
    format!("SELECT {COLUMNS} FROM sets WHERE event_id = $1 ORDER BY position")
}

//! Repository for the `performances` table.
//!
//! Performances are ordered within a set through [`SET_PERFORMANCES`] and
//! are the only children that can move to a different parent.

use setlist_core::performance_flags::PerformanceFlag;
use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::performance::{CreatePerformance, MovePerformance, Performance};
use crate::ordinal::SET_PERFORMANCES;

const COLUMNS: &str = "id, set_id, song_id, position, is_segue, is_debut, is_tease, notes, \
    created_at, updated_at";

/// Provides ordered operations on a set's performances.
pub struct PerformanceRepo;

impl PerformanceRepo {
    /// Find a performance by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Performance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM performances WHERE id = $1");
        sqlx::query_as::<_, Performance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a set's performances in position order.
    pub async fn list_by_set(pool: &PgPool, set_id: DbId) -> Result<Vec<Performance>, sqlx::Error> {
        sqlx::query_as::<_, Performance>(&list_query())
            .bind(set_id)
            .fetch_all(pool)
            .await
    }

    /// Add a performance to a set, appending unless a position is given.
    pub async fn create(
        pool: &PgPool,
        set_id: DbId,
        input: &CreatePerformance,
    ) -> Result<Performance, DbError> {
        let mut tx = pool.begin().await?;
        let position = SET_PERFORMANCES
            .prepare_insert(&mut *tx, set_id, input.position)
            .await?;

        let query = format!(
            "INSERT INTO performances \
                (set_id, song_id, position, is_segue, is_debut, is_tease, notes) \
             VALUES ($1, $2, $3, COALESCE($4, false), COALESCE($5, false), \
                COALESCE($6, false), $7) \
             RETURNING {COLUMNS}"
        );
        let performance = sqlx::query_as::<_, Performance>(&query)
            .bind(set_id)
            .bind(input.song_id)
            .bind(position)
            .bind(input.is_segue)
            .bind(input.is_debut)
            .bind(input.is_tease)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        SET_PERFORMANCES.verify_contiguous(&mut *tx, set_id).await?;
        tx.commit().await?;
        Ok(performance)
    }

    /// Remove a performance and close the gap it leaves.
    pub async fn delete(
        pool: &PgPool,
        set_id: DbId,
        performance_id: DbId,
    ) -> Result<Performance, DbError> {
        let mut tx = pool.begin().await?;
        let position = SET_PERFORMANCES
            .prepare_removal(&mut *tx, set_id, performance_id)
            .await?;

        let query = format!("DELETE FROM performances WHERE id = $1 RETURNING {COLUMNS}");
        let performance = sqlx::query_as::<_, Performance>(&query)
            .bind(performance_id)
            .fetch_one(&mut *tx)
            .await?;

        SET_PERFORMANCES
            .compact_after_removal(&mut *tx, set_id, position)
            .await?;
        tx.commit().await?;
        Ok(performance)
    }

    /// Renumber a set's performances to follow `performance_ids`.
    pub async fn reorder(
        pool: &PgPool,
        set_id: DbId,
        performance_ids: &[DbId],
    ) -> Result<Vec<Performance>, DbError> {
        let mut tx = pool.begin().await?;
        SET_PERFORMANCES
            .reorder(&mut *tx, set_id, performance_ids)
            .await?;
        let performances = sqlx::query_as::<_, Performance>(&list_query())
            .bind(set_id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(performances)
    }

    /// Move a performance out of `set_id` into the target set and position.
    ///
    /// The source set is compacted and the target opened in the same
    /// transaction. Returns the moved row.
    pub async fn move_to(
        pool: &PgPool,
        set_id: DbId,
        input: &MovePerformance,
    ) -> Result<Performance, DbError> {
        let mut tx = pool.begin().await?;
        SET_PERFORMANCES
            .move_child(
                &mut *tx,
                set_id,
                input.child_id,
                input.target_parent_id,
                input.target_position,
            )
            .await?;

        let query = format!("SELECT {COLUMNS} FROM performances WHERE id = $1");
        let performance = sqlx::query_as::<_, Performance>(&query)
            .bind(input.child_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(performance)
    }

    /// Set one boolean flag on a performance.
    ///
    /// Returns `None` if no performance with `id` exists in the set.
    pub async fn set_flag(
        pool: &PgPool,
        set_id: DbId,
        id: DbId,
        flag: PerformanceFlag,
        value: bool,
    ) -> Result<Option<Performance>, sqlx::Error> {
        let query = format!(
            "UPDATE performances SET {} = $3 \
             WHERE id = $1 AND set_id = $2 \
             RETURNING {COLUMNS}",
            flag_column(flag)
        );
        sqlx::query_as::<_, Performance>(&query)
            .bind(id)
            .bind(set_id)
            .bind(value)
            .fetch_optional(pool)
            .await
    }
}

/// Column backing each flag.
fn flag_column(flag: PerformanceFlag) -> &'static str {
    match flag {
        PerformanceFlag::Segue => "is_segue",
        PerformanceFlag::Debut => "is_debut",
        PerformanceFlag::Tease => "is_tease",
    }
}

fn list_query() -> String {
    format!("SELECT {COLUMNS} FROM performances WHERE set_id = $1 ORDER BY position")
}

//! Transactional executor for ordered child collections.
//!
//! Every helper takes the connection of an open transaction. Callers begin
//! the transaction, run the helpers plus their own row insert/delete, and
//! commit; dropping the transaction on error rolls every shift back.
//!
//! Each mutation starts by locking the parent row, so concurrent writers to
//! the same scope serialize and `MAX(position)` is always read under lock.

use setlist_core::error::CoreError;
use setlist_core::ordering::{self, PositionShift};
use setlist_core::types::{DbId, Position};
use sqlx::PgConnection;

use crate::error::DbError;

/// Table metadata for one family of ordered children.
///
/// All names are compile-time constants; they are interpolated into SQL and
/// must never come from user input.
#[derive(Debug, Clone, Copy)]
pub struct OrderedScope {
    pub table: &'static str,
    pub parent_table: &'static str,
    pub parent_column: &'static str,
    pub entity: &'static str,
    pub parent_entity: &'static str,
}

pub const ALBUM_TRACKS: OrderedScope = OrderedScope {
    table: "album_tracks",
    parent_table: "albums",
    parent_column: "album_id",
    entity: "Track",
    parent_entity: "Album",
};

pub const EVENT_SETS: OrderedScope = OrderedScope {
    table: "sets",
    parent_table: "events",
    parent_column: "event_id",
    entity: "Set",
    parent_entity: "Event",
};

pub const SET_PERFORMANCES: OrderedScope = OrderedScope {
    table: "performances",
    parent_table: "sets",
    parent_column: "set_id",
    entity: "Performance",
    parent_entity: "Set",
};

impl OrderedScope {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Lock the parent row until the transaction ends.
    ///
    /// Fails with `NotFound` if the parent does not exist.
    pub async fn lock_parent(&self, conn: &mut PgConnection, parent_id: DbId) -> Result<(), DbError> {
        let query = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", self.parent_table);
        let found: Option<DbId> = sqlx::query_scalar(&query)
            .bind(parent_id)
            .fetch_optional(&mut *conn)
            .await?;
        match found {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound {
                entity: self.parent_entity,
                id: parent_id,
            }
            .into()),
        }
    }

    /// Highest position in the scope, `None` when it is empty.
    pub async fn max_position(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
    ) -> Result<Option<Position>, sqlx::Error> {
        let query = format!(
            "SELECT MAX(position) FROM {} WHERE {} = $1",
            self.table, self.parent_column
        );
        sqlx::query_scalar(&query)
            .bind(parent_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Current position of `child_id` under `parent_id`, locking the child row.
    pub async fn locate(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        child_id: DbId,
    ) -> Result<Option<Position>, sqlx::Error> {
        let query = format!(
            "SELECT position FROM {} WHERE id = $1 AND {} = $2 FOR UPDATE",
            self.table, self.parent_column
        );
        sqlx::query_scalar(&query)
            .bind(child_id)
            .bind(parent_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Child ids of the scope in position order.
    pub async fn child_ids(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT id FROM {} WHERE {} = $1 ORDER BY position, id",
            self.table, self.parent_column
        );
        sqlx::query_scalar(&query)
            .bind(parent_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Number of children in the scope, not counting `exclude`.
    pub async fn sibling_count(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        exclude: DbId,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = $1 AND id <> $2",
            self.table, self.parent_column
        );
        sqlx::query_scalar(&query)
            .bind(parent_id)
            .bind(exclude)
            .fetch_one(&mut *conn)
            .await
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Execute shift descriptors against one scope, in order.
    ///
    /// `exclude` keeps a single child (the one being moved) out of the shift.
    pub async fn apply(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        shifts: &[PositionShift],
        exclude: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        for shift in shifts {
            let (new_position, comparison, pivot) = match *shift {
                PositionShift::OpenGap { from } => ("position + 1", ">=", from),
                PositionShift::CloseGap { after } => ("position - 1", ">", after),
            };
            let query = format!(
                "UPDATE {} SET position = {new_position} \
                 WHERE {} = $1 AND position {comparison} $2 AND id IS DISTINCT FROM $3",
                self.table, self.parent_column
            );
            let result = sqlx::query(&query)
                .bind(parent_id)
                .bind(pivot)
                .bind(exclude)
                .execute(&mut *conn)
                .await?;
            tracing::debug!(
                table = self.table,
                parent_id,
                ?shift,
                rows = result.rows_affected(),
                "Applied position shift"
            );
        }
        Ok(())
    }

    /// Write explicit positions for a list of children of one parent.
    pub async fn assign(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        assignments: &[(DbId, Position)],
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "UPDATE {} SET position = $1 WHERE id = $2 AND {} = $3",
            self.table, self.parent_column
        );
        for &(child_id, position) in assignments {
            sqlx::query(&query)
                .bind(position)
                .bind(child_id)
                .bind(parent_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Re-read the scope and fail if its positions are not `1..=N`.
    pub async fn verify_contiguous(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
    ) -> Result<(), DbError> {
        let query = format!(
            "SELECT position FROM {} WHERE {} = $1",
            self.table, self.parent_column
        );
        let positions: Vec<Position> = sqlx::query_scalar(&query)
            .bind(parent_id)
            .fetch_all(&mut *conn)
            .await?;
        ordering::ensure_contiguous(self.entity, parent_id, &positions)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Lock the parent and open a slot for a new child.
    ///
    /// Returns the position the caller must insert the child at. The caller
    /// should run [`verify_contiguous`](Self::verify_contiguous) after its
    /// insert and before commit.
    pub async fn prepare_insert(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        requested: Option<Position>,
    ) -> Result<Position, DbError> {
        self.lock_parent(conn, parent_id).await?;
        let current_max = self.max_position(conn, parent_id).await?;
        let position = ordering::resolve_insert_position(requested, current_max)?;
        if let Some(shift) = ordering::plan_insert(position, current_max) {
            self.apply(conn, parent_id, &[shift], None).await?;
        }
        Ok(position)
    }

    /// Lock the parent and child ahead of deleting the child.
    ///
    /// Returns the child's current position, to be passed to
    /// [`compact_after_removal`](Self::compact_after_removal) once the row is gone.
    pub async fn prepare_removal(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        child_id: DbId,
    ) -> Result<Position, DbError> {
        self.lock_parent(conn, parent_id).await?;
        self.locate(conn, parent_id, child_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: self.entity,
                    id: child_id,
                }
                .into()
            })
    }

    /// Close the gap left by a deleted child and verify the scope.
    pub async fn compact_after_removal(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        removed_position: Position,
    ) -> Result<(), DbError> {
        self.apply(conn, parent_id, &[ordering::plan_removal(removed_position)], None)
            .await?;
        self.verify_contiguous(conn, parent_id).await
    }

    /// Rewrite the scope so that `ids[i]` sits at position `i + 1`.
    ///
    /// `ids` must be an exact permutation of the current children.
    pub async fn reorder(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        ids: &[DbId],
    ) -> Result<(), DbError> {
        self.lock_parent(conn, parent_id).await?;
        let current = self.child_ids(conn, parent_id).await?;
        ordering::validate_reorder(&current, ids)?;
        self.assign(conn, parent_id, &ordering::reorder_assignments(ids))
            .await?;
        self.verify_contiguous(conn, parent_id).await
    }

    /// Move a child to `requested` within `target_parent`, compacting its
    /// old scope. Source and target may be the same parent.
    ///
    /// Returns the position the child ended up at.
    pub async fn move_child(
        &self,
        conn: &mut PgConnection,
        source_parent: DbId,
        child_id: DbId,
        target_parent: DbId,
        requested: Position,
    ) -> Result<Position, DbError> {
        // Fixed lock order so two opposite moves cannot deadlock.
        let (first, second) = if source_parent <= target_parent {
            (source_parent, target_parent)
        } else {
            (target_parent, source_parent)
        };
        self.lock_parent(conn, first).await?;
        if second != first {
            self.lock_parent(conn, second).await?;
        }

        let old_position = self
            .locate(conn, source_parent, child_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: self.entity,
                id: child_id,
            })?;
        let siblings = self.sibling_count(conn, target_parent, child_id).await?;
        let plan = ordering::plan_move(old_position, requested, siblings)?;

        self.apply(conn, source_parent, &[plan.source], Some(child_id))
            .await?;
        if let Some(shift) = plan.target {
            self.apply(conn, target_parent, &[shift], Some(child_id))
                .await?;
        }

        let query = format!(
            "UPDATE {} SET {} = $1, position = $2 WHERE id = $3",
            self.table, self.parent_column
        );
        sqlx::query(&query)
            .bind(target_parent)
            .bind(plan.position)
            .bind(child_id)
            .execute(&mut *conn)
            .await?;

        self.verify_contiguous(conn, source_parent).await?;
        if target_parent != source_parent {
            self.verify_contiguous(conn, target_parent).await?;
        }

        tracing::debug!(
            table = self.table,
            child_id,
            source_parent,
            target_parent,
            from = old_position,
            to = plan.position,
            "Moved ordered child"
        );
        Ok(plan.position)
    }
}

//! Repository for the `album_tracks` table.
//!
//! Every mutation keeps the album's track positions contiguous (`1..=N`)
//! by running through [`ALBUM_TRACKS`] inside one transaction.

use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::track::{AlbumTrack, CreateAlbumTrack};
use crate::ordinal::ALBUM_TRACKS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, album_id, song_id, position, duration_secs, created_at, updated_at";

/// Provides ordered operations on an album's tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// List an album's tracks in position order.
    pub async fn list_by_album(
        pool: &PgPool,
        album_id: DbId,
    ) -> Result<Vec<AlbumTrack>, sqlx::Error> {
        sqlx::query_as::<_, AlbumTrack>(&list_query())
            .bind(album_id)
            .fetch_all(pool)
            .await
    }

    /// Add a track to an album.
    ///
    /// Without a position the track is appended; with one, tracks at or
    /// after it shift down by one. Adding the same song twice fails on
    /// `uq_album_tracks_album_song` and leaves the album untouched.
    pub async fn create(
        pool: &PgPool,
        album_id: DbId,
        input: &CreateAlbumTrack,
    ) -> Result<AlbumTrack, DbError> {
        let mut tx = pool.begin().await?;
        let position = ALBUM_TRACKS
            .prepare_insert(&mut *tx, album_id, input.position)
            .await?;

        let query = format!(
            "INSERT INTO album_tracks (album_id, song_id, position, duration_secs) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let track = sqlx::query_as::<_, AlbumTrack>(&query)
            .bind(album_id)
            .bind(input.song_id)
            .bind(position)
            .bind(input.duration_secs)
            .fetch_one(&mut *tx)
            .await?;

        ALBUM_TRACKS.verify_contiguous(&mut *tx, album_id).await?;
        tx.commit().await?;
        Ok(track)
    }

    /// Remove a track and close the gap it leaves.
    ///
    /// Returns the deleted row. Fails with `NotFound` if the track does not
    /// belong to the album.
    pub async fn delete(
        pool: &PgPool,
        album_id: DbId,
        track_id: DbId,
    ) -> Result<AlbumTrack, DbError> {
        let mut tx = pool.begin().await?;
        let position = ALBUM_TRACKS
            .prepare_removal(&mut *tx, album_id, track_id)
            .await?;

        let query = format!("DELETE FROM album_tracks WHERE id = $1 RETURNING {COLUMNS}");
        let track = sqlx::query_as::<_, AlbumTrack>(&query)
            .bind(track_id)
            .fetch_one(&mut *tx)
            .await?;

        ALBUM_TRACKS
            .compact_after_removal(&mut *tx, album_id, position)
            .await?;
        tx.commit().await?;
        Ok(track)
    }

    /// Renumber an album's tracks to follow `track_ids`.
    ///
    /// Returns the tracks in their new order.
    pub async fn reorder(
        pool: &PgPool,
        album_id: DbId,
        track_ids: &[DbId],
    ) -> Result<Vec<AlbumTrack>, DbError> {
        let mut tx = pool.begin().await?;
        ALBUM_TRACKS.reorder(&mut *tx, album_id, track_ids).await?;
        let tracks = sqlx::query_as::<_, AlbumTrack>(&list_query())
            .bind(album_id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(tracks)
    }
}

fn list_query() -> String {
    format!("SELECT {COLUMNS} FROM album_tracks WHERE album_id = $1 ORDER BY position")
}

//! Repository for the `songs` table.

use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::song::{CreateSong, Song};

const COLUMNS: &str = "id, title, created_at, updated_at";

/// Provides create and lookup for songs.
pub struct SongRepo;

impl SongRepo {
    /// Insert a new song, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSong) -> Result<Song, sqlx::Error> {
        let query = format!("INSERT INTO songs (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Song>(&query)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find a song by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Song>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM songs WHERE id = $1");
        sqlx::query_as::<_, Song>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

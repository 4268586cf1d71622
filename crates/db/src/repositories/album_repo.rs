//! Repository for the `albums` table.

use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::album::{Album, CreateAlbum};

const COLUMNS: &str = "id, title, release_date, created_at, updated_at";

/// Provides create and lookup for albums.
pub struct AlbumRepo;

impl AlbumRepo {
    /// Insert a new album, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAlbum) -> Result<Album, sqlx::Error> {
        let query = format!(
            "INSERT INTO albums (title, release_date) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Album>(&query)
            .bind(&input.title)
            .bind(input.release_date)
            .fetch_one(pool)
            .await
    }

    /// Find an album by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Album>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM albums WHERE id = $1");
        sqlx::query_as::<_, Album>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

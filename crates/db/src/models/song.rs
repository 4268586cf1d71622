//! Song entity model and DTOs.

use serde::{Deserialize, Serialize};
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `songs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Song {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new song.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSong {
    pub title: String,
}

//! Album track model and DTOs.
//!
//! A track places a song on an album at a 1-based `position`; a song
//! appears at most once per album.

use serde::{Deserialize, Serialize};
use setlist_core::types::{DbId, Position, Timestamp};
use sqlx::FromRow;

/// A row from the `album_tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlbumTrack {
    pub id: DbId,
    pub album_id: DbId,
    pub song_id: DbId,
    pub position: Position,
    pub duration_secs: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a track to an album. Omitting `position` appends.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlbumTrack {
    pub song_id: DbId,
    pub position: Option<Position>,
    pub duration_secs: Option<i32>,
}

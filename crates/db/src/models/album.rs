//! Album entity model and DTOs.
//!
//! An album owns an ordered list of tracks (see [`super::track`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `albums` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Album {
    pub id: DbId,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new album.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlbum {
    pub title: String,
    pub release_date: Option<NaiveDate>,
}

//! Event set model and DTOs.

use serde::{Deserialize, Serialize};
use setlist_core::types::{DbId, Position, Timestamp};
use sqlx::FromRow;

/// A row from the `sets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventSet {
    pub id: DbId,
    pub event_id: DbId,
    pub name: Option<String>,
    pub is_encore: bool,
    pub position: Position,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a set to an event. Omitting `position` appends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEventSet {
    pub name: Option<String>,
    pub is_encore: Option<bool>,
    pub position: Option<Position>,
}

//! Event (a single dated show) model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub event_date: NaiveDate,
    pub venue_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub event_date: NaiveDate,
    pub venue_name: Option<String>,
}

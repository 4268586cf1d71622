//! Performance (one song played within a set) model and DTOs.

use serde::{Deserialize, Serialize};
use setlist_core::performance_flags::PerformanceFlag;
use setlist_core::types::{DbId, Position, Timestamp};
use sqlx::FromRow;

/// A row from the `performances` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Performance {
    pub id: DbId,
    pub set_id: DbId,
    pub song_id: DbId,
    pub position: Position,
    pub is_segue: bool,
    pub is_debut: bool,
    pub is_tease: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a performance to a set. Omitting `position` appends.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerformance {
    pub song_id: DbId,
    pub position: Option<Position>,
    pub is_segue: Option<bool>,
    pub is_debut: Option<bool>,
    pub is_tease: Option<bool>,
    pub notes: Option<String>,
}

/// Request body for moving a performance, possibly into another set.
#[derive(Debug, Clone, Deserialize)]
pub struct MovePerformance {
    pub child_id: DbId,
    pub target_parent_id: DbId,
    pub target_position: Position,
}

/// Request body for toggling one boolean field by name.
///
/// Unknown `field` names fail to deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceFlagUpdate {
    pub field: PerformanceFlag,
    pub value: bool,
}

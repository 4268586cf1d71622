//! DTOs shared by every ordered collection.

use serde::Deserialize;
use setlist_core::types::DbId;

/// Request body for a bulk reorder: the children in their new order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub child_ids: Vec<DbId>,
}

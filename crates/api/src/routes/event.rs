//! Route definitions for event sets.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::sets;
use crate::state::AppState;

/// Routes mounted at `/events/{event_id}/sets`.
///
/// ```text
/// GET    /           -> list
/// POST   /           -> create
/// PUT    /reorder    -> reorder
/// DELETE /{set_id}   -> delete
/// ```
pub fn sets_router() -> Router<AppState> {
    Router::new()
        .route("/", get(sets::list).post(sets::create))
        .route("/reorder", put(sets::reorder))
        .route("/{set_id}", delete(sets::delete))
}

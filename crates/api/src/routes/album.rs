//! Route definitions for album tracks.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::tracks;
use crate::state::AppState;

/// Routes mounted at `/albums/{album_id}/tracks`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// PUT    /reorder      -> reorder
/// DELETE /{track_id}   -> delete
/// ```
pub fn tracks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tracks::list).post(tracks::create))
        .route("/reorder", put(tracks::reorder))
        .route("/{track_id}", delete(tracks::delete))
}

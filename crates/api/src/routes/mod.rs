pub mod album;
pub mod event;
pub mod health;
pub mod set;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /albums/{album_id}/tracks                          list, insert
/// /albums/{album_id}/tracks/reorder                  bulk reorder (PUT)
/// /albums/{album_id}/tracks/{track_id}               delete
///
/// /events/{event_id}/sets                            list, insert
/// /events/{event_id}/sets/reorder                    bulk reorder (PUT)
/// /events/{event_id}/sets/{set_id}                   delete
///
/// /sets/{set_id}/performances                        list, insert
/// /sets/{set_id}/performances/reorder                bulk reorder (PUT)
/// /sets/{set_id}/performances/move                   move across sets (PUT)
/// /sets/{set_id}/performances/{performance_id}       delete, quick flag update (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/albums/{album_id}/tracks", album::tracks_router())
        .nest("/events/{event_id}/sets", event::sets_router())
        .nest("/sets/{set_id}/performances", set::performances_router())
}

//! Route definitions for set performances.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::performances;
use crate::state::AppState;

/// Routes mounted at `/sets/{set_id}/performances`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// PUT    /reorder            -> reorder
/// PUT    /move               -> move_performance
/// DELETE /{performance_id}   -> delete
/// PATCH  /{performance_id}   -> update_flag
/// ```
pub fn performances_router() -> Router<AppState> {
    Router::new()
        .route("/", get(performances::list).post(performances::create))
        .route("/reorder", put(performances::reorder))
        .route("/move", put(performances::move_performance))
        .route(
            "/{performance_id}",
            delete(performances::delete).patch(performances::update_flag),
        )
}

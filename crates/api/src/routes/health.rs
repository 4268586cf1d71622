use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Newest applied migration; `null` if it could not be read.
    pub schema_version: Option<i64>,
    pub pool: PoolStats,
}

/// Connection pool occupancy at the time of the check.
#[derive(Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = setlist_db::health_check(&state.pool).await.is_ok();
    let schema_version = match setlist_db::schema_version(&state.pool).await {
        Ok(version) => version,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read schema version");
            None
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_version,
        pool: PoolStats {
            size: state.pool.size(),
            idle: state.pool.num_idle(),
        },
    })
}

/// Root-level health route; not nested under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

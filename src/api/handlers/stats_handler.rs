//! Platform statistics.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::Stats;
use crate::errors::AppResult;

pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/stats", get(get_stats))
}

/// Home page counters
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Stats",
    responses((status = 200, description = "Counters", body = Stats))
)]
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<Stats>> {
    Ok(Json(state.stats_service.get().await?))
}

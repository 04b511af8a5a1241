//! States and municipalities.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::AppState;
use crate::domain::{GeoState, Municipality};
use crate::errors::AppResult;
use crate::services::PopulateSummary;

pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/states", get(list_states))
        .route("/states/:state_id/municipalities", get(list_municipalities))
}

/// Routes behind the `ManageLocations` capability
pub fn location_admin_routes() -> Router<AppState> {
    Router::new().route(
        "/populate-municipalities/:state_id",
        post(populate_municipalities),
    )
}

/// Brazilian states
#[utoipa::path(
    get,
    path = "/api/states",
    tag = "Locations",
    responses(
        (status = 200, description = "States by name", body = Vec<GeoState>),
        (status = 500, description = "No local data and IBGE unavailable")
    )
)]
pub async fn list_states(State(state): State<AppState>) -> AppResult<Json<Vec<GeoState>>> {
    Ok(Json(state.location_service.list_states().await?))
}

/// Municipalities of a state
#[utoipa::path(
    get,
    path = "/api/states/{state_id}/municipalities",
    tag = "Locations",
    params(("state_id" = String, Path, description = "Two-letter state code")),
    responses(
        (status = 200, description = "Municipalities by name", body = Vec<Municipality>),
        (status = 400, description = "Invalid state code")
    )
)]
pub async fn list_municipalities(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
) -> AppResult<Json<Vec<Municipality>>> {
    Ok(Json(
        state.location_service.list_municipalities(&state_id).await?,
    ))
}

/// Import a state's municipalities from IBGE
#[utoipa::path(
    post,
    path = "/api/populate-municipalities/{state_id}",
    tag = "Locations",
    params(("state_id" = String, Path, description = "Two-letter state code")),
    responses(
        (status = 200, description = "Municipalities stored", body = PopulateSummary),
        (status = 400, description = "Invalid state code"),
        (status = 404, description = "State not found"),
        (status = 500, description = "IBGE unavailable")
    ),
    security(("bearer_auth" = []))
)]
pub async fn populate_municipalities(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
) -> AppResult<Json<PopulateSummary>> {
    Ok(Json(
        state
            .location_service
            .populate_municipalities(&state_id)
            .await?,
    ))
}

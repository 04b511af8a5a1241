//! Citizen request handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{trimmed, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{MIN_NAME_LENGTH, MIN_REQUEST_MESSAGE_LENGTH};
use crate::domain::{CitizenRequest, CreateCitizenRequest, RequestStatus, RequestType, STATE_CODE};
use crate::errors::{AppError, AppResult};
use crate::types::Created;

/// Listing filters; `politicianId` wins over `state`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RequestsQuery {
    pub politician_id: Option<String>,
    pub state: Option<String>,
    pub municipality: Option<String>,
}

/// Citizen request submission
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CitizenRequestPayload {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name must be at least 2 characters"))]
    #[schema(example = "Carlos Pereira")]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "carlos@email.com")]
    pub email: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(regex(path = *STATE_CODE, message = "State must be a two-letter code"))]
    #[schema(example = "SP")]
    pub state: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Municipality is required"))]
    #[schema(example = "Campinas")]
    pub municipality: String,
    #[serde(rename = "type")]
    #[validate(required(message = "Request type is required"))]
    pub request_type: Option<RequestType>,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = MIN_REQUEST_MESSAGE_LENGTH, message = "Message must be at least 50 characters"))]
    pub message: String,
}

/// Status change, optionally with a reply to the citizen
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct StatusUpdateRequest {
    #[validate(required(message = "Status is required"))]
    pub status: Option<RequestStatus>,
    #[schema(example = "Reparo agendado para a próxima semana.")]
    pub response: Option<String>,
}

pub fn request_routes() -> Router<AppState> {
    Router::new().route("/requests", post(create_request))
}

/// Routes behind the `ViewRequests` capability
pub fn request_inbox_routes() -> Router<AppState> {
    Router::new().route("/requests", get(list_requests))
}

/// Routes behind the `RespondToRequests` capability
pub fn request_response_routes() -> Router<AppState> {
    Router::new().route("/requests/:id/status", put(update_status))
}

/// List citizen requests
#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "Requests",
    params(RequestsQuery),
    responses(
        (status = 200, description = "Requests, newest first", body = Vec<CitizenRequest>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not allowed to view requests")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<RequestsQuery>,
) -> AppResult<Json<Vec<CitizenRequest>>> {
    let requests = match (query.politician_id, query.state) {
        (Some(politician_id), _) if !politician_id.is_empty() => {
            state.request_service.list_by_politician(&politician_id).await?
        }
        (_, Some(uf)) if !uf.is_empty() => {
            state
                .request_service
                .list_by_location(&uf, query.municipality)
                .await?
        }
        _ => state.request_service.list().await?,
    };

    Ok(Json(requests))
}

/// File a citizen request
#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Requests",
    request_body = CitizenRequestPayload,
    responses(
        (status = 201, description = "Request filed as pending", body = CitizenRequest),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CitizenRequestPayload>,
) -> AppResult<Created<CitizenRequest>> {
    let request_type = payload
        .request_type
        .ok_or_else(|| AppError::validation("request_type", "Request type is required"))?;

    let request = state
        .request_service
        .create(CreateCitizenRequest {
            name: payload.name,
            email: payload.email,
            state: payload.state,
            municipality: payload.municipality,
            request_type,
            message: payload.message,
        })
        .await?;

    Ok(Created(request))
}

/// Change a request's status
#[utoipa::path(
    put,
    path = "/api/requests/{id}/status",
    tag = "Requests",
    params(("id" = String, Path, description = "Request id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Request updated", body = CitizenRequest),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<StatusUpdateRequest>,
) -> AppResult<Json<CitizenRequest>> {
    let status = payload
        .status
        .ok_or_else(|| AppError::validation("status", "Status is required"))?;

    let request = state
        .request_service
        .update_status(&id, status, payload.response, Some(current_user.id))
        .await?;

    Ok(Json(request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_and_type_fail_validation() {
        let payload: CitizenRequestPayload = serde_json::from_value(serde_json::json!({
            "name": "Carlos",
            "email": "carlos@email.com",
            "state": "SP",
            "municipality": "Campinas"
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("message"));
        assert!(fields.contains_key("request_type"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_status_payload_uses_wire_names() {
        let payload: StatusUpdateRequest = serde_json::from_value(serde_json::json!({
            "status": "in_progress"
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.status, Some(RequestStatus::InProgress));
        assert!(payload.response.is_none());
    }
}

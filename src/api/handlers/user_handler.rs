//! User management handlers (administrators only).

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::domain::{CreateUser, UpdateUser, UserResponse, UserType, STATE_CODE_OR_EMPTY};
use crate::errors::{AppResult, OptionExt};
use crate::types::Created;

/// New user payload
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "politico@sp.gov.br")]
    pub email: Option<String>,
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name must be at least 2 characters"))]
    #[schema(example = "João Silva")]
    pub name: String,
    #[serde(rename = "type")]
    pub user_type: Option<UserType>,
    #[validate(regex(path = *STATE_CODE_OR_EMPTY, message = "State must be a two-letter code"))]
    #[schema(example = "SP")]
    pub state: Option<String>,
    pub municipality: Option<String>,
}

/// Partial user update; omitted fields stay as they are
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<UserType>,
    #[validate(regex(path = *STATE_CODE_OR_EMPTY, message = "State must be a two-letter code"))]
    pub state: Option<String>,
    pub municipality: Option<String>,
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).put(update_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Administrators only")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .user_service
        .create(CreateUser {
            email: payload.email,
            password: payload.password,
            name: payload.name,
            user_type: payload.user_type.unwrap_or_default(),
            state: payload.state,
            municipality: payload.municipality,
        })
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get(&id).await?.ok_or_not_found("User")?;
    Ok(Json(UserResponse::from(user)))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update(
            &id,
            UpdateUser {
                email: payload.email,
                password: payload.password,
                name: payload.name,
                user_type: payload.user_type,
                state: payload.state,
                municipality: payload.municipality,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

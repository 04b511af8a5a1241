//! Comment handlers: public submission and moderation.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, put},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{trimmed, ValidatedJson};
use crate::api::AppState;
use crate::config::{MIN_COMMENT_LENGTH, MIN_NAME_LENGTH};
use crate::domain::{Comment, CreateComment};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommentsQuery {
    /// `true` lists approved comments only
    pub approved: Option<String>,
}

/// Comment submission. The article comes from the path and moderation
/// state cannot be set.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CommentRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name must be at least 2 characters"))]
    #[schema(example = "Maria Souza")]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = MIN_COMMENT_LENGTH, message = "Comment must be at least 10 characters"))]
    #[schema(example = "Excelente iniciativa para a cidade!")]
    pub content: String,
}

pub fn comment_routes() -> Router<AppState> {
    Router::new().route("/news/:id/comments", get(list_comments).post(create_comment))
}

/// Routes behind the `ModerateComments` capability
pub fn moderation_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/pending", get(list_pending))
        .route("/comments/:id/approve", put(approve_comment))
        .route("/comments/:id", delete(delete_comment))
}

/// Comments on an article
#[utoipa::path(
    get,
    path = "/api/news/{id}/comments",
    tag = "Comments",
    params(("id" = String, Path, description = "News id"), CommentsQuery),
    responses((status = 200, description = "Comments, newest first", body = Vec<Comment>))
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
    Query(query): Query<CommentsQuery>,
) -> AppResult<Json<Vec<Comment>>> {
    let comments = if query.approved.as_deref() == Some("true") {
        state.comment_service.list_approved_by_news(&news_id).await?
    } else {
        state.comment_service.list_by_news(&news_id).await?
    };

    Ok(Json(comments))
}

/// Submit a comment for moderation
#[utoipa::path(
    post,
    path = "/api/news/{id}/comments",
    tag = "Comments",
    params(("id" = String, Path, description = "News id")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment awaiting moderation", body = Comment),
        (status = 400, description = "Validation error"),
        (status = 404, description = "News not found")
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CommentRequest>,
) -> AppResult<Created<Comment>> {
    let comment = state
        .comment_service
        .create(
            &news_id,
            CreateComment {
                name: payload.name,
                content: payload.content,
            },
        )
        .await?;

    Ok(Created(comment))
}

/// Moderation queue
#[utoipa::path(
    get,
    path = "/api/comments/pending",
    tag = "Comments",
    responses(
        (status = 200, description = "Unapproved comments", body = Vec<Comment>),
        (status = 403, description = "Not allowed to moderate")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_pending(State(state): State<AppState>) -> AppResult<Json<Vec<Comment>>> {
    Ok(Json(state.comment_service.list_pending().await?))
}

/// Approve a comment
#[utoipa::path(
    put,
    path = "/api/comments/{id}/approve",
    tag = "Comments",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment approved", body = Comment),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn approve_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Comment>> {
    Ok(Json(state.comment_service.approve(&id).await?))
}

/// Delete a comment
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "Comments",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.comment_service.delete(&id).await?;
    Ok(NoContent)
}

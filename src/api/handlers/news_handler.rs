//! News handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{trimmed, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{MIN_NEWS_CONTENT_LENGTH, MIN_NEWS_SUMMARY_LENGTH, MIN_NEWS_TITLE_LENGTH};
use crate::domain::{CreateNews, LocationFilter, News, UpdateNews, IMAGE_URL, STATE_CODE_OR_EMPTY};
use crate::errors::{AppResult, OptionExt};
use crate::types::{Created, NoContent};

/// Listing filters; `featured=true` wins over location
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewsQuery {
    pub featured: Option<String>,
    pub state: Option<String>,
    pub municipality: Option<String>,
}

/// New article payload
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateNewsRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = MIN_NEWS_TITLE_LENGTH, message = "Title must be at least 10 characters"))]
    #[schema(example = "Nova lei de transparência aprovada")]
    pub title: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = MIN_NEWS_CONTENT_LENGTH, message = "Content must be at least 50 characters"))]
    pub content: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = MIN_NEWS_SUMMARY_LENGTH, message = "Summary must be at least 20 characters"))]
    pub summary: String,
    #[validate(regex(path = *IMAGE_URL, message = "Image URL must be an http(s) URL"))]
    pub image_url: Option<String>,
    pub featured: bool,
    #[validate(regex(path = *STATE_CODE_OR_EMPTY, message = "State must be a two-letter code"))]
    pub state: Option<String>,
    pub municipality: Option<String>,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Category is required"))]
    #[schema(example = "Transparência")]
    pub category: String,
    /// Defaults to the authenticated user
    pub author_id: Option<Uuid>,
}

/// Partial article update; an empty string clears imageUrl, state or municipality
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    #[validate(length(min = MIN_NEWS_TITLE_LENGTH, message = "Title must be at least 10 characters"))]
    pub title: Option<String>,
    #[validate(length(min = MIN_NEWS_CONTENT_LENGTH, message = "Content must be at least 50 characters"))]
    pub content: Option<String>,
    #[validate(length(min = MIN_NEWS_SUMMARY_LENGTH, message = "Summary must be at least 20 characters"))]
    pub summary: Option<String>,
    #[validate(regex(path = *IMAGE_URL, message = "Image URL must be an http(s) URL"))]
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    #[validate(regex(path = *STATE_CODE_OR_EMPTY, message = "State must be a two-letter code"))]
    pub state: Option<String>,
    pub municipality: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,
}

impl From<UpdateNewsRequest> for UpdateNews {
    fn from(req: UpdateNewsRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            summary: req.summary,
            image_url: req.image_url.map(Some),
            featured: req.featured,
            state: req.state.map(Some),
            municipality: req.municipality.map(Some),
            category: req.category,
        }
    }
}

pub fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(list_news))
        .route("/news/:id", get(get_news))
}

/// Routes behind the `ManageNews` capability
pub fn news_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/news", post(create_news))
        .route("/news/:id", put(update_news).delete(delete_news))
}

/// List news
#[utoipa::path(
    get,
    path = "/api/news",
    tag = "News",
    params(NewsQuery),
    responses((status = 200, description = "News, newest first", body = Vec<News>))
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> AppResult<Json<Vec<News>>> {
    let news = if query.featured.as_deref() == Some("true") {
        state.news_service.list_featured().await?
    } else {
        let filter = LocationFilter::new(query.state, query.municipality);
        if filter.is_empty() {
            state.news_service.list().await?
        } else {
            state.news_service.list_by_location(filter).await?
        }
    };

    Ok(Json(news))
}

/// Get one article
#[utoipa::path(
    get,
    path = "/api/news/{id}",
    tag = "News",
    params(("id" = String, Path, description = "News id")),
    responses(
        (status = 200, description = "Article", body = News),
        (status = 404, description = "News not found")
    )
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<News>> {
    let news = state.news_service.get(&id).await?.ok_or_not_found("News")?;
    Ok(Json(news))
}

/// Publish an article
#[utoipa::path(
    post,
    path = "/api/news",
    tag = "News",
    request_body = CreateNewsRequest,
    responses(
        (status = 201, description = "Article created", body = News),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not allowed to manage news")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_news(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateNewsRequest>,
) -> AppResult<Created<News>> {
    let news = state
        .news_service
        .create(CreateNews {
            title: payload.title,
            content: payload.content,
            summary: payload.summary,
            image_url: payload.image_url,
            featured: payload.featured,
            state: payload.state,
            municipality: payload.municipality,
            category: payload.category,
            author_id: payload.author_id.unwrap_or(current_user.id),
        })
        .await?;

    Ok(Created(news))
}

/// Update an article
#[utoipa::path(
    put,
    path = "/api/news/{id}",
    tag = "News",
    params(("id" = String, Path, description = "News id")),
    request_body = UpdateNewsRequest,
    responses(
        (status = 200, description = "Article updated", body = News),
        (status = 400, description = "Validation error"),
        (status = 404, description = "News not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateNewsRequest>,
) -> AppResult<Json<News>> {
    let news = state.news_service.update(&id, payload.into()).await?;
    Ok(Json(news))
}

/// Delete an article and its comments
#[utoipa::path(
    delete,
    path = "/api/news/{id}",
    tag = "News",
    params(("id" = String, Path, description = "News id")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 404, description = "News not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.news_service.delete(&id).await?;
    Ok(NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_maps_empty_strings_to_clears() {
        let changes = UpdateNews::from(UpdateNewsRequest {
            state: Some(String::new()),
            featured: Some(true),
            ..Default::default()
        });

        assert_eq!(changes.state, Some(Some(String::new())));
        assert_eq!(changes.municipality, None);
        assert_eq!(changes.featured, Some(true));
    }

    #[test]
    fn test_create_request_rules() {
        let payload: CreateNewsRequest = serde_json::from_value(serde_json::json!({
            "title": "Curto",
            "content": "x",
            "summary": "y",
            "imageUrl": "not a url",
            "category": ""
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["title", "content", "summary", "image_url", "category"] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
        assert!(!fields.contains_key("state"));
    }
}

//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, comment_handler, location_handler, news_handler, request_handler,
    stats_handler, user_handler,
};
use crate::domain::{
    CitizenRequest, Comment, GeoState, Municipality, News, RequestStatus, RequestType, Stats,
    UserResponse, UserType,
};
use crate::errors::{ErrorResponse, FieldError};
use crate::services::{PopulateSummary, TokenResponse};

/// OpenAPI documentation for the Lei Em Mãos API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lei Em Mãos API",
        version = "0.1.0",
        description = "News, moderated comments and citizen requests routed to politicians",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Lei Em Mãos", email = "contato@leiemmaos.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        auth_handler::me,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        news_handler::list_news,
        news_handler::get_news,
        news_handler::create_news,
        news_handler::update_news,
        news_handler::delete_news,
        comment_handler::list_comments,
        comment_handler::create_comment,
        comment_handler::list_pending,
        comment_handler::approve_comment,
        comment_handler::delete_comment,
        request_handler::list_requests,
        request_handler::create_request,
        request_handler::update_status,
        location_handler::list_states,
        location_handler::list_municipalities,
        location_handler::populate_municipalities,
        stats_handler::get_stats,
    ),
    components(
        schemas(
            // Domain types
            UserType,
            UserResponse,
            News,
            Comment,
            CitizenRequest,
            RequestType,
            RequestStatus,
            GeoState,
            Municipality,
            Stats,
            // Errors
            ErrorResponse,
            FieldError,
            // Payloads
            auth_handler::LoginRequest,
            TokenResponse,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            news_handler::CreateNewsRequest,
            news_handler::UpdateNewsRequest,
            comment_handler::CommentRequest,
            request_handler::CitizenRequestPayload,
            request_handler::StatusUpdateRequest,
            PopulateSummary,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and session"),
        (name = "Users", description = "User management (administrators)"),
        (name = "News", description = "News articles"),
        (name = "Comments", description = "Reader comments and moderation"),
        (name = "Requests", description = "Citizen requests to politicians"),
        (name = "Locations", description = "States and municipalities"),
        (name = "Stats", description = "Platform counters")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_area() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/news",
            "/api/news/{id}/comments",
            "/api/requests/{id}/status",
            "/api/populate-municipalities/{state_id}",
            "/api/stats",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}

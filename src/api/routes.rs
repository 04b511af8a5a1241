//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, comment_routes, location_admin_routes, location_routes, moderation_routes,
    news_admin_routes, news_routes, request_inbox_routes, request_response_routes,
    request_routes, session_routes, stats_routes, user_routes,
};
use super::middleware::{route_guard, Capability, RouteGuard};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::API_PREFIX;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let guarded = |router: Router<AppState>, guard: RouteGuard| {
        router.route_layer(middleware::from_fn_with_state(guard, route_guard))
    };

    let api = Router::new()
        // Public routes
        .merge(auth_routes())
        .merge(news_routes())
        .merge(comment_routes())
        .merge(request_routes())
        .merge(location_routes())
        .merge(stats_routes())
        // Any valid token
        .merge(guarded(session_routes(), RouteGuard::authenticated(&state)))
        // Capability-guarded routes
        .merge(guarded(
            news_admin_routes(),
            RouteGuard::require(&state, Capability::ManageNews),
        ))
        .merge(guarded(
            moderation_routes(),
            RouteGuard::require(&state, Capability::ModerateComments),
        ))
        .merge(guarded(
            request_inbox_routes(),
            RouteGuard::require(&state, Capability::ViewRequests),
        ))
        .merge(guarded(
            request_response_routes(),
            RouteGuard::require(&state, Capability::RespondToRequests),
        ))
        .merge(guarded(
            location_admin_routes(),
            RouteGuard::require(&state, Capability::ManageLocations),
        ))
        .merge(guarded(
            user_routes(),
            RouteGuard::require(&state, Capability::ManageUsers),
        ));

    Router::new()
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(API_PREFIX, api)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    cache: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.status != "unhealthy"
    }
}

/// Health check endpoint with database and cache connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ServiceStatus::from_result(state.database.ping().await);

    // Running without Redis is a supported configuration.
    let cache = match &state.cache {
        Some(cache) => ServiceStatus::from_result(cache.ping().await),
        None => ServiceStatus {
            status: "disabled",
            error: None,
        },
    };

    let all_healthy = database.is_healthy() && cache.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database, cache },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

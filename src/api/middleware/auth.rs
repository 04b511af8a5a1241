//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::policy::Capability;
use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserType;
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub user_type: UserType,
}

/// Middleware state: the application plus what the routes behind it need.
///
/// `capability: None` only requires a valid token.
#[derive(Clone)]
pub struct RouteGuard {
    state: AppState,
    capability: Option<Capability>,
}

impl RouteGuard {
    pub fn authenticated(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            capability: None,
        }
    }

    pub fn require(state: &AppState, capability: Capability) -> Self {
        Self {
            state: state.clone(),
            capability: Some(capability),
        }
    }
}

/// JWT authentication and authorization middleware.
///
/// Validates the bearer token, asks the access policy about the guarded
/// capability, then injects the CurrentUser into the request extensions.
pub async fn route_guard(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let claims = guard.state.auth_service.verify_token(token.trim())?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
        user_type: claims.user_type,
    };

    if let Some(capability) = guard.capability {
        if !guard.state.policy.allows(&current_user, capability) {
            tracing::debug!(user_id = %current_user.id, ?capability, "Access denied");
            return Err(AppError::Forbidden);
        }
    }

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

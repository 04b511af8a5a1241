//! Authentication service - credential checks and bearer tokens.
//!
//! Passwords are verified through the domain `Password` value object;
//! tokens are HS256 JWTs carrying the user's id, email and type.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User, UserResponse, UserType};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check email and password, returning a fresh token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Issue a token for an already authenticated user
    fn issue_token(&self, user: &User) -> AppResult<TokenResponse>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        user_type: user.user_type,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
        user: UserResponse::from(user.clone()),
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(email.trim()).await?;

        // Unknown emails still pay for one hash verification.
        let stored_hash = user.as_ref().and_then(|u| u.password_hash.as_deref());
        let password_valid = Password::verify_stored(stored_hash, &password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, "User logged in");
                generate_token(&user, &self.config)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    fn issue_token(&self, user: &User) -> AppResult<TokenResponse> {
        generate_token(user, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::unit_of_work::testing::{MockPersistence, MockedUnitOfWork};
    use mockall::predicate::eq;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn config() -> Config {
        Config::new("sqlite::memory:".to_string(), SECRET.to_string()).unwrap()
    }

    fn politician(password_hash: Option<String>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: Some("politico@sp.gov.br".into()),
            password_hash,
            name: "João Silva".into(),
            user_type: UserType::Politician,
            state: Some("SP".into()),
            municipality: Some("São Paulo".into()),
            created_at: now,
            updated_at: now,
        }
    }

    fn authenticator(mocks: MockPersistence) -> Authenticator<MockedUnitOfWork> {
        Authenticator::new(Arc::new(mocks.build()), config())
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let hash = Password::new("politico123").unwrap().into_string();
        let user = politician(Some(hash));
        let user_id = user.id;

        let mut mocks = MockPersistence::default();
        mocks
            .users
            .expect_find_by_email()
            .with(eq("politico@sp.gov.br"))
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(mocks);
        let token = auth
            .login("politico@sp.gov.br".into(), "politico123".into())
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 24 * 3600);

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.user_type, UserType::Politician);
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let hash = Password::new("politico123").unwrap().into_string();
        let user = politician(Some(hash));

        let mut mocks = MockPersistence::default();
        mocks
            .users
            .expect_find_by_email()
            .with(eq("politico@sp.gov.br"))
            .returning(move |_| Ok(Some(user.clone())));
        mocks
            .users
            .expect_find_by_email()
            .with(eq("ninguem@sp.gov.br"))
            .returning(|_| Ok(None));

        let auth = authenticator(mocks);

        let wrong_password = auth
            .login("politico@sp.gov.br".into(), "wrong-password".into())
            .await;
        let unknown_email = auth
            .login("ninguem@sp.gov.br".into(), "politico123".into())
            .await;

        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_user_without_password_cannot_login() {
        let user = politician(None);

        let mut mocks = MockPersistence::default();
        mocks
            .users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let result = authenticator(mocks)
            .login("politico@sp.gov.br".into(), "anything-at-all".into())
            .await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let auth = authenticator(MockPersistence::default());
        let token = auth.issue_token(&politician(None)).unwrap().access_token;

        let mut tampered = token.clone();
        tampered.push('x');

        assert!(matches!(auth.verify_token(&tampered), Err(AppError::Jwt(_))));
        assert!(auth.verify_token(&token).is_ok());
    }
}

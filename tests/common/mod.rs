//! Shared harness for the HTTP integration tests.
//!
//! Every test gets its own in-memory SQLite database with migrations
//! applied, a fake IBGE directory and the real router on top.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::ConnectOptions;
use serde_json::Value;
use tower::ServiceExt;

use lei_em_maos::api::create_router;
use lei_em_maos::domain::{CreateUser, GeoState, Municipality, UserType};
use lei_em_maos::errors::{AppError, AppResult};
use lei_em_maos::infra::{GeoDirectory, LocationRepository, LocationStore};
use lei_em_maos::{AppState, Config, Database, User};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const TEST_PASSWORD: &str = "senha-segura-123";

// =============================================================================
// Fake IBGE directory
// =============================================================================

/// In-process stand-in for IBGE that counts calls and can be switched off.
#[derive(Default)]
pub struct FakeIbge {
    pub state_calls: AtomicUsize,
    pub municipality_calls: AtomicUsize,
    pub offline: AtomicBool,
}

impl FakeIbge {
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn state_calls(&self) -> usize {
        self.state_calls.load(Ordering::SeqCst)
    }

    pub fn municipality_calls(&self) -> usize {
        self.municipality_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::external("IBGE request failed: connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl GeoDirectory for FakeIbge {
    async fn fetch_states(&self) -> AppResult<Vec<GeoState>> {
        self.state_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        Ok(vec![
            GeoState {
                id: "MG".into(),
                name: "Minas Gerais".into(),
            },
            GeoState {
                id: "SP".into(),
                name: "São Paulo".into(),
            },
        ])
    }

    async fn fetch_municipalities(&self, state_id: &str) -> AppResult<Vec<Municipality>> {
        self.municipality_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let names: &[(&str, &str)] = match state_id {
            "SP" => &[("3509502", "Campinas"), ("3550308", "São Paulo")],
            "AC" => &[("1200401", "Rio Branco")],
            _ => &[],
        };

        Ok(names
            .iter()
            .map(|(id, name)| Municipality {
                id: id.to_string(),
                name: name.to_string(),
                state_id: state_id.to_string(),
            })
            .collect())
    }
}

// =============================================================================
// Test application
// =============================================================================

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub database: Arc<Database>,
    pub ibge: Arc<FakeIbge>,
}

/// Response status plus parsed JSON body (`Null` when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn test_database() -> Database {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // One connection, otherwise each pool member sees its own empty database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let database = Database::connect_with(options)
        .await
        .expect("in-memory database");
    database.run_migrations().await.expect("migrations");
    database
}

pub fn test_config() -> Config {
    Config::new("sqlite::memory:", TEST_SECRET).expect("test config")
}

impl TestApp {
    pub async fn spawn() -> Self {
        let database = Arc::new(test_database().await);
        let ibge = Arc::new(FakeIbge::default());

        let state = AppState::from_config(database.clone(), None, ibge.clone(), test_config());
        let router = create_router(state.clone());

        Self {
            router,
            state,
            database,
            ibge,
        }
    }

    pub async fn create_user(&self, email: &str, user_type: UserType) -> User {
        self.state
            .user_service
            .create(CreateUser {
                email: Some(email.to_string()),
                password: Some(TEST_PASSWORD.to_string()),
                name: "Usuário de Teste".into(),
                user_type,
                state: Some("SP".into()),
                municipality: Some("Campinas".into()),
            })
            .await
            .expect("create user")
    }

    /// Create a user of the given type and return a bearer token for it.
    pub async fn token_for(&self, email: &str, user_type: UserType) -> (User, String) {
        let user = self.create_user(email, user_type).await;
        let token = self
            .state
            .auth_service
            .issue_token(&user)
            .expect("issue token")
            .access_token;
        (user, token)
    }

    pub async fn admin_token(&self) -> String {
        self.token_for("admin@leiemmaos.com", UserType::Admin).await.1
    }

    pub async fn insert_state(&self, id: &str, name: &str) {
        LocationStore::new(self.database.get_connection())
            .upsert_state(GeoState {
                id: id.into(),
                name: name.into(),
            })
            .await
            .expect("insert state");
    }

    pub async fn insert_municipality(&self, id: &str, name: &str, state_id: &str) {
        LocationStore::new(self.database.get_connection())
            .upsert_municipality(Municipality {
                id: id.into(),
                name: name.into(),
                state_id: state_id.into(),
            })
            .await
            .expect("insert municipality");
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }
}

/// Spacing between inserts whose ordering by `created_at` is asserted.
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

pub fn news_payload(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "content": "Conteúdo completo da notícia com detalhes suficientes para passar na validação.",
        "summary": "Resumo curto mas com tamanho mínimo",
        "category": "Política"
    })
}

pub fn request_payload(state: &str, municipality: &str) -> Value {
    serde_json::json!({
        "name": "Maria Souza",
        "email": "maria@example.com",
        "state": state,
        "municipality": municipality,
        "type": "infraestrutura",
        "message": "A rua principal do bairro está sem iluminação há mais de duas semanas."
    })
}

pub fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|item| item["id"].as_str().expect("id").to_string())
        .collect()
}

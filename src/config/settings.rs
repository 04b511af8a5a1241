//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_GEO_CACHE_TTL_SECONDS, DEFAULT_IBGE_API_URL, DEFAULT_IBGE_TIMEOUT_SECONDS,
    DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Redis is optional; without it geographic lookups are not cached.
    pub redis_url: Option<String>,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub ibge_api_url: String,
    pub ibge_timeout_seconds: u64,
    pub geo_cache_ttl_seconds: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("ibge_api_url", &self.ibge_api_url)
            .field("ibge_timeout_seconds", &self.ibge_timeout_seconds)
            .field("geo_cache_ttl_seconds", &self.geo_cache_ttl_seconds)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the
    /// connection string and signing secret.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::Config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: database_url.into(),
            redis_url: None,
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            ibge_api_url: DEFAULT_IBGE_API_URL.to_string(),
            ibge_timeout_seconds: DEFAULT_IBGE_TIMEOUT_SECONDS,
            geo_cache_ttl_seconds: DEFAULT_GEO_CACHE_TTL_SECONDS,
        })
    }

    /// Load configuration from environment variables (and `.env`).
    ///
    /// # Errors
    /// Fails if `DATABASE_URL` is missing, or if `JWT_SECRET` is missing in a
    /// release build or too short.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| {
            AppError::Config("DATABASE_URL must be set to the database connection string".into())
        })?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::Config(
                    "JWT_SECRET environment variable must be set in production".into(),
                ))
            }
        };

        let mut config = Self::new(database_url, jwt_secret)?;
        config.redis_url = env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty());
        config.jwt_expiration_hours = parse_env("JWT_EXPIRATION_HOURS", config.jwt_expiration_hours);
        config.server_host = env::var("SERVER_HOST").unwrap_or(config.server_host);
        config.server_port = parse_env("SERVER_PORT", config.server_port);
        config.ibge_api_url = env::var("IBGE_API_URL").unwrap_or(config.ibge_api_url);
        config.ibge_timeout_seconds = parse_env("IBGE_TIMEOUT_SECONDS", config.ibge_timeout_seconds);
        config.geo_cache_ttl_seconds =
            parse_env("GEO_CACHE_TTL_SECONDS", config.geo_cache_ttl_seconds);

        Ok(config)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_new_applies_defaults() {
        let config = Config::new("sqlite::memory:", SECRET).unwrap();

        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert_eq!(config.ibge_api_url, DEFAULT_IBGE_API_URL);
        assert!(config.redis_url.is_none());
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new("sqlite::memory:", "short");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("postgres://user:hunter2@db/leiemmaos", SECRET).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains(SECRET));
    }
}

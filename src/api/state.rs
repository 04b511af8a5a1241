//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use super::middleware::{AccessPolicy, RolePolicy};
use crate::config::Config;
use crate::infra::{CacheStore, Database, GeoDirectory, ReferenceCache};
use crate::services::{
    AuthService, CommentService, LocationService, NewsService, RequestService, ServiceContainer,
    Services, StatsService, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub news_service: Arc<dyn NewsService>,
    pub comment_service: Arc<dyn CommentService>,
    pub request_service: Arc<dyn RequestService>,
    pub location_service: Arc<dyn LocationService>,
    pub stats_service: Arc<dyn StatsService>,
    /// Who may use the guarded routes
    pub policy: Arc<dyn AccessPolicy>,
    /// Database connection
    pub database: Arc<Database>,
    /// Redis cache, when configured
    pub cache: Option<Arc<dyn CacheStore>>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// Uses the default role policy; see `with_policy` to replace it.
    pub fn from_config(
        database: Arc<Database>,
        cache: Option<Arc<dyn CacheStore>>,
        geo: Arc<dyn GeoDirectory>,
        config: Config,
    ) -> Self {
        let reference_cache = ReferenceCache::new(cache.clone(), config.geo_cache_ttl_seconds);
        let container = Services::from_connection(
            database.get_connection(),
            config,
            geo,
            reference_cache,
        );

        Self::new(&container, Arc::new(RolePolicy), database, cache)
    }

    /// Create application state from an already wired service container.
    pub fn new(
        services: &dyn ServiceContainer,
        policy: Arc<dyn AccessPolicy>,
        database: Arc<Database>,
        cache: Option<Arc<dyn CacheStore>>,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            news_service: services.news(),
            comment_service: services.comments(),
            request_service: services.requests(),
            location_service: services.locations(),
            stats_service: services.stats(),
            policy,
            database,
            cache,
        }
    }

    /// Swap the access policy.
    pub fn with_policy(mut self, policy: Arc<dyn AccessPolicy>) -> Self {
        self.policy = policy;
        self
    }
}

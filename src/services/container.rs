//! Service Container - Centralized service access with parallel execution support.
//!
//! Features:
//! - Centralized access to all application services
//! - Thread-safe concurrent access via Arc
//! - Parallel execution utilities for independent operations

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, CommentService, LocationService, NewsService, RequestService, StatsService,
    UserService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{GeoDirectory, Persistence, ReferenceCache};

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn news(&self) -> Arc<dyn NewsService>;

    fn comments(&self) -> Arc<dyn CommentService>;

    fn requests(&self) -> Arc<dyn RequestService>;

    fn locations(&self) -> Arc<dyn LocationService>;

    fn stats(&self) -> Arc<dyn StatsService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    news_service: Arc<dyn NewsService>,
    comment_service: Arc<dyn CommentService>,
    request_service: Arc<dyn RequestService>,
    location_service: Arc<dyn LocationService>,
    stats_service: Arc<dyn StatsService>,
}

impl Services {
    /// Wire every service over one database connection.
    ///
    /// `geo` answers location lookups the local tables cannot; `cache`
    /// fronts them.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        geo: Arc<dyn GeoDirectory>,
        cache: ReferenceCache,
    ) -> Self {
        use super::{
            Authenticator, CommentManager, LocationManager, NewsManager, RequestManager,
            StatsManager, UserManager,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            news_service: Arc::new(NewsManager::new(uow.clone())),
            comment_service: Arc::new(CommentManager::new(uow.clone())),
            request_service: Arc::new(RequestManager::new(uow.clone())),
            location_service: Arc::new(LocationManager::new(uow.clone(), geo, cache)),
            stats_service: Arc::new(StatsManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn news(&self) -> Arc<dyn NewsService> {
        self.news_service.clone()
    }

    fn comments(&self) -> Arc<dyn CommentService> {
        self.comment_service.clone()
    }

    fn requests(&self) -> Arc<dyn RequestService> {
        self.request_service.clone()
    }

    fn locations(&self) -> Arc<dyn LocationService> {
        self.location_service.clone()
    }

    fn stats(&self) -> Arc<dyn StatsService> {
        self.stats_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute four independent async operations in parallel.
    ///
    /// If any operation fails, the first error is returned.
    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }

    /// Execute operations in parallel with a concurrency limit.
    ///
    /// Results come back in completion order, not input order.
    pub async fn join_all_limited<F, T, I>(futures: I, limit: usize) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
        I: IntoIterator<Item = F>,
    {
        use futures::stream::{self, StreamExt, TryStreamExt};

        stream::iter(futures)
            .buffer_unordered(limit.max(1))
            .try_collect()
            .await
    }
}

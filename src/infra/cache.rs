//! Redis cache implementation.
//!
//! `Cache` is the raw Redis store behind the `CacheStore` trait;
//! `ReferenceCache` layers JSON (de)serialization and a fixed TTL on top and
//! treats every cache failure as a miss.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// String key/value store with expiry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>>;

    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> AppResult<()>;

    /// Round trip to the server
    async fn ping(&self) -> AppResult<()>;
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis, returning an error instead of panicking.
    pub async fn connect(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheStore for Cache {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection.clone();
        conn.get(key).await.map_err(cache_error)
    }

    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(cache_error)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    AppError::internal(format!("Cache error: {}", e))
}

/// Typed, failure-tolerant cache for reference data.
///
/// Without a backing store every lookup is a miss and every write a no-op.
#[derive(Clone)]
pub struct ReferenceCache {
    store: Option<Arc<dyn CacheStore>>,
    ttl_seconds: u64,
}

impl ReferenceCache {
    pub fn new(store: Option<Arc<dyn CacheStore>>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    pub fn disabled() -> Self {
        Self::new(None, 0)
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let store = self.store.as_ref()?;

        match store.get_raw(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => {
                    tracing::debug!(key, "Cache hit");
                    Some(value)
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "Discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache read failed");
                None
            }
        }
    }

    pub async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache serialization failed");
                return;
            }
        };

        if let Err(e) = store.set_raw(key, json, self.ttl_seconds).await {
            tracing::warn!(key, error = %e, "Cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoState;
    use mockall::predicate::eq;

    fn sp() -> GeoState {
        GeoState {
            id: "SP".into(),
            name: "São Paulo".into(),
        }
    }

    #[tokio::test]
    async fn test_disabled_cache_always_misses() {
        let cache = ReferenceCache::disabled();
        cache.put("geo:states", &vec![sp()]).await;
        assert!(cache.get::<Vec<GeoState>>("geo:states").await.is_none());
    }

    #[tokio::test]
    async fn test_hit_decodes_json() {
        let mut store = MockCacheStore::new();
        store
            .expect_get_raw()
            .with(eq("geo:states"))
            .returning(|_| Ok(Some(r#"[{"id":"SP","name":"São Paulo"}]"#.to_string())));

        let cache = ReferenceCache::new(Some(Arc::new(store)), 60);
        assert_eq!(cache.get::<Vec<GeoState>>("geo:states").await, Some(vec![sp()]));
    }

    #[tokio::test]
    async fn test_errors_are_misses() {
        let mut store = MockCacheStore::new();
        store
            .expect_get_raw()
            .returning(|_| Err(AppError::internal("connection refused")));
        store
            .expect_set_raw()
            .withf(|key, _, ttl| key == "geo:states" && *ttl == 60)
            .times(1)
            .returning(|_, _, _| Err(AppError::internal("connection refused")));

        let cache = ReferenceCache::new(Some(Arc::new(store)), 60);
        assert!(cache.get::<Vec<GeoState>>("geo:states").await.is_none());
        cache.put("geo:states", &vec![sp()]).await;
    }

    #[tokio::test]
    async fn test_garbage_entry_is_a_miss() {
        let mut store = MockCacheStore::new();
        store
            .expect_get_raw()
            .returning(|_| Ok(Some("not json".to_string())));

        let cache = ReferenceCache::new(Some(Arc::new(store)), 60);
        assert!(cache.get::<Vec<GeoState>>("geo:states").await.is_none());
    }
}

//! Location service - states and municipalities.
//!
//! Reads go through the reference cache first. States prefer the local
//! table and fall back to IBGE; municipalities prefer IBGE and fall back to
//! the local table when IBGE is unreachable.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::container::parallel;
use crate::config::{CACHE_KEY_STATES, CACHE_PREFIX_MUNICIPALITIES, POPULATE_CONCURRENCY};
use crate::domain::{normalize_state_code, GeoState, Municipality};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{GeoDirectory, ReferenceCache, UnitOfWork};

/// Outcome of an IBGE import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PopulateSummary {
    #[schema(example = "Successfully populated 645 municipalities for SP")]
    pub message: String,
    pub count: usize,
}

#[async_trait]
pub trait LocationService: Send + Sync {
    async fn list_states(&self) -> AppResult<Vec<GeoState>>;

    async fn list_municipalities(&self, state: &str) -> AppResult<Vec<Municipality>>;

    /// Import every municipality of a known state from IBGE
    async fn populate_municipalities(&self, state: &str) -> AppResult<PopulateSummary>;
}

pub struct LocationManager<U: UnitOfWork> {
    uow: Arc<U>,
    geo: Arc<dyn GeoDirectory>,
    cache: ReferenceCache,
}

impl<U: UnitOfWork> LocationManager<U> {
    pub fn new(uow: Arc<U>, geo: Arc<dyn GeoDirectory>, cache: ReferenceCache) -> Self {
        Self { uow, geo, cache }
    }
}

fn state_param(raw: &str) -> AppResult<String> {
    normalize_state_code(raw)
        .ok_or_else(|| AppError::bad_request("State must be a two-letter code"))
}

fn municipalities_key(state: &str) -> String {
    format!("{}{}", CACHE_PREFIX_MUNICIPALITIES, state)
}

#[async_trait]
impl<U: UnitOfWork> LocationService for LocationManager<U> {
    async fn list_states(&self) -> AppResult<Vec<GeoState>> {
        if let Some(states) = self.cache.get::<Vec<GeoState>>(CACHE_KEY_STATES).await {
            return Ok(states);
        }

        let local = self.uow.locations().list_states().await?;
        if !local.is_empty() {
            return Ok(local);
        }

        let states = self.geo.fetch_states().await?;
        self.cache.put(CACHE_KEY_STATES, &states).await;
        Ok(states)
    }

    async fn list_municipalities(&self, state: &str) -> AppResult<Vec<Municipality>> {
        let state = state_param(state)?;
        let key = municipalities_key(&state);

        if let Some(municipalities) = self.cache.get::<Vec<Municipality>>(&key).await {
            return Ok(municipalities);
        }

        match self.geo.fetch_municipalities(&state).await {
            Ok(municipalities) => {
                self.cache.put(&key, &municipalities).await;
                Ok(municipalities)
            }
            Err(e) => {
                tracing::warn!(state = %state, error = %e, "IBGE unavailable, using local municipalities");
                self.uow
                    .locations()
                    .list_municipalities_by_state(&state)
                    .await
            }
        }
    }

    async fn populate_municipalities(&self, state: &str) -> AppResult<PopulateSummary> {
        let state = state_param(state)?;

        self.uow
            .locations()
            .find_state(&state)
            .await?
            .ok_or_not_found("State")?;

        let municipalities = self.geo.fetch_municipalities(&state).await?;

        let locations = self.uow.locations();
        parallel::join_all_limited(
            municipalities
                .iter()
                .cloned()
                .map(|m| locations.upsert_municipality(m)),
            POPULATE_CONCURRENCY,
        )
        .await?;

        self.cache.put(&municipalities_key(&state), &municipalities).await;

        let count = municipalities.len();
        tracing::info!(state = %state, count, "Municipalities populated from IBGE");

        Ok(PopulateSummary {
            message: format!("Successfully populated {} municipalities for {}", count, state),
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::cache::MockCacheStore;
    use crate::infra::ibge::MockGeoDirectory;
    use crate::infra::unit_of_work::testing::{MockPersistence, MockedUnitOfWork};
    use mockall::predicate::eq;

    fn campinas() -> Municipality {
        Municipality {
            id: "3509502".into(),
            name: "Campinas".into(),
            state_id: "SP".into(),
        }
    }

    fn service(
        mocks: MockPersistence,
        geo: MockGeoDirectory,
        cache: ReferenceCache,
    ) -> LocationManager<MockedUnitOfWork> {
        LocationManager::new(Arc::new(mocks.build()), Arc::new(geo), cache)
    }

    #[tokio::test]
    async fn test_states_come_from_local_table_first() {
        let mut mocks = MockPersistence::default();
        mocks.locations.expect_list_states().returning(|| {
            Ok(vec![GeoState {
                id: "AC".into(),
                name: "Acre".into(),
            }])
        });
        let mut geo = MockGeoDirectory::new();
        geo.expect_fetch_states().never();

        let states = service(mocks, geo, ReferenceCache::disabled())
            .list_states()
            .await
            .unwrap();
        assert_eq!(states.len(), 1);
    }

    #[tokio::test]
    async fn test_states_fall_back_to_ibge_and_fail_with_it() {
        let mut mocks = MockPersistence::default();
        mocks.locations.expect_list_states().returning(|| Ok(vec![]));
        let mut geo = MockGeoDirectory::new();
        geo.expect_fetch_states()
            .returning(|| Err(AppError::external("IBGE returned 503")));

        let result = service(mocks, geo, ReferenceCache::disabled())
            .list_states()
            .await;
        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }

    #[tokio::test]
    async fn test_municipalities_fall_back_to_local_table() {
        let mut mocks = MockPersistence::default();
        mocks
            .locations
            .expect_list_municipalities_by_state()
            .with(eq("SP"))
            .times(1)
            .returning(|_| Ok(vec![campinas()]));
        let mut geo = MockGeoDirectory::new();
        geo.expect_fetch_municipalities()
            .returning(|_| Err(AppError::external("timeout")));

        let municipalities = service(mocks, geo, ReferenceCache::disabled())
            .list_municipalities("sp")
            .await
            .unwrap();
        assert_eq!(municipalities, vec![campinas()]);
    }

    #[tokio::test]
    async fn test_cached_municipalities_skip_ibge() {
        let mut store = MockCacheStore::new();
        store
            .expect_get_raw()
            .with(eq("geo:municipalities:SP"))
            .returning(|_| Ok(Some(serde_json::to_string(&vec![campinas()]).unwrap())));
        let mut geo = MockGeoDirectory::new();
        geo.expect_fetch_municipalities().never();

        let cache = ReferenceCache::new(Some(Arc::new(store)), 60);
        let municipalities = service(MockPersistence::default(), geo, cache)
            .list_municipalities("SP")
            .await
            .unwrap();
        assert_eq!(municipalities[0].name, "Campinas");
    }

    #[tokio::test]
    async fn test_invalid_state_code_is_bad_request() {
        let manager = service(
            MockPersistence::default(),
            MockGeoDirectory::new(),
            ReferenceCache::disabled(),
        );

        assert!(matches!(
            manager.list_municipalities("São Paulo").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            manager.populate_municipalities("1").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_populate_unknown_state_is_not_found() {
        let mut mocks = MockPersistence::default();
        mocks.locations.expect_find_state().returning(|_| Ok(None));
        let mut geo = MockGeoDirectory::new();
        geo.expect_fetch_municipalities().never();

        let result = service(mocks, geo, ReferenceCache::disabled())
            .populate_municipalities("ZZ")
            .await;
        assert!(matches!(result, Err(AppError::NotFound("State"))));
    }

    #[tokio::test]
    async fn test_populate_upserts_every_municipality() {
        let mut mocks = MockPersistence::default();
        mocks.locations.expect_find_state().returning(|id| {
            Ok(Some(GeoState {
                id: id.to_string(),
                name: "São Paulo".into(),
            }))
        });
        mocks
            .locations
            .expect_upsert_municipality()
            .times(2)
            .returning(|_| Ok(()));
        let mut geo = MockGeoDirectory::new();
        geo.expect_fetch_municipalities().with(eq("SP")).returning(|_| {
            Ok(vec![
                campinas(),
                Municipality {
                    id: "3548500".into(),
                    name: "Santos".into(),
                    state_id: "SP".into(),
                },
            ])
        });

        let summary = service(mocks, geo, ReferenceCache::disabled())
            .populate_municipalities("sp")
            .await
            .unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.message, "Successfully populated 2 municipalities for SP");
    }
}

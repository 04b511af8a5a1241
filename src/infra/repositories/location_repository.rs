//! States and municipalities.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use super::base::ReadRepository;
use super::entities::municipality::{self, Entity as MunicipalityEntity};
use super::entities::state::{self, Entity as StateEntity};
use crate::domain::{GeoState, Municipality};
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

/// Locally stored geographic reference data.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// All states, alphabetical by name
    async fn list_states(&self) -> AppResult<Vec<GeoState>>;

    async fn find_state(&self, id: &str) -> AppResult<Option<GeoState>>;

    /// Insert or rename a state
    async fn upsert_state(&self, state: GeoState) -> AppResult<()>;

    /// Municipalities of one state, alphabetical by name
    async fn list_municipalities_by_state(&self, state_id: &str) -> AppResult<Vec<Municipality>>;

    /// Insert or replace a municipality keyed by its id
    async fn upsert_municipality(&self, municipality: Municipality) -> AppResult<()>;
}

/// SeaORM-backed location repository
pub struct LocationStore {
    db: DatabaseConnection,
}

impl LocationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<StateEntity> for LocationStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl LocationRepository for LocationStore {
    async fn list_states(&self) -> AppResult<Vec<GeoState>> {
        let models = StateEntity::find()
            .order_by_asc(state::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(GeoState::from).collect())
    }

    async fn find_state(&self, id: &str) -> AppResult<Option<GeoState>> {
        Ok(self.find_model(id.to_string()).await?.map(GeoState::from))
    }

    async fn upsert_state(&self, input: GeoState) -> AppResult<()> {
        let model = state::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
        };

        StateEntity::insert(model)
            .on_conflict(
                OnConflict::column(state::Column::Id)
                    .update_column(state::Column::Name)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn list_municipalities_by_state(&self, state_id: &str) -> AppResult<Vec<Municipality>> {
        let models = MunicipalityEntity::find()
            .filter(municipality::Column::StateId.eq(state_id))
            .order_by_asc(municipality::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Municipality::from).collect())
    }

    async fn upsert_municipality(&self, input: Municipality) -> AppResult<()> {
        let model = municipality::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            state_id: Set(input.state_id),
        };

        MunicipalityEntity::insert(model)
            .on_conflict(
                OnConflict::column(municipality::Column::Id)
                    .update_columns([municipality::Column::Name, municipality::Column::StateId])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}

//! Citizen request repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};
use uuid::Uuid;

use super::base::ReadRepository;
use super::entities::request::{self, ActiveModel, Entity as RequestEntity};
use crate::domain::{CitizenRequest, CreateCitizenRequest, RequestStatus};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Citizen request repository. Every listing is ordered newest first.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<CitizenRequest>>;

    async fn list_by_politician(&self, politician_id: Uuid) -> AppResult<Vec<CitizenRequest>>;

    async fn list_by_location(
        &self,
        state: &str,
        municipality: Option<String>,
    ) -> AppResult<Vec<CitizenRequest>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CitizenRequest>>;

    /// Insert as `pending` with no politician and no response
    async fn create(&self, request: CreateCitizenRequest) -> AppResult<CitizenRequest>;

    /// Set the status. `response` replaces the stored one only when given;
    /// `politician_id` is recorded only if no politician has claimed the
    /// request yet.
    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
        response: Option<String>,
        politician_id: Option<Uuid>,
    ) -> AppResult<CitizenRequest>;

    async fn count(&self) -> AppResult<u64>;

    async fn count_by_status(&self, status: RequestStatus) -> AppResult<u64>;
}

/// SeaORM-backed request repository
pub struct RequestStore {
    db: DatabaseConnection,
}

impl RequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(&self, query: Select<RequestEntity>) -> AppResult<Vec<CitizenRequest>> {
        query
            .order_by_desc(request::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(CitizenRequest::try_from)
            .collect()
    }
}

impl ReadRepository<RequestEntity> for RequestStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl RequestRepository for RequestStore {
    async fn list(&self) -> AppResult<Vec<CitizenRequest>> {
        self.fetch(RequestEntity::find()).await
    }

    async fn list_by_politician(&self, politician_id: Uuid) -> AppResult<Vec<CitizenRequest>> {
        self.fetch(RequestEntity::find().filter(request::Column::PoliticianId.eq(politician_id)))
            .await
    }

    async fn list_by_location(
        &self,
        state: &str,
        municipality: Option<String>,
    ) -> AppResult<Vec<CitizenRequest>> {
        let mut query = RequestEntity::find().filter(request::Column::State.eq(state));

        if let Some(municipality) = municipality {
            query = query.filter(request::Column::Municipality.eq(municipality));
        }

        self.fetch(query).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CitizenRequest>> {
        self.find_model(id)
            .await?
            .map(CitizenRequest::try_from)
            .transpose()
    }

    async fn create(&self, input: CreateCitizenRequest) -> AppResult<CitizenRequest> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            state: Set(input.state),
            municipality: Set(input.municipality),
            request_type: Set(input.request_type.as_str().to_string()),
            message: Set(input.message),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            politician_id: Set(None),
            response: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        CitizenRequest::try_from(model)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
        response: Option<String>,
        politician_id: Option<Uuid>,
    ) -> AppResult<CitizenRequest> {
        let existing = self
            .find_model(id)
            .await?
            .ok_or(AppError::NotFound("Request"))?;
        let unclaimed = existing.politician_id.is_none();

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());

        if let Some(response) = response {
            active.response = Set(Some(response));
        }
        if unclaimed && politician_id.is_some() {
            active.politician_id = Set(politician_id);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        CitizenRequest::try_from(model)
    }

    async fn count(&self) -> AppResult<u64> {
        self.count_all().await
    }

    async fn count_by_status(&self, status: RequestStatus) -> AppResult<u64> {
        RequestEntity::find()
            .filter(request::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}

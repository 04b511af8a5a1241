//! Citizen request service - intake and politician follow-up.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    blank_to_none, normalize_state_code, parse_id, CitizenRequest, CreateCitizenRequest,
    RequestStatus,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait RequestService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<CitizenRequest>>;

    /// Requests claimed by a politician; a malformed id lists nothing
    async fn list_by_politician(&self, politician_id: &str) -> AppResult<Vec<CitizenRequest>>;

    async fn list_by_location(
        &self,
        state: &str,
        municipality: Option<String>,
    ) -> AppResult<Vec<CitizenRequest>>;

    /// File a new request; it always starts `pending`
    async fn create(&self, input: CreateCitizenRequest) -> AppResult<CitizenRequest>;

    /// Move a request to `status`. A blank response keeps the stored one.
    /// `actor` claims the request if nobody has yet.
    async fn update_status(
        &self,
        id: &str,
        status: RequestStatus,
        response: Option<String>,
        actor: Option<Uuid>,
    ) -> AppResult<CitizenRequest>;
}

pub struct RequestManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RequestManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RequestService for RequestManager<U> {
    async fn list(&self) -> AppResult<Vec<CitizenRequest>> {
        self.uow.requests().list().await
    }

    async fn list_by_politician(&self, politician_id: &str) -> AppResult<Vec<CitizenRequest>> {
        match parse_id(politician_id) {
            Some(id) => self.uow.requests().list_by_politician(id).await,
            None => Ok(Vec::new()),
        }
    }

    async fn list_by_location(
        &self,
        state: &str,
        municipality: Option<String>,
    ) -> AppResult<Vec<CitizenRequest>> {
        let Some(state) = normalize_state_code(state) else {
            return Ok(Vec::new());
        };

        self.uow
            .requests()
            .list_by_location(&state, blank_to_none(municipality))
            .await
    }

    async fn create(&self, input: CreateCitizenRequest) -> AppResult<CitizenRequest> {
        let state = normalize_state_code(&input.state)
            .ok_or_else(|| AppError::validation("state", "State must be a two-letter code"))?;

        let input = CreateCitizenRequest {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            state,
            municipality: input.municipality.trim().to_string(),
            ..input
        };

        let request = self.uow.requests().create(input).await?;
        tracing::info!(
            request_id = %request.id,
            state = %request.state,
            request_type = request.request_type.as_str(),
            "Citizen request filed"
        );
        Ok(request)
    }

    async fn update_status(
        &self,
        id: &str,
        status: RequestStatus,
        response: Option<String>,
        actor: Option<Uuid>,
    ) -> AppResult<CitizenRequest> {
        let id = parse_id(id).ok_or(AppError::InvalidId("request"))?;

        let request = self
            .uow
            .requests()
            .update_status(id, status, blank_to_none(response), actor)
            .await?;

        tracing::info!(request_id = %id, status = status.as_str(), "Request status updated");
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequestType;
    use crate::infra::unit_of_work::testing::{MockPersistence, MockedUnitOfWork};
    use chrono::Utc;
    use mockall::predicate::{always, eq};

    fn service(mocks: MockPersistence) -> RequestManager<MockedUnitOfWork> {
        RequestManager::new(Arc::new(mocks.build()))
    }

    fn pending(id: Uuid) -> CitizenRequest {
        let now = Utc::now();
        CitizenRequest {
            id,
            name: "Carlos".into(),
            email: "carlos@email.com".into(),
            state: "SP".into(),
            municipality: "Campinas".into(),
            request_type: RequestType::Infrastructure,
            message: "Buraco na rua principal do bairro há mais de três meses sem reparo.".into(),
            status: RequestStatus::Pending,
            politician_id: None,
            response: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_blank_response_is_not_written() {
        let id = Uuid::new_v4();
        let actor = Uuid::new_v4();

        let mut mocks = MockPersistence::default();
        mocks
            .requests
            .expect_update_status()
            .with(eq(id), eq(RequestStatus::InProgress), eq(None::<String>), eq(Some(actor)))
            .times(1)
            .returning(|id, status, _, politician| {
                let mut request = pending(id);
                request.status = status;
                request.politician_id = politician;
                Ok(request)
            });

        let request = service(mocks)
            .update_status(
                &id.to_string(),
                RequestStatus::InProgress,
                Some("   ".into()),
                Some(actor),
            )
            .await
            .unwrap();

        assert_eq!(request.status, RequestStatus::InProgress);
        assert_eq!(request.politician_id, Some(actor));
    }

    #[tokio::test]
    async fn test_response_is_trimmed() {
        let id = Uuid::new_v4();

        let mut mocks = MockPersistence::default();
        mocks
            .requests
            .expect_update_status()
            .with(
                always(),
                eq(RequestStatus::Resolved),
                eq(Some("Reparo agendado.".to_string())),
                always(),
            )
            .returning(|id, _, _, _| Ok(pending(id)));

        service(mocks)
            .update_status(
                &id.to_string(),
                RequestStatus::Resolved,
                Some(" Reparo agendado. ".into()),
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_location_listing_normalizes_state() {
        let mut mocks = MockPersistence::default();
        mocks
            .requests
            .expect_list_by_location()
            .with(eq("RJ"), eq(None::<String>))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let requests = service(mocks);
        requests.list_by_location("rj", Some(String::new())).await.unwrap();
        assert!(requests.list_by_location("Rio", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_ids() {
        let requests = service(MockPersistence::default());

        assert!(requests.list_by_politician("x").await.unwrap().is_empty());
        assert!(matches!(
            requests
                .update_status("x", RequestStatus::Resolved, None, None)
                .await,
            Err(AppError::InvalidId("request"))
        ));
    }
}

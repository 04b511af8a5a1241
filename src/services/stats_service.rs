//! Stats service - home page counters.

use async_trait::async_trait;
use std::sync::Arc;

use super::container::parallel;
use crate::domain::{RequestStatus, Stats, UserType};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait StatsService: Send + Sync {
    async fn get(&self) -> AppResult<Stats>;
}

pub struct StatsManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StatsManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> StatsService for StatsManager<U> {
    async fn get(&self) -> AppResult<Stats> {
        let news = self.uow.news();
        let requests = self.uow.requests();
        let users = self.uow.users();

        let (news_count, requests_count, politicians_count, resolved) = parallel::join4(
            news.count(),
            requests.count(),
            users.count_by_type(UserType::Politician),
            requests.count_by_status(RequestStatus::Resolved),
        )
        .await?;

        Ok(Stats::new(news_count, requests_count, politicians_count, resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::unit_of_work::testing::MockPersistence;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_counts_and_rate() {
        let mut mocks = MockPersistence::default();
        mocks.news.expect_count().returning(|| Ok(12));
        mocks.requests.expect_count().returning(|| Ok(3));
        mocks
            .requests
            .expect_count_by_status()
            .with(eq(RequestStatus::Resolved))
            .returning(|_| Ok(1));
        mocks
            .users
            .expect_count_by_type()
            .with(eq(UserType::Politician))
            .returning(|_| Ok(4));

        let stats = StatsManager::new(Arc::new(mocks.build())).get().await.unwrap();

        assert_eq!(stats, Stats::new(12, 3, 4, 1));
        assert_eq!(stats.response_rate, 33);
    }

    #[tokio::test]
    async fn test_empty_platform() {
        let mut mocks = MockPersistence::default();
        mocks.news.expect_count().returning(|| Ok(0));
        mocks.requests.expect_count().returning(|| Ok(0));
        mocks.requests.expect_count_by_status().returning(|_| Ok(0));
        mocks.users.expect_count_by_type().returning(|_| Ok(0));

        let stats = StatsManager::new(Arc::new(mocks.build())).get().await.unwrap();
        assert_eq!(stats.response_rate, 0);
    }
}

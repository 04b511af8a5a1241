//! Unit of Work pattern implementation.
//!
//! Centralizes access to every repository and runs multi-entity writes
//! inside a single database transaction.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, IsolationLevel,
    QueryFilter, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{comment, news};
use super::repositories::{
    CommentRepository, CommentStore, LocationRepository, LocationStore, NewsRepository, NewsStore,
    RequestRepository, RequestStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not object safe because of the generic `transaction`; services are
/// generic over it instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn news(&self) -> Arc<dyn NewsRepository>;

    fn comments(&self) -> Arc<dyn CommentRepository>;

    fn requests(&self) -> Arc<dyn RequestRepository>;

    fn locations(&self) -> Arc<dyn LocationRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Commits when the closure returns `Ok`, rolls back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to an open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn news(&self) -> TxNewsRepository<'_> {
        TxNewsRepository { txn: self.txn }
    }

    pub fn comments(&self) -> TxCommentRepository<'_> {
        TxCommentRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    users: Arc<UserStore>,
    news: Arc<NewsStore>,
    comments: Arc<CommentStore>,
    requests: Arc<RequestStore>,
    locations: Arc<LocationStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            news: Arc::new(NewsStore::new(db.clone())),
            comments: Arc::new(CommentStore::new(db.clone())),
            requests: Arc::new(RequestStore::new(db.clone())),
            locations: Arc::new(LocationStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn news(&self) -> Arc<dyn NewsRepository> {
        self.news.clone()
    }

    fn comments(&self) -> Arc<dyn CommentRepository> {
        self.comments.clone()
    }

    fn requests(&self) -> Arc<dyn RequestRepository> {
        self.requests.clone()
    }

    fn locations(&self) -> Arc<dyn LocationRepository> {
        self.locations.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-bound news writes.
pub struct TxNewsRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxNewsRepository<'_> {
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = news::Entity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("News"));
        }

        Ok(())
    }
}

/// Transaction-bound comment writes.
pub struct TxCommentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxCommentRepository<'_> {
    /// Remove every comment on an article; returns how many went.
    pub async fn delete_by_news(&self, news_id: Uuid) -> AppResult<u64> {
        let result = comment::Entity::delete_many()
            .filter(comment::Column::NewsId.eq(news_id))
            .exec(self.txn)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
pub mod testing {
    //! Unit of work over mocked repositories.

    use super::*;
    use crate::infra::repositories::{
        MockCommentRepository, MockLocationRepository, MockNewsRepository,
        MockRequestRepository, MockUserRepository,
    };

    #[derive(Default)]
    pub struct MockPersistence {
        pub users: MockUserRepository,
        pub news: MockNewsRepository,
        pub comments: MockCommentRepository,
        pub requests: MockRequestRepository,
        pub locations: MockLocationRepository,
    }

    impl MockPersistence {
        pub fn build(self) -> MockedUnitOfWork {
            MockedUnitOfWork {
                users: Arc::new(self.users),
                news: Arc::new(self.news),
                comments: Arc::new(self.comments),
                requests: Arc::new(self.requests),
                locations: Arc::new(self.locations),
            }
        }
    }

    pub struct MockedUnitOfWork {
        users: Arc<MockUserRepository>,
        news: Arc<MockNewsRepository>,
        comments: Arc<MockCommentRepository>,
        requests: Arc<MockRequestRepository>,
        locations: Arc<MockLocationRepository>,
    }

    #[async_trait]
    impl UnitOfWork for MockedUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn news(&self) -> Arc<dyn NewsRepository> {
            self.news.clone()
        }

        fn comments(&self) -> Arc<dyn CommentRepository> {
            self.comments.clone()
        }

        fn requests(&self) -> Arc<dyn RequestRepository> {
            self.requests.clone()
        }

        fn locations(&self) -> Arc<dyn LocationRepository> {
            self.locations.clone()
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
            T: Send,
        {
            Err(AppError::internal("transactions need a database"))
        }
    }
}

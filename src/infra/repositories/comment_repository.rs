//! Comment repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::comment::{self, ActiveModel, Entity as CommentEntity};
use crate::domain::{Comment, CreateComment};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// All comments on an article, newest first
    async fn list_by_news(&self, news_id: Uuid) -> AppResult<Vec<Comment>>;

    /// Approved comments on an article, newest first
    async fn list_approved_by_news(&self, news_id: Uuid) -> AppResult<Vec<Comment>>;

    /// Moderation queue across all articles, newest first
    async fn list_pending(&self) -> AppResult<Vec<Comment>>;

    /// Insert an unapproved comment
    async fn create(&self, news_id: Uuid, comment: CreateComment) -> AppResult<Comment>;

    /// Mark as approved; approving twice is harmless
    async fn approve(&self, id: Uuid) -> AppResult<Comment>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed comment repository
pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_where(&self, condition: sea_orm::Condition) -> AppResult<Vec<Comment>> {
        let models = CommentEntity::find()
            .filter(condition)
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Comment::from).collect())
    }
}

impl ReadRepository<CommentEntity> for CommentStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl DeleteRepository<CommentEntity> for CommentStore {
    const ENTITY: &'static str = "Comment";

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl CommentRepository for CommentStore {
    async fn list_by_news(&self, news_id: Uuid) -> AppResult<Vec<Comment>> {
        self.list_where(sea_orm::Condition::all().add(comment::Column::NewsId.eq(news_id)))
            .await
    }

    async fn list_approved_by_news(&self, news_id: Uuid) -> AppResult<Vec<Comment>> {
        self.list_where(
            sea_orm::Condition::all()
                .add(comment::Column::NewsId.eq(news_id))
                .add(comment::Column::Approved.eq(true)),
        )
        .await
    }

    async fn list_pending(&self) -> AppResult<Vec<Comment>> {
        self.list_where(sea_orm::Condition::all().add(comment::Column::Approved.eq(false)))
            .await
    }

    async fn create(&self, news_id: Uuid, input: CreateComment) -> AppResult<Comment> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            news_id: Set(news_id),
            name: Set(input.name),
            content: Set(input.content),
            approved: Set(false),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Comment::from(model))
    }

    async fn approve(&self, id: Uuid) -> AppResult<Comment> {
        let existing = self
            .find_model(id)
            .await?
            .ok_or(AppError::NotFound("Comment"))?;

        if existing.approved {
            return Ok(Comment::from(existing));
        }

        let mut active: ActiveModel = existing.into();
        active.approved = Set(true);

        let model = active.update(&self.db).await?;
        Ok(Comment::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.delete_model(id).await
    }
}

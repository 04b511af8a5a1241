//! Comment service - submission and moderation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{parse_id, Comment, CreateComment};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait CommentService: Send + Sync {
    /// Every comment on an article, approved or not
    async fn list_by_news(&self, news_id: &str) -> AppResult<Vec<Comment>>;

    /// What the public sees under an article
    async fn list_approved_by_news(&self, news_id: &str) -> AppResult<Vec<Comment>>;

    /// Moderation queue
    async fn list_pending(&self) -> AppResult<Vec<Comment>>;

    /// Submit a comment on an existing article; it starts unapproved
    async fn create(&self, news_id: &str, input: CreateComment) -> AppResult<Comment>;

    async fn approve(&self, id: &str) -> AppResult<Comment>;

    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct CommentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CommentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CommentService for CommentManager<U> {
    async fn list_by_news(&self, news_id: &str) -> AppResult<Vec<Comment>> {
        match parse_id(news_id) {
            Some(news_id) => self.uow.comments().list_by_news(news_id).await,
            None => Ok(Vec::new()),
        }
    }

    async fn list_approved_by_news(&self, news_id: &str) -> AppResult<Vec<Comment>> {
        match parse_id(news_id) {
            Some(news_id) => self.uow.comments().list_approved_by_news(news_id).await,
            None => Ok(Vec::new()),
        }
    }

    async fn list_pending(&self) -> AppResult<Vec<Comment>> {
        self.uow.comments().list_pending().await
    }

    async fn create(&self, news_id: &str, input: CreateComment) -> AppResult<Comment> {
        let news_id = parse_id(news_id).ok_or(AppError::NotFound("News"))?;
        self.uow
            .news()
            .find_by_id(news_id)
            .await?
            .ok_or_not_found("News")?;

        let input = CreateComment {
            name: input.name.trim().to_string(),
            content: input.content.trim().to_string(),
        };

        let comment = self.uow.comments().create(news_id, input).await?;
        tracing::info!(comment_id = %comment.id, news_id = %news_id, "Comment awaiting moderation");
        Ok(comment)
    }

    async fn approve(&self, id: &str) -> AppResult<Comment> {
        let id = parse_id(id).ok_or(AppError::InvalidId("comment"))?;
        self.uow.comments().approve(id).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id).ok_or(AppError::InvalidId("comment"))?;
        self.uow.comments().delete(id).await
    }
}

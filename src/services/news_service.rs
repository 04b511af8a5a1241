//! News service - publishing and listing articles.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::FEATURED_NEWS_LIMIT;
use crate::domain::{
    blank_to_none, normalize_state_code, parse_id, CreateNews, LocationFilter, News, UpdateNews,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait NewsService: Send + Sync {
    /// All articles, newest first
    async fn list(&self) -> AppResult<Vec<News>>;

    /// Up to six featured articles, newest first
    async fn list_featured(&self) -> AppResult<Vec<News>>;

    /// Malformed and unknown ids are both `None`
    async fn get(&self, id: &str) -> AppResult<Option<News>>;

    /// Articles for a state and/or municipality; no filter lists everything
    async fn list_by_location(&self, filter: LocationFilter) -> AppResult<Vec<News>>;

    async fn create(&self, input: CreateNews) -> AppResult<News>;

    async fn update(&self, id: &str, input: UpdateNews) -> AppResult<News>;

    /// Delete an article together with its comments
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct NewsManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NewsManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Upper-case valid state codes; anything else is kept as typed and simply
/// matches nothing.
fn state_key(raw: String) -> String {
    normalize_state_code(&raw).unwrap_or(raw)
}

#[async_trait]
impl<U: UnitOfWork> NewsService for NewsManager<U> {
    async fn list(&self) -> AppResult<Vec<News>> {
        self.uow.news().list().await
    }

    async fn list_featured(&self) -> AppResult<Vec<News>> {
        self.uow.news().list_featured(FEATURED_NEWS_LIMIT).await
    }

    async fn get(&self, id: &str) -> AppResult<Option<News>> {
        match parse_id(id) {
            Some(id) => self.uow.news().find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn list_by_location(&self, filter: LocationFilter) -> AppResult<Vec<News>> {
        let filter = LocationFilter::new(filter.state.map(state_key), filter.municipality);

        if filter.is_empty() {
            return self.uow.news().list().await;
        }
        self.uow.news().list_by_location(&filter).await
    }

    async fn create(&self, input: CreateNews) -> AppResult<News> {
        let input = CreateNews {
            image_url: blank_to_none(input.image_url),
            state: blank_to_none(input.state).map(state_key),
            municipality: blank_to_none(input.municipality),
            ..input
        };

        let news = self.uow.news().create(input).await?;
        tracing::info!(news_id = %news.id, author_id = %news.author_id, "News published");
        Ok(news)
    }

    async fn update(&self, id: &str, input: UpdateNews) -> AppResult<News> {
        let id = parse_id(id).ok_or(AppError::InvalidId("news"))?;

        if input.is_empty() {
            return self.uow.news().find_by_id(id).await?.ok_or_not_found("News");
        }

        let input = UpdateNews {
            image_url: input.image_url.map(blank_to_none),
            state: input.state.map(|s| blank_to_none(s).map(state_key)),
            municipality: input.municipality.map(blank_to_none),
            ..input
        };

        self.uow.news().update(id, input).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id).ok_or(AppError::InvalidId("news"))?;

        let removed_comments = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let removed = ctx.comments().delete_by_news(id).await?;
                    ctx.news().delete(id).await?;
                    Ok::<_, AppError>(removed)
                })
            })
            .await?;

        tracing::info!(news_id = %id, removed_comments, "News deleted");
        Ok(())
    }
}

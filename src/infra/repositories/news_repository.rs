//! News repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::news::{self, ActiveModel, Entity as NewsEntity};
use crate::domain::{CreateNews, LocationFilter, News, UpdateNews};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// News repository. Every listing is ordered newest first.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<News>>;

    /// At most `limit` featured articles
    async fn list_featured(&self, limit: u64) -> AppResult<Vec<News>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<News>>;

    /// Articles matching every field set in the filter
    async fn list_by_location(&self, filter: &LocationFilter) -> AppResult<Vec<News>>;

    async fn create(&self, news: CreateNews) -> AppResult<News>;

    /// Partial update; always advances `updated_at`
    async fn update(&self, id: Uuid, changes: UpdateNews) -> AppResult<News>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM-backed news repository
pub struct NewsStore {
    db: DatabaseConnection,
}

impl NewsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<NewsEntity> for NewsStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl DeleteRepository<NewsEntity> for NewsStore {
    const ENTITY: &'static str = "News";

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn to_news(models: Vec<news::Model>) -> Vec<News> {
    models.into_iter().map(News::from).collect()
}

#[async_trait]
impl NewsRepository for NewsStore {
    async fn list(&self) -> AppResult<Vec<News>> {
        let models = NewsEntity::find()
            .order_by_desc(news::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(to_news(models))
    }

    async fn list_featured(&self, limit: u64) -> AppResult<Vec<News>> {
        let models = NewsEntity::find()
            .filter(news::Column::Featured.eq(true))
            .order_by_desc(news::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(to_news(models))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<News>> {
        Ok(self.find_model(id).await?.map(News::from))
    }

    async fn list_by_location(&self, filter: &LocationFilter) -> AppResult<Vec<News>> {
        let mut query = NewsEntity::find();

        if let Some(state) = &filter.state {
            query = query.filter(news::Column::State.eq(state.as_str()));
        }
        if let Some(municipality) = &filter.municipality {
            query = query.filter(news::Column::Municipality.eq(municipality.as_str()));
        }

        let models = query
            .order_by_desc(news::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(to_news(models))
    }

    async fn create(&self, input: CreateNews) -> AppResult<News> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            content: Set(input.content),
            summary: Set(input.summary),
            image_url: Set(input.image_url),
            featured: Set(input.featured),
            state: Set(input.state),
            municipality: Set(input.municipality),
            category: Set(input.category),
            author_id: Set(input.author_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(News::from(model))
    }

    async fn update(&self, id: Uuid, changes: UpdateNews) -> AppResult<News> {
        let existing = self.find_model(id).await?.ok_or(AppError::NotFound("News"))?;

        let mut active: ActiveModel = existing.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }
        if let Some(summary) = changes.summary {
            active.summary = Set(summary);
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(featured) = changes.featured {
            active.featured = Set(featured);
        }
        if let Some(state) = changes.state {
            active.state = Set(state);
        }
        if let Some(municipality) = changes.municipality {
            active.municipality = Set(municipality);
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(News::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.delete_model(id).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.count_all().await
    }
}

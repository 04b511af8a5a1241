//! News article entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Published news article.
///
/// `state` and `municipality` are both absent for national news.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: Uuid,
    #[schema(example = "Nova lei de transparência aprovada")]
    pub title: String,
    pub content: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub featured: bool,
    #[schema(example = "SP")]
    pub state: Option<String>,
    pub municipality: Option<String>,
    #[schema(example = "Transparência")]
    pub category: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a new article.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateNews {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub featured: bool,
    pub state: Option<String>,
    pub municipality: Option<String>,
    pub category: String,
    pub author_id: Uuid,
}

/// Partial update.
///
/// For the nullable columns the outer `Option` means "leave unchanged" and
/// `Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub image_url: Option<Option<String>>,
    pub featured: Option<bool>,
    pub state: Option<Option<String>>,
    pub municipality: Option<Option<String>>,
    pub category: Option<String>,
}

impl UpdateNews {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

//! Reader comment on a news article.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Comment, hidden from the public until approved by a moderator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub news_id: Uuid,
    #[schema(example = "Maria Souza")]
    pub name: String,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for a new comment. There is no way to submit an approved comment.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateComment {
    pub name: String,
    pub content: String,
}

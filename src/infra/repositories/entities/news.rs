//! News database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::News;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub image_url: Option<String>,
    pub featured: bool,
    pub state: Option<String>,
    pub municipality: Option<String>,
    pub category: String,
    pub author_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for News {
    fn from(model: Model) -> Self {
        News {
            id: model.id,
            title: model.title,
            content: model.content,
            summary: model.summary,
            image_url: model.image_url,
            featured: model.featured,
            state: model.state,
            municipality: model.municipality,
            category: model.category,
            author_id: model.author_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

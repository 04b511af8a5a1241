//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: String,
    pub user_type: String,
    pub state: Option<String>,
    pub municipality: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            user_type: UserType::from(model.user_type.as_str()),
            state: model.state,
            municipality: model.municipality,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

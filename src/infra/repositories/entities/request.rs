//! Citizen request database entity for SeaORM.
//!
//! Type and status are stored as their wire strings and parsed back on load.

use sea_orm::entity::prelude::*;

use crate::domain::CitizenRequest;
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub state: String,
    pub municipality: String,
    pub request_type: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: String,
    pub politician_id: Option<Uuid>,
    #[sea_orm(column_type = "Text", nullable)]
    pub response: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for CitizenRequest {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(CitizenRequest {
            id: model.id,
            name: model.name,
            email: model.email,
            state: model.state,
            municipality: model.municipality,
            request_type: model.request_type.parse().map_err(AppError::internal)?,
            message: model.message,
            status: model.status.parse().map_err(AppError::internal)?,
            politician_id: model.politician_id,
            response: model.response,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

//! Base repository traits shared by the SeaORM stores.
//!
//! Stores implement these next to their entity-specific trait and get
//! primary-key lookups, counting and deletion for free.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, PrimaryKeyTrait};

use crate::errors::{AppError, AppResult};

/// Read operations keyed by primary key.
#[async_trait]
pub trait ReadRepository<E>: Send + Sync
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    /// Get database connection reference
    fn db(&self) -> &DatabaseConnection;

    /// Find a row by primary key
    async fn find_model(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> AppResult<Option<E::Model>>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send,
    {
        E::find_by_id(id).one(self.db()).await.map_err(Into::into)
    }

    /// Count all rows
    async fn count_all(&self) -> AppResult<u64> {
        E::find().count(self.db()).await.map_err(Into::into)
    }
}

/// Delete by primary key, failing when nothing was deleted.
#[async_trait]
pub trait DeleteRepository<E>: Send + Sync
where
    E: EntityTrait,
{
    /// Entity name used in `NotFound` errors
    const ENTITY: &'static str;

    /// Get database connection reference
    fn db(&self) -> &DatabaseConnection;

    async fn delete_model(&self, id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType) -> AppResult<()>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send,
    {
        let result = E::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(Self::ENTITY));
        }

        Ok(())
    }
}

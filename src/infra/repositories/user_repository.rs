//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::base::ReadRepository;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserChanges, UserType};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user whose password (if any) is already hashed
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply the given changes, leaving `None` fields untouched
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// List all users, oldest first
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Count users of the given type
    async fn count_by_type(&self, user_type: UserType) -> AppResult<u64>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<UserEntity> for UserStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.find_model(id).await?.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            name: Set(new_user.name),
            user_type: Set(new_user.user_type.as_str().to_string()),
            state: Set(new_user.state),
            municipality: Set(new_user.municipality),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let user = self.find_model(id).await?.ok_or(AppError::NotFound("User"))?;

        let mut active: ActiveModel = user.into();

        if let Some(email) = changes.email {
            active.email = Set(Some(email));
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(Some(password_hash));
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(user_type) = changes.user_type {
            active.user_type = Set(user_type.as_str().to_string());
        }
        if let Some(state) = changes.state {
            active.state = Set(Some(state));
        }
        if let Some(municipality) = changes.municipality {
            active.municipality = Set(Some(municipality));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count_by_type(&self, user_type: UserType) -> AppResult<u64> {
        UserEntity::find()
            .filter(user::Column::UserType.eq(user_type.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}

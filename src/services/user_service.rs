//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    blank_to_none, normalize_state_code, parse_id, CreateUser, NewUser, Password, UpdateUser,
    User, UserChanges,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Look up a user; malformed and unknown ids are both `None`
    async fn get(&self, id: &str) -> AppResult<Option<User>>;

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user, hashing the password if one is given
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Partial update
    async fn update(&self, id: &str, input: UpdateUser) -> AppResult<User>;

    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        if self.uow.users().find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }
        Ok(())
    }
}

fn state_code(state: Option<String>) -> AppResult<Option<String>> {
    match blank_to_none(state) {
        Some(raw) => normalize_state_code(&raw)
            .map(Some)
            .ok_or_else(|| AppError::validation("state", "State must be a two-letter code")),
        None => Ok(None),
    }
}

fn hash_password(password: Option<String>) -> AppResult<Option<String>> {
    password
        .map(|plain| Password::new(&plain).map(Password::into_string))
        .transpose()
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get(&self, id: &str) -> AppResult<Option<User>> {
        match parse_id(id) {
            Some(id) => self.uow.users().find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.uow.users().find_by_email(email.trim()).await
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        let email = blank_to_none(input.email);
        if let Some(email) = &email {
            self.ensure_email_free(email).await?;
        }

        let new_user = NewUser {
            email,
            password_hash: hash_password(input.password)?,
            name: input.name.trim().to_string(),
            user_type: input.user_type,
            state: state_code(input.state)?,
            municipality: blank_to_none(input.municipality),
        };

        let user = self.uow.users().create(new_user).await?;
        tracing::info!(user_id = %user.id, user_type = %user.user_type, "User created");
        Ok(user)
    }

    async fn update(&self, id: &str, input: UpdateUser) -> AppResult<User> {
        let id = parse_id(id).ok_or(AppError::InvalidId("user"))?;

        let email = blank_to_none(input.email);
        if let Some(email) = &email {
            if let Some(owner) = self.uow.users().find_by_email(email).await? {
                if owner.id != id {
                    return Err(AppError::conflict("User"));
                }
            }
        }

        let changes = UserChanges {
            email,
            password_hash: hash_password(input.password)?,
            name: blank_to_none(input.name),
            user_type: input.user_type,
            state: state_code(input.state)?,
            municipality: blank_to_none(input.municipality),
        };

        self.uow.users().update(id, changes).await
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }
}

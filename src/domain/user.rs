//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{USER_TYPE_ADMIN, USER_TYPE_POLITICIAN, USER_TYPE_VISITOR};

/// User type (role) enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    Politician,
    #[default]
    Visitor,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => USER_TYPE_ADMIN,
            UserType::Politician => USER_TYPE_POLITICIAN,
            UserType::Visitor => USER_TYPE_VISITOR,
        }
    }
}

impl From<&str> for UserType {
    fn from(s: &str) -> Self {
        match s {
            USER_TYPE_ADMIN => UserType::Admin,
            USER_TYPE_POLITICIAN => UserType::Politician,
            _ => UserType::Visitor,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub state: Option<String>,
    pub municipality: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User creation input (plain text password, hashed by the service)
#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: String,
    pub user_type: UserType,
    pub state: Option<String>,
    pub municipality: Option<String>,
}

/// Partial user update input
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub user_type: Option<UserType>,
    pub state: Option<String>,
    pub municipality: Option<String>,
}

/// Row-level data for a new user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: String,
    pub user_type: UserType,
    pub state: Option<String>,
    pub municipality: Option<String>,
}

/// Row-level changes for an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub user_type: Option<UserType>,
    pub state: Option<String>,
    pub municipality: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "politico@sp.gov.br")]
    pub email: Option<String>,
    #[schema(example = "João Silva")]
    pub name: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[schema(example = "SP")]
    pub state: Option<String>,
    #[schema(example = "São Paulo")]
    pub municipality: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            user_type: user.user_type,
            state: user.state,
            municipality: user.municipality,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_from_str_defaults_to_visitor() {
        assert_eq!(UserType::from("admin"), UserType::Admin);
        assert_eq!(UserType::from("politician"), UserType::Politician);
        assert_eq!(UserType::from("mayor"), UserType::Visitor);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: Some("admin@leiemmaos.com".into()),
            password_hash: Some("$argon2id$secret".into()),
            name: "Administrador".into(),
            user_type: UserType::Admin,
            state: None,
            municipality: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["type"], "admin");

        let response = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(response["name"], "Administrador");
        assert!(response.get("passwordHash").is_none());
    }
}

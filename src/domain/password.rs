//! Password value object.
//!
//! Credentials are only ever stored as Argon2 PHC strings. Raw passwords
//! enter through [`Password::new`] and are dropped right after hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hash compared against when an account has no usable password, so that
/// failed logins cost the same whether or not the account exists.
static DECOY_HASH: Lazy<Option<String>> =
    Lazy::new(|| Password::hash("decoy-password-never-matches").ok());

/// Hashed password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than
    /// [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            ));
        }

        Ok(Self {
            hash: Self::hash(plain_text)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    /// Verify against an optional stored hash.
    ///
    /// Accounts without a hash still pay for one verification against a
    /// decoy and always fail.
    pub fn verify_stored(stored: Option<&str>, plain_text: &str) -> bool {
        match stored {
            Some(hash) => Self::verify_hash(plain_text, hash).unwrap_or(false),
            None => {
                if let Some(decoy) = DECOY_HASH.as_deref() {
                    let _ = Self::verify_hash(plain_text, decoy);
                }
                false
            }
        }
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plain_text() {
        let password = Password::new("admin12345").unwrap();

        assert_ne!(password.as_str(), "admin12345");
        assert!(password.as_str().starts_with("$argon2"));
        assert!(password.verify("admin12345"));
        assert!(!password.verify("admin123456"));
    }

    #[test]
    fn test_stored_hash_round_trip() {
        let hash = Password::new("politico1234").unwrap().into_string();

        assert!(Password::verify_stored(Some(&hash), "politico1234"));
        assert!(!Password::verify_stored(Some(&hash), "wrong-password"));
    }

    #[test]
    fn test_missing_hash_never_verifies() {
        assert!(!Password::verify_stored(None, "decoy-password-never-matches"));
        assert!(!Password::verify_stored(Some("not-a-phc-string"), "anything"));
    }

    #[test]
    fn test_password_too_short() {
        let result = Password::new("admin123");
        assert!(result.is_ok());

        let result = Password::new("short");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("SecurePassword123").unwrap();
        assert!(!format!("{:?}", password).contains("argon2"));
    }
}

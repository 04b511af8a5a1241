//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::{AppError, FieldError};

/// Validated JSON extractor that automatically validates requests.
///
/// Both malformed bodies and rule violations become a 400 with one entry
/// per failing field.
///
/// ```rust,ignore
/// async fn create_comment(ValidatedJson(payload): ValidatedJson<CommentRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            AppError::Validation(vec![FieldError::new("body", "invalid_json", e.body_text())])
        })?;

        value
            .validate()
            .map_err(|e| AppError::Validation(field_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten validator output, sorted by field name.
fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field.to_string(), e.code.to_string(), message)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_field_errors_are_flattened_and_sorted() {
        let probe = Probe {
            name: "a".into(),
            email: "not-an-email".into(),
        };
        let errors = field_errors(&probe.validate().unwrap_err());

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].code, "email");
        assert_eq!(errors[0].message, "email is invalid");
        assert_eq!(errors[1].field, "name");
        assert_eq!(errors[1].code, "length");
        assert_eq!(errors[1].message, "Name must be at least 2 characters");
    }
}

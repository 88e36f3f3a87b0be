//! Request bodies accepted by the HTTP layer.
//!
//! String fields default to empty when absent so a missing field fails
//! validation with its message instead of a deserialization error.

use anime_core::types::DbId;
use serde::Deserialize;
use validator::Validate;

/// Body of `POST /animes`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnimePostRequestBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "The anime name cannot be empty"))]
    pub name: String,
}

/// Body of `PUT /animes`: the full new state of an existing anime.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnimePutRequestBody {
    pub id: DbId,
    #[serde(default)]
    #[validate(length(min = 1, message = "The anime name cannot be empty"))]
    pub name: String,
}

/// Body of `POST /users/admin/save`. `password` is plaintext here and is
/// hashed before it reaches storage.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DevDojoUserPostRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "The user's name cannot be empty"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The user's username cannot be empty"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The user's password cannot be empty"))]
    pub password: String,
    /// Comma-separated, e.g. `"ROLE_ADMIN,ROLE_USER"`.
    #[serde(default)]
    #[validate(length(min = 1, message = "The user's authorities cannot be empty"))]
    pub authorities: String,
}

/// Body of `PUT /users`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DevDojoUserPutRequest {
    pub id: DbId,
    #[serde(default)]
    #[validate(length(min = 1, message = "The user's name cannot be empty"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The user's username cannot be empty"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The user's password cannot be empty"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The user's authorities cannot be empty"))]
    pub authorities: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_fails_validation() {
        let body: AnimePostRequestBody = serde_json::from_str("{}").unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn non_empty_name_passes() {
        let body: AnimePostRequestBody = serde_json::from_str(r#"{"name":"Kingdom"}"#).unwrap();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn user_request_reports_every_empty_field() {
        let body: DevDojoUserPostRequest =
            serde_json::from_str(r#"{"name":"Ana","username":""}"#).unwrap();
        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(!fields.contains_key("name"));
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("authorities"));
    }
}

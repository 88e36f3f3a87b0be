//! HTTP Basic credentials (`Authorization: Basic base64(username:password)`).

use anime_core::error::CoreError;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decoded username and plaintext password from a Basic header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of logs.
impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl BasicCredentials {
    /// Read credentials from the `Authorization` header.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, CoreError> {
        let value = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;
        Self::parse(value)
    }

    /// Parse a raw header value. The scheme is matched case-insensitively.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let (scheme, encoded) = value
            .trim()
            .split_once(' ')
            .ok_or_else(invalid_format)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(invalid_format());
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| CoreError::Unauthorized("Failed to decode basic credentials".into()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| CoreError::Unauthorized("Failed to decode basic credentials".into()))?;

        // The password may itself contain ':'; only the first one splits.
        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| CoreError::Unauthorized("Invalid basic authentication token".into()))?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Encode as a header value. Used by clients and tests.
    pub fn to_header_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

fn invalid_format() -> CoreError {
    CoreError::Unauthorized("Invalid Authorization format. Expected: Basic <credentials>".into())
}

//! Authenticated-principal extractor for Axum handlers.

use anime_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::user_details::{UserDetails, UserSource};
use crate::error::AppError;

/// The user authenticated by [`security::enforce`](super::security::enforce).
///
/// Use this as an extractor parameter in any handler behind an
/// authenticated rule:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub authorities: Vec<String>,
    pub source: UserSource,
}

impl AuthUser {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }
}

impl From<UserDetails> for AuthUser {
    fn from(user: UserDetails) -> Self {
        Self {
            username: user.username,
            authorities: user.authorities,
            source: user.source,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Full authentication is required to access this resource".into(),
            ))
        })
    }
}

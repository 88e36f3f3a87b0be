//! URL-pattern authorization and the middleware that enforces it.
//!
//! Rules are checked in declaration order and the first match wins, so the
//! most specific patterns must come first. A request matching no rule gets
//! the fallback access (authenticated by default).

use anime_core::error::CoreError;
use anime_core::roles::{ROLE_ADMIN, ROLE_USER};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::auth::AuthUser;
use crate::auth::basic::BasicCredentials;
use crate::error::AppError;
use crate::state::AppState;

/// What a request must satisfy to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    PermitAll,
    Authenticated,
    HasAuthority(&'static str),
}

/// `/exact/path` or `/prefix/**`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    /// Matches the prefix itself and anything below it.
    Subtree(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(prefix) => PathPattern::Subtree(prefix.to_string()),
            None => PathPattern::Exact(pattern.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        match self {
            PathPattern::Exact(exact) => path == exact,
            PathPattern::Subtree(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccessRule {
    pub pattern: PathPattern,
    pub access: Access,
}

impl AccessRule {
    pub fn new(pattern: &str, access: Access) -> Self {
        Self {
            pattern: PathPattern::parse(pattern),
            access,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SecurityRules {
    rules: Vec<AccessRule>,
    fallback: Access,
}

impl SecurityRules {
    pub fn new(rules: Vec<AccessRule>, fallback: Access) -> Self {
        Self { rules, fallback }
    }

    /// The access required for `path`: the first matching rule, or the fallback.
    pub fn access_for(&self, path: &str) -> &Access {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map_or(&self.fallback, |rule| &rule.access)
    }
}

impl Default for SecurityRules {
    /// ```text
    /// /health            permit all
    /// /animes/admin/**   ROLE_ADMIN
    /// /animes/**         ROLE_USER
    /// /users/admin/**    ROLE_ADMIN
    /// anything else      authenticated
    /// ```
    fn default() -> Self {
        Self::new(
            vec![
                AccessRule::new("/health", Access::PermitAll),
                AccessRule::new("/animes/admin/**", Access::HasAuthority(ROLE_ADMIN)),
                AccessRule::new("/animes/**", Access::HasAuthority(ROLE_USER)),
                AccessRule::new("/users/admin/**", Access::HasAuthority(ROLE_ADMIN)),
            ],
            Access::Authenticated,
        )
    }
}

/// Authenticate the request with HTTP Basic and apply the URL rules.
///
/// On success the principal is stored as an [`AuthUser`] request extension.
/// Missing or bad credentials yield 401 with a Basic challenge; a principal
/// lacking the required authority yields 403.
pub async fn enforce(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let access = state.access_rules.access_for(request.uri().path()).clone();
    if access == Access::PermitAll {
        return Ok(next.run(request).await);
    }

    let credentials = BasicCredentials::from_headers(request.headers())?;
    let user = state.auth.authenticate(&credentials).await?;

    if let Access::HasAuthority(required) = access {
        if !user.has_role(required) {
            tracing::warn!(
                username = %user.username,
                path = %request.uri().path(),
                required,
                "Access denied"
            );
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "{required} required"
            ))));
        }
    }

    request.extensions_mut().insert(AuthUser::from(user));
    Ok(next.run(request).await)
}

//! Username lookups and credential checking.
//!
//! A [`ProviderManager`] asks each [`UserDetailsProvider`] in order. A
//! provider that does not know the username, or whose stored hash does not
//! match the password, passes the request to the next one. Credentials are
//! rejected only when every provider has declined.

use std::collections::HashMap;
use std::sync::Arc;

use anime_core::error::CoreError;
use anime_core::roles::role_authority;
use anime_db::repositories::UserRepository;
use async_trait::async_trait;

use super::basic::BasicCredentials;
use super::password::{hash_password, verify_password};
use super::user_details::{UserDetails, UserSource};
use crate::error::{AppError, AppResult};

/// Looks up accounts by username.
#[async_trait]
pub trait UserDetailsProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn load_user_by_username(&self, username: &str) -> AppResult<Option<UserDetails>>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// A built-in account described in plaintext, hashed when the provider is built.
#[derive(Debug, Clone)]
pub struct InMemoryUser {
    pub username: String,
    pub password: String,
    /// Bare role names, e.g. `["USER", "ADMIN"]`.
    pub roles: Vec<String>,
}

impl InMemoryUser {
    pub fn new(username: &str, password: &str, roles: &[&str]) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// The two accounts every fresh install can log in with.
pub fn default_in_memory_users() -> Vec<InMemoryUser> {
    vec![
        InMemoryUser::new("admin_memory", "123", &["USER", "ADMIN"]),
        InMemoryUser::new("user_memory", "123", &["USER"]),
    ]
}

pub struct InMemoryUserDetailsProvider {
    users: HashMap<String, UserDetails>,
}

impl InMemoryUserDetailsProvider {
    pub fn new(users: Vec<InMemoryUser>) -> Result<Self, argon2::password_hash::Error> {
        let mut map = HashMap::with_capacity(users.len());
        for user in users {
            let details = UserDetails {
                password_hash: hash_password(&user.password)?,
                authorities: user.roles.iter().map(|r| role_authority(r)).collect(),
                username: user.username.clone(),
                source: UserSource::InMemory,
            };
            map.insert(user.username, details);
        }
        Ok(Self { users: map })
    }
}

#[async_trait]
impl UserDetailsProvider for InMemoryUserDetailsProvider {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    async fn load_user_by_username(&self, username: &str) -> AppResult<Option<UserDetails>> {
        Ok(self.users.get(username).cloned())
    }
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// Resolves usernames against stored DevDojo users.
pub struct DatabaseUserDetailsProvider {
    repo: Arc<dyn UserRepository>,
}

impl DatabaseUserDetailsProvider {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserDetailsProvider for DatabaseUserDetailsProvider {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn load_user_by_username(&self, username: &str) -> AppResult<Option<UserDetails>> {
        let user = self.repo.find_by_username(username).await?;
        Ok(user.map(UserDetails::from))
    }
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

pub struct ProviderManager {
    providers: Vec<Arc<dyn UserDetailsProvider>>,
}

impl ProviderManager {
    pub fn new(providers: Vec<Arc<dyn UserDetailsProvider>>) -> Self {
        Self { providers }
    }

    /// Check credentials against each provider in order.
    ///
    /// Lookup failures (e.g. the database is down) abort immediately rather
    /// than being treated as a wrong password.
    pub async fn authenticate(&self, credentials: &BasicCredentials) -> AppResult<UserDetails> {
        for provider in &self.providers {
            let Some(user) = provider
                .load_user_by_username(&credentials.username)
                .await?
            else {
                continue;
            };

            match verify_password(&credentials.password, &user.password_hash) {
                Ok(true) => {
                    tracing::debug!(
                        username = %user.username,
                        provider = provider.name(),
                        roles = ?user.roles(),
                        "Authenticated"
                    );
                    return Ok(user);
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        username = %user.username,
                        provider = provider.name(),
                        error = %e,
                        "Stored password is not a valid hash"
                    );
                }
            }
        }

        tracing::info!(username = %credentials.username, "Bad credentials");
        Err(AppError::Core(CoreError::Unauthorized("Bad credentials".into())))
    }
}

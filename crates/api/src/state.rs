use std::sync::Arc;

use anime_db::repositories::{AnimeRepository, UserRepository};

use crate::auth::provider::{
    default_in_memory_users, DatabaseUserDetailsProvider, InMemoryUserDetailsProvider,
    ProviderManager, UserDetailsProvider,
};
use crate::config::ServerConfig;
use crate::middleware::security::SecurityRules;
use crate::services::{AnimeService, UserService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    pub animes: AnimeService,
    pub users: UserService,
    /// Ordered authentication providers (in-memory first, then database).
    pub auth: Arc<ProviderManager>,
    /// URL-pattern authorization rules.
    pub access_rules: Arc<SecurityRules>,
}

impl AppState {
    /// Wire services and security around the given repositories.
    ///
    /// Fails only if hashing a built-in account's password fails.
    pub fn new(
        config: ServerConfig,
        anime_repo: Arc<dyn AnimeRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Result<Self, argon2::password_hash::Error> {
        let mut providers: Vec<Arc<dyn UserDetailsProvider>> = Vec::new();
        if config.in_memory_users_enabled {
            providers.push(Arc::new(InMemoryUserDetailsProvider::new(
                default_in_memory_users(),
            )?));
        }
        providers.push(Arc::new(DatabaseUserDetailsProvider::new(Arc::clone(
            &user_repo,
        ))));

        Ok(Self {
            config: Arc::new(config),
            animes: AnimeService::new(anime_repo),
            users: UserService::new(user_repo),
            auth: Arc::new(ProviderManager::new(providers)),
            access_rules: Arc::new(SecurityRules::default()),
        })
    }
}

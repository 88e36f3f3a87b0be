//! Repository layer.
//!
//! Each entity has a repository trait with two implementations: a
//! PostgreSQL one holding a [`DbPool`](crate::DbPool), and an in-memory one
//! holding a lock-guarded map. Services depend on the trait object only.

use anime_core::pagination::{Page, PageRequest};
use anime_core::types::DbId;
use async_trait::async_trait;

use crate::models::anime::{Anime, CreateAnime};
use crate::models::user::{CreateDevDojoUser, DevDojoUserDetails};

pub mod anime_repo;
pub mod memory;
pub mod user_repo;

pub use anime_repo::PgAnimeRepo;
pub use memory::{InMemoryAnimeRepo, InMemoryUserRepo};
pub use user_repo::PgUserRepo;

/// Failure from any repository implementation.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A write would break a uniqueness rule. Raised by stores without
    /// database constraints; PostgreSQL reports these as [`RepoError::Database`].
    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: &'static str },
}

/// Result type shared by every repository method.
pub type RepoResult<T> = Result<T, RepoError>;

/// Storage for [`Anime`] rows.
#[async_trait]
pub trait AnimeRepository: Send + Sync {
    /// Every anime, ordered by id ascending.
    async fn list(&self) -> RepoResult<Vec<Anime>>;

    /// One page of animes in the order the request asks for.
    async fn list_page(&self, request: &PageRequest) -> RepoResult<Page<Anime>>;

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Anime>>;

    /// Exact, case-sensitive name match.
    async fn find_by_name(&self, name: &str) -> RepoResult<Vec<Anime>>;

    /// Insert a new anime, returning it with its assigned id.
    async fn create(&self, input: &CreateAnime) -> RepoResult<Anime>;

    /// Overwrite every column of the row with `anime.id`.
    ///
    /// Returns `None` if no such row exists.
    async fn update(&self, anime: &Anime) -> RepoResult<Option<Anime>>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> RepoResult<bool>;

    /// Check the backing store is reachable.
    async fn health_check(&self) -> RepoResult<()>;
}

/// Storage for [`DevDojoUserDetails`] rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, ordered by id ascending.
    async fn list(&self) -> RepoResult<Vec<DevDojoUserDetails>>;

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<DevDojoUserDetails>>;

    /// Case-sensitive username lookup.
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<DevDojoUserDetails>>;

    /// Fails with a unique violation if the username is taken.
    async fn create(&self, input: &CreateDevDojoUser) -> RepoResult<DevDojoUserDetails>;

    /// Overwrite every column of the row with `user.id`.
    ///
    /// Returns `None` if no such row exists. Fails with a unique violation
    /// if another row already holds the username.
    async fn update(&self, user: &DevDojoUserDetails) -> RepoResult<Option<DevDojoUserDetails>>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> RepoResult<bool>;
}

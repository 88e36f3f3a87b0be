//! PostgreSQL repository for the `animes` table.

use anime_core::pagination::{Page, PageRequest};
use anime_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{AnimeRepository, RepoError, RepoResult};
use crate::models::anime::{Anime, CreateAnime};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name";

/// Provides CRUD operations for animes.
#[derive(Clone)]
pub struct PgAnimeRepo {
    pool: PgPool,
}

impl PgAnimeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnimeRepository for PgAnimeRepo {
    async fn list(&self) -> RepoResult<Vec<Anime>> {
        let query = format!("SELECT {COLUMNS} FROM animes ORDER BY id");
        sqlx::query_as::<_, Anime>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn list_page(&self, request: &PageRequest) -> RepoResult<Page<Anime>> {
        // Column and direction come from closed enums, never from user text.
        let query = format!(
            "SELECT {COLUMNS} FROM animes
             ORDER BY {} {}, id ASC
             LIMIT $1 OFFSET $2",
            request.sort.property.column(),
            request.sort.direction.as_sql(),
        );
        let content = sqlx::query_as::<_, Anime>(&query)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM animes")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Anime>> {
        let query = format!("SELECT {COLUMNS} FROM animes WHERE id = $1");
        sqlx::query_as::<_, Anime>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Vec<Anime>> {
        let query = format!("SELECT {COLUMNS} FROM animes WHERE name = $1 ORDER BY id");
        sqlx::query_as::<_, Anime>(&query)
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn create(&self, input: &CreateAnime) -> RepoResult<Anime> {
        let query = format!("INSERT INTO animes (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Anime>(&query)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn update(&self, anime: &Anime) -> RepoResult<Option<Anime>> {
        let query = format!("UPDATE animes SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Anime>(&query)
            .bind(anime.id)
            .bind(&anime.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM animes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

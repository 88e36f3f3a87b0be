//! PostgreSQL repository for the `devdojo_users` table.

use anime_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{RepoError, RepoResult, UserRepository};
use crate::models::user::{CreateDevDojoUser, DevDojoUserDetails};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, username, password, authorities";

/// Provides CRUD operations for DevDojo users.
#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepo {
    async fn list(&self) -> RepoResult<Vec<DevDojoUserDetails>> {
        let query = format!("SELECT {COLUMNS} FROM devdojo_users ORDER BY id");
        sqlx::query_as::<_, DevDojoUserDetails>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<DevDojoUserDetails>> {
        let query = format!("SELECT {COLUMNS} FROM devdojo_users WHERE id = $1");
        sqlx::query_as::<_, DevDojoUserDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<DevDojoUserDetails>> {
        let query = format!("SELECT {COLUMNS} FROM devdojo_users WHERE username = $1");
        sqlx::query_as::<_, DevDojoUserDetails>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn create(&self, input: &CreateDevDojoUser) -> RepoResult<DevDojoUserDetails> {
        let query = format!(
            "INSERT INTO devdojo_users (name, username, password, authorities)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DevDojoUserDetails>(&query)
            .bind(&input.name)
            .bind(&input.username)
            .bind(&input.password)
            .bind(&input.authorities)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn update(&self, user: &DevDojoUserDetails) -> RepoResult<Option<DevDojoUserDetails>> {
        let query = format!(
            "UPDATE devdojo_users SET
                name = $2,
                username = $3,
                password = $4,
                authorities = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DevDojoUserDetails>(&query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.authorities)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from)
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM devdojo_users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

use std::sync::Arc;

use anime_core::error::CoreError;
use anime_core::pagination::{Page, PageRequest};
use anime_core::types::DbId;
use anime_db::models::anime::Anime;
use anime_db::repositories::AnimeRepository;

use crate::error::{AppError, AppResult};
use crate::mapper;
use crate::requests::{AnimePostRequestBody, AnimePutRequestBody};

#[derive(Clone)]
pub struct AnimeService {
    repo: Arc<dyn AnimeRepository>,
}

impl AnimeService {
    pub fn new(repo: Arc<dyn AnimeRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all_pageable(&self, request: &PageRequest) -> AppResult<Page<Anime>> {
        Ok(self.repo.list_page(request).await?)
    }

    pub async fn list_all_no_pageable(&self) -> AppResult<Vec<Anime>> {
        Ok(self.repo.list().await?)
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Vec<Anime>> {
        Ok(self.repo.find_by_name(name).await?)
    }

    /// Load an anime or fail with "Anime not found with id {id}" (400).
    pub async fn find_by_id_or_throw_bad_request(&self, id: DbId) -> AppResult<Anime> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Anime", id }))
    }

    pub async fn save(&self, body: AnimePostRequestBody) -> AppResult<Anime> {
        let anime = self.repo.create(&mapper::anime_from_post(body)).await?;
        tracing::info!(anime_id = anime.id, "Anime saved");
        Ok(anime)
    }

    /// Replace every field of an existing anime, keeping its id.
    pub async fn replace(&self, body: AnimePutRequestBody) -> AppResult<Anime> {
        let saved = self.find_by_id_or_throw_bad_request(body.id).await?;
        let mut anime = mapper::anime_from_put(body);
        anime.id = saved.id;

        // The row can vanish between the lookup and the write.
        let anime = self
            .repo
            .update(&anime)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Anime",
                id: saved.id,
            }))?;
        tracing::info!(anime_id = anime.id, "Anime replaced");
        Ok(anime)
    }

    /// Whether the backing store answers.
    pub async fn storage_healthy(&self) -> bool {
        self.repo.health_check().await.is_ok()
    }

    pub async fn delete_by_id(&self, id: DbId) -> AppResult<()> {
        let anime = self.find_by_id_or_throw_bad_request(id).await?;
        if !self.repo.delete(anime.id).await? {
            return Err(AppError::Core(CoreError::NotFound { entity: "Anime", id }));
        }
        tracing::info!(anime_id = id, "Anime deleted");
        Ok(())
    }
}

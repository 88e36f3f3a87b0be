//! Anime entity model and DTOs.

use anime_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `animes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Anime {
    pub id: DbId,
    pub name: String,
}

/// DTO for inserting a new anime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAnime {
    pub name: String,
}

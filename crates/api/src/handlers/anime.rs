//! Handlers for the `/animes` resource.
//!
//! Everything except the admin delete is reachable by any `ROLE_USER`
//! principal; the URL rules in [`security`](crate::middleware::security)
//! enforce that before these run.

use anime_core::time::now_database_style;
use anime_core::types::DbId;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{NameParams, PageParams};
use crate::requests::{AnimePostRequestBody, AnimePutRequestBody};
use crate::state::AppState;

/// GET /animes
///
/// One page of animes. Defaults to page 0, size 5, sorted by id descending.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<impl IntoResponse> {
    tracing::info!(time = %now_database_style(), "Listing animes");
    let request = params.to_page_request()?;
    let page = state.animes.list_all_pageable(&request).await?;

    Ok(Json(page))
}

/// GET /animes/all
pub async fn list_all(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::info!(time = %now_database_style(), "Listing all animes");
    let animes = state.animes.list_all_no_pageable().await?;

    Ok(Json(animes))
}

/// GET /animes/{id}
pub async fn find_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let anime = state.animes.find_by_id_or_throw_bad_request(id).await?;

    Ok(Json(anime))
}

/// GET /animes/by-id/{id}
///
/// Same as [`find_by_id`], and records who asked.
pub async fn find_by_id_authenticated(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    tracing::info!(username = %user.username, anime_id = id, "Anime looked up by authenticated user");
    let anime = state.animes.find_by_id_or_throw_bad_request(id).await?;

    Ok(Json(anime))
}

/// GET /animes/find?name=
pub async fn find_by_name(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<NameParams>,
) -> AppResult<impl IntoResponse> {
    let animes = state.animes.find_by_name(&params.name).await?;

    Ok(Json(animes))
}

/// POST /animes
pub async fn save(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<AnimePostRequestBody>,
) -> AppResult<impl IntoResponse> {
    let anime = state.animes.save(body).await?;

    Ok((StatusCode::CREATED, Json(anime)))
}

/// PUT /animes
pub async fn replace(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<AnimePutRequestBody>,
) -> AppResult<StatusCode> {
    state.animes.replace(body).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /animes/admin/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    state.animes.delete_by_id(id).await?;
    tracing::info!(anime_id = id, username = %admin.username, "Anime deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}

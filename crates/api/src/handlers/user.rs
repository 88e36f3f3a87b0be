//! Handlers for the `/users` resource.
//!
//! Responses use [`DevDojoUserResponse`], so password hashes never leave
//! the service.

use anime_core::types::DbId;
use anime_db::models::user::DevDojoUserResponse;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{ApiPath, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::requests::{DevDojoUserPostRequest, DevDojoUserPutRequest};
use crate::state::AppState;

/// POST /users/admin/save
pub async fn save(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<DevDojoUserPostRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.save_user(body).await?;
    tracing::info!(user_id = user.id, created_by = %admin.username, "User created by admin");

    Ok((StatusCode::CREATED, Json(DevDojoUserResponse::from(user))))
}

/// GET /users
pub async fn list_all(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users: Vec<DevDojoUserResponse> = state
        .users
        .list_all_no_pageable()
        .await?
        .into_iter()
        .map(DevDojoUserResponse::from)
        .collect();

    Ok(Json(users))
}

/// GET /users/{id}
pub async fn find_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.find_by_id_or_throw_bad_request(id).await?;

    Ok(Json(DevDojoUserResponse::from(user)))
}

/// PUT /users
///
/// Open to any authenticated user. Changing authorities needs `ROLE_ADMIN`.
pub async fn replace(
    user: AuthUser,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<DevDojoUserPutRequest>,
) -> AppResult<StatusCode> {
    state.users.replace_user(body, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/admin/delete/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    state.users.delete_user_by_id(id).await?;
    tracing::info!(user_id = id, deleted_by = %admin.username, "User deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}

use std::sync::Arc;

use anime_core::error::CoreError;
use anime_core::roles::{parse_authorities, ROLE_ADMIN};
use anime_core::types::DbId;
use anime_db::models::user::DevDojoUserDetails;
use anime_db::repositories::UserRepository;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::mapper;
use crate::middleware::auth::AuthUser;
use crate::requests::{DevDojoUserPostRequest, DevDojoUserPutRequest};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Store a new user with a hashed password.
    ///
    /// A taken username fails with 409 before anything is written.
    pub async fn save_user(&self, body: DevDojoUserPostRequest) -> AppResult<DevDojoUserDetails> {
        self.ensure_username_free(&body.username, None).await?;

        let hash = hash(&body.password)?;
        let user = self.repo.create(&mapper::user_from_post(body, hash)).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User saved");
        Ok(user)
    }

    pub async fn list_all_no_pageable(&self) -> AppResult<Vec<DevDojoUserDetails>> {
        Ok(self.repo.list().await?)
    }

    /// Load a user or fail with "User not found with id {id}" (400).
    pub async fn find_by_id_or_throw_bad_request(&self, id: DbId) -> AppResult<DevDojoUserDetails> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }

    /// Replace every field of an existing user. The new password is re-hashed.
    ///
    /// Only an admin `actor` may change the stored authorities (403).
    pub async fn replace_user(
        &self,
        body: DevDojoUserPutRequest,
        actor: &AuthUser,
    ) -> AppResult<DevDojoUserDetails> {
        let saved = self.find_by_id_or_throw_bad_request(body.id).await?;
        if !same_authorities(&saved.authorities, &body.authorities)
            && !actor.has_authority(ROLE_ADMIN)
        {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "'{}' may not change the authorities of user {}",
                actor.username, saved.id
            ))));
        }
        self.ensure_username_free(&body.username, Some(saved.id))
            .await?;

        let hash = hash(&body.password)?;
        let mut user = mapper::user_from_put(body, hash);
        user.id = saved.id;

        let user = self
            .repo
            .update(&user)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: saved.id,
            }))?;
        tracing::info!(user_id = user.id, replaced_by = %actor.username, "User replaced");
        Ok(user)
    }

    pub async fn delete_user_by_id(&self, id: DbId) -> AppResult<()> {
        let user = self.find_by_id_or_throw_bad_request(id).await?;
        if !self.repo.delete(user.id).await? {
            return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// `owner` is the id allowed to hold the username already.
    async fn ensure_username_free(&self, username: &str, owner: Option<DbId>) -> AppResult<()> {
        match self.repo.find_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::Core(
                CoreError::Conflict(format!("Username '{username}' is already taken")),
            )),
            _ => Ok(()),
        }
    }
}

/// Order and spacing do not count as a change.
fn same_authorities(stored: &str, requested: &str) -> bool {
    let mut stored = parse_authorities(stored);
    let mut requested = parse_authorities(requested);
    stored.sort();
    requested.sort();
    stored == requested
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

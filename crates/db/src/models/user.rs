//! DevDojo user entity model and DTOs.

use anime_core::roles::parse_authorities;
use anime_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// Name of the unique constraint on `devdojo_users.username`.
pub const USERNAME_UNIQUE_CONSTRAINT: &str = "uq_devdojo_users_username";

/// Full row from the `devdojo_users` table.
///
/// `password` holds the Argon2id PHC hash, never the plaintext. This struct
/// is not `Serialize`; use [`DevDojoUserResponse`] for API output.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DevDojoUserDetails {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub password: String,
    /// Comma-separated authority tags, e.g. `"ROLE_ADMIN,ROLE_USER"`.
    pub authorities: String,
}

impl DevDojoUserDetails {
    /// Authority tags split out of the stored comma-separated string.
    pub fn authority_list(&self) -> Vec<String> {
        parse_authorities(&self.authorities)
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevDojoUserResponse {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub authorities: String,
}

impl From<DevDojoUserDetails> for DevDojoUserResponse {
    fn from(user: DevDojoUserDetails) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            authorities: user.authorities,
        }
    }
}

/// DTO for inserting a new user. `password` must already be hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDevDojoUser {
    pub name: String,
    pub username: String,
    pub password: String,
    pub authorities: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_drops_password() {
        let user = DevDojoUserDetails {
            id: 3,
            name: "William Suane".into(),
            username: "william".into(),
            password: "$argon2id$v=19$...".into(),
            authorities: "ROLE_ADMIN, ROLE_USER".into(),
        };
        assert_eq!(user.authority_list(), vec!["ROLE_ADMIN", "ROLE_USER"]);

        let response = DevDojoUserResponse::from(user);
        assert_eq!(response.id, 3);
        assert_eq!(response.username, "william");
    }
}

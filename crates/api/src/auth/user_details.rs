use anime_core::roles::role_authority;
use anime_core::types::DbId;
use anime_db::models::user::DevDojoUserDetails;

/// Where a principal's record lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSource {
    /// Built into the process from configuration.
    InMemory,
    /// A `devdojo_users` row.
    Database { id: DbId },
}

/// Everything needed to authenticate and authorize one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Authority tags such as `ROLE_ADMIN`.
    pub authorities: Vec<String>,
    pub source: UserSource,
}

impl UserDetails {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    /// `has_role("ADMIN")` and `has_role("ROLE_ADMIN")` are equivalent.
    pub fn has_role(&self, role: &str) -> bool {
        self.has_authority(&role_authority(role))
    }

    /// Role names without the `ROLE_` prefix, skipping non-role authorities.
    pub fn roles(&self) -> Vec<&str> {
        self.authorities
            .iter()
            .filter_map(|a| a.strip_prefix(anime_core::roles::ROLE_PREFIX))
            .collect()
    }
}

impl From<DevDojoUserDetails> for UserDetails {
    fn from(user: DevDojoUserDetails) -> Self {
        Self {
            authorities: user.authority_list(),
            username: user.username,
            password_hash: user.password,
            source: UserSource::Database { id: user.id },
        }
    }
}

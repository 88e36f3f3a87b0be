//! Field-for-field mapping from request bodies to storage models.

use anime_core::roles::{join_authorities, parse_authorities};
use anime_db::models::anime::{Anime, CreateAnime};
use anime_db::models::user::{CreateDevDojoUser, DevDojoUserDetails};

use crate::requests::{
    AnimePostRequestBody, AnimePutRequestBody, DevDojoUserPostRequest, DevDojoUserPutRequest,
};

pub fn anime_from_post(body: AnimePostRequestBody) -> CreateAnime {
    CreateAnime { name: body.name }
}

pub fn anime_from_put(body: AnimePutRequestBody) -> Anime {
    Anime {
        id: body.id,
        name: body.name,
    }
}

/// Map a new-user request. `password_hash` replaces the plaintext password.
pub fn user_from_post(body: DevDojoUserPostRequest, password_hash: String) -> CreateDevDojoUser {
    CreateDevDojoUser {
        name: body.name,
        username: body.username,
        password: password_hash,
        authorities: normalize_authorities(&body.authorities),
    }
}

/// Map a replace-user request. `password_hash` replaces the plaintext password.
pub fn user_from_put(body: DevDojoUserPutRequest, password_hash: String) -> DevDojoUserDetails {
    DevDojoUserDetails {
        id: body.id,
        name: body.name,
        username: body.username,
        password: password_hash,
        authorities: normalize_authorities(&body.authorities),
    }
}

/// `"ROLE_ADMIN, ROLE_USER"` becomes `"ROLE_ADMIN,ROLE_USER"`.
fn normalize_authorities(raw: &str) -> String {
    join_authorities(&parse_authorities(raw))
}

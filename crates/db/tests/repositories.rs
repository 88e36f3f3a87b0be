//! Integration tests for the PostgreSQL repositories.
//!
//! Exercises the full repository layer against a real database:
//! - Insert, lookup, replace, delete for animes and users
//! - Paged listing order and totals
//! - Unique username constraint

use anime_core::pagination::{Direction, PageRequest, Sort, SortProperty};
use anime_db::models::anime::{Anime, CreateAnime};
use anime_db::models::user::{CreateDevDojoUser, USERNAME_UNIQUE_CONSTRAINT};
use anime_db::repositories::{AnimeRepository, PgAnimeRepo, PgUserRepo, RepoError, UserRepository};
use assert_matches::assert_matches;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_anime(name: &str) -> CreateAnime {
    CreateAnime {
        name: name.to_string(),
    }
}

fn new_user(username: &str) -> CreateDevDojoUser {
    CreateDevDojoUser {
        name: format!("{username} full name"),
        username: username.to_string(),
        password: "$argon2id$not-a-real-hash".to_string(),
        authorities: "ROLE_USER".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Animes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find_anime(pool: PgPool) {
    let repo = PgAnimeRepo::new(pool);

    let created = repo.create(&new_anime("Kingdom")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, "Kingdom");

    let found = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_missing_anime_returns_none(pool: PgPool) {
    let repo = PgAnimeRepo::new(pool);
    assert!(repo.find_by_id(424242).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_name_returns_all_exact_matches(pool: PgPool) {
    let repo = PgAnimeRepo::new(pool);
    repo.create(&new_anime("Naruto")).await.unwrap();
    repo.create(&new_anime("Naruto")).await.unwrap();
    repo.create(&new_anime("Bleach")).await.unwrap();

    let found = repo.find_by_name("Naruto").await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|a| a.name == "Naruto"));

    assert!(repo.find_by_name("One Piece").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_name_and_keeps_id(pool: PgPool) {
    let repo = PgAnimeRepo::new(pool);
    let created = repo.create(&new_anime("Hajime")).await.unwrap();

    let replacement = Anime {
        id: created.id,
        name: "Hajime no Ippo".to_string(),
    };
    let updated = repo.update(&replacement).await.unwrap();
    assert_eq!(updated, Some(replacement.clone()));

    // Applying the same replacement again leaves the same state.
    repo.update(&replacement).await.unwrap();
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(replacement));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_anime_returns_none(pool: PgPool) {
    let repo = PgAnimeRepo::new(pool);
    let ghost = Anime {
        id: 999,
        name: "Ghost".to_string(),
    };
    assert!(repo.update(&ghost).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_reports_whether_a_row_was_removed(pool: PgPool) {
    let repo = PgAnimeRepo::new(pool);
    let created = repo.create(&new_anime("Berserk")).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn default_page_returns_five_newest(pool: PgPool) {
    let repo = PgAnimeRepo::new(pool);
    let mut ids = Vec::new();
    for i in 0..7 {
        ids.push(repo.create(&new_anime(&format!("Anime {i}"))).await.unwrap().id);
    }

    let page = repo.list_page(&PageRequest::default()).await.unwrap();

    let expected: Vec<i64> = ids.iter().rev().take(5).copied().collect();
    let actual: Vec<i64> = page.content.iter().map(|a| a.id).collect();
    assert_eq!(actual, expected);
    assert_eq!(page.total_elements, 7);
    assert_eq!(page.total_pages, 2);
    assert!(page.first);
    assert!(!page.last);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_can_sort_by_name(pool: PgPool) {
    let repo = PgAnimeRepo::new(pool);
    for name in ["Naruto", "Bleach", "Akira"] {
        repo.create(&new_anime(name)).await.unwrap();
    }

    let request = PageRequest::of(0, 2, Sort::by(SortProperty::Name, Direction::Asc));
    let page = repo.list_page(&request).await.unwrap();

    let names: Vec<&str> = page.content.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Akira", "Bleach"]);
    assert_eq!(page.number_of_elements, 2);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find_user_by_username(pool: PgPool) {
    let repo = PgUserRepo::new(pool);
    let created = repo.create(&new_user("william")).await.unwrap();

    let found = repo.find_by_username("william").await.unwrap();
    assert_eq!(found, Some(created));
    assert!(repo.find_by_username("William").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_violates_unique_constraint(pool: PgPool) {
    let repo = PgUserRepo::new(pool);
    repo.create(&new_user("dup")).await.unwrap();

    let err = repo.create(&new_user("dup")).await.unwrap_err();
    assert_matches!(
        err,
        RepoError::Database(sqlx::Error::Database(ref db))
            if db.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete_user(pool: PgPool) {
    let repo = PgUserRepo::new(pool);
    let mut user = repo.create(&new_user("editme")).await.unwrap();

    user.authorities = "ROLE_ADMIN,ROLE_USER".to_string();
    let updated = repo.update(&user).await.unwrap().unwrap();
    assert_eq!(updated.authority_list(), vec!["ROLE_ADMIN", "ROLE_USER"]);

    assert!(repo.delete(user.id).await.unwrap());
    assert!(repo.list().await.unwrap().is_empty());
}

//! In-memory repositories.
//!
//! Rows live in a `BTreeMap` keyed by id behind a `tokio::sync::RwLock`,
//! together with the id sequence, so concurrent writers never race on
//! either. Ids start at 1 and are never reused. Nothing survives a restart.

use std::collections::BTreeMap;

use anime_core::pagination::{Direction, Page, PageRequest, SortProperty};
use anime_core::types::DbId;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AnimeRepository, RepoError, RepoResult, UserRepository};
use crate::models::anime::{Anime, CreateAnime};
use crate::models::user::{CreateDevDojoUser, DevDojoUserDetails, USERNAME_UNIQUE_CONSTRAINT};

/// Rows plus the next id to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<DbId, T>,
    next_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(DbId) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn replace(&mut self, id: DbId, row: &T) -> Option<T> {
        let slot = self.rows.get_mut(&id)?;
        *slot = row.clone();
        Some(row.clone())
    }
}

// ---------------------------------------------------------------------------
// Animes
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemoryAnimeRepo {
    table: RwLock<Table<Anime>>,
}

impl InMemoryAnimeRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnimeRepository for InMemoryAnimeRepo {
    async fn list(&self) -> RepoResult<Vec<Anime>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn list_page(&self, request: &PageRequest) -> RepoResult<Page<Anime>> {
        let table = self.table.read().await;
        let mut all: Vec<Anime> = table.rows.values().cloned().collect();
        drop(table);

        all.sort_by(|a, b| {
            let ord = match request.sort.property {
                SortProperty::Id => a.id.cmp(&b.id),
                SortProperty::Name => a.name.cmp(&b.name),
            };
            let ord = match request.sort.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            };
            ord.then(a.id.cmp(&b.id))
        });

        let total = all.len() as i64;
        let content = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.size).unwrap_or(0))
            .collect();

        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Anime>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Vec<Anime>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|a| a.name == name)
            .cloned()
            .collect())
    }

    async fn create(&self, input: &CreateAnime) -> RepoResult<Anime> {
        let mut table = self.table.write().await;
        Ok(table.insert_with(|id| Anime {
            id,
            name: input.name.clone(),
        }))
    }

    async fn update(&self, anime: &Anime) -> RepoResult<Option<Anime>> {
        Ok(self.table.write().await.replace(anime.id, anime))
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    table: RwLock<Table<DevDojoUserDetails>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn list(&self) -> RepoResult<Vec<DevDojoUserDetails>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<DevDojoUserDetails>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<DevDojoUserDetails>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, input: &CreateDevDojoUser) -> RepoResult<DevDojoUserDetails> {
        let mut table = self.table.write().await;
        ensure_username_free(&table, &input.username, None)?;
        Ok(table.insert_with(|id| DevDojoUserDetails {
            id,
            name: input.name.clone(),
            username: input.username.clone(),
            password: input.password.clone(),
            authorities: input.authorities.clone(),
        }))
    }

    async fn update(&self, user: &DevDojoUserDetails) -> RepoResult<Option<DevDojoUserDetails>> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&user.id) {
            return Ok(None);
        }
        ensure_username_free(&table, &user.username, Some(user.id))?;
        Ok(table.replace(user.id, user))
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

/// Mirrors `uq_devdojo_users_username`. Must be called under the write lock
/// that also performs the insert or update.
fn ensure_username_free(
    table: &Table<DevDojoUserDetails>,
    username: &str,
    owner: Option<DbId>,
) -> RepoResult<()> {
    let taken = table
        .rows
        .values()
        .any(|u| u.username == username && Some(u.id) != owner);
    if taken {
        return Err(RepoError::UniqueViolation {
            constraint: USERNAME_UNIQUE_CONSTRAINT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use anime_core::pagination::Sort;
    use assert_matches::assert_matches;

    fn new_anime(name: &str) -> CreateAnime {
        CreateAnime {
            name: name.to_string(),
        }
    }

    async fn seeded(names: &[&str]) -> InMemoryAnimeRepo {
        let repo = InMemoryAnimeRepo::new();
        for name in names {
            repo.create(&new_anime(name)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = seeded(&["Berserk", "Hellsing"]).await;
        let ids: Vec<DbId> = repo.list().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = seeded(&["Berserk"]).await;
        assert!(repo.delete(1).await.unwrap());
        let next = repo.create(&new_anime("Kingdom")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn default_page_is_newest_first_and_capped() {
        let repo = seeded(&["a", "b", "c", "d", "e", "f", "g"]).await;
        let page = repo.list_page(&PageRequest::default()).await.unwrap();

        let ids: Vec<DbId> = page.content.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
        assert_eq!(page.total_elements, 7);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn second_page_holds_the_remainder() {
        let repo = seeded(&["a", "b", "c", "d", "e", "f", "g"]).await;
        let request = PageRequest::of(1, 5, Sort::default());
        let page = repo.list_page(&request).await.unwrap();

        let ids: Vec<DbId> = page.content.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(page.last);
    }

    #[tokio::test]
    async fn name_sort_breaks_ties_by_id() {
        let repo = seeded(&["Naruto", "Bleach", "Naruto"]).await;
        let request = PageRequest::of(0, 5, Sort::by(SortProperty::Name, Direction::Asc));
        let page = repo.list_page(&request).await.unwrap();

        let ids: Vec<DbId> = page.content.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn find_by_name_is_exact() {
        let repo = seeded(&["Naruto", "Naruto Shippuden"]).await;
        let found = repo.find_by_name("Naruto").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(repo.find_by_name("naruto").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_row_returns_none() {
        let repo = InMemoryAnimeRepo::new();
        let ghost = Anime {
            id: 99,
            name: "Ghost".into(),
        };
        assert!(repo.update(&ghost).await.unwrap().is_none());
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_lookup_by_username() {
        let repo = InMemoryUserRepo::new();
        let created = repo
            .create(&CreateDevDojoUser {
                name: "Uanderson".into(),
                username: "uanderson".into(),
                password: "hash".into(),
                authorities: "ROLE_USER".into(),
            })
            .await
            .unwrap();

        let found = repo.find_by_username("uanderson").await.unwrap();
        assert_eq!(found, Some(created));
        assert!(repo.find_by_username("other").await.unwrap().is_none());
    }

    fn new_user(username: &str) -> CreateDevDojoUser {
        CreateDevDojoUser {
            name: "Jane".into(),
            username: username.into(),
            password: "hash".into(),
            authorities: "ROLE_USER".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_a_unique_violation() {
        let repo = InMemoryUserRepo::new();
        repo.create(&new_user("dup")).await.unwrap();

        let err = repo.create(&new_user("dup")).await.unwrap_err();
        assert_matches!(
            err,
            RepoError::UniqueViolation { constraint } if constraint == USERNAME_UNIQUE_CONSTRAINT
        );
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_keep_usernames_unique() {
        let repo = Arc::new(InMemoryUserRepo::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.create(&new_user("dup")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_cannot_take_another_username() {
        let repo = InMemoryUserRepo::new();
        repo.create(&new_user("jane")).await.unwrap();
        let mut john = repo.create(&new_user("john")).await.unwrap();

        john.username = "jane".into();
        let err = repo.update(&john).await.unwrap_err();
        assert_matches!(err, RepoError::UniqueViolation { .. });

        // Keeping its own username is fine.
        john.username = "john".into();
        john.name = "John".into();
        assert_eq!(repo.update(&john).await.unwrap(), Some(john.clone()));
    }
}

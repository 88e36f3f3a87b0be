pub mod anime;
pub mod health;
pub mod users;

use axum::Router;

use crate::handlers::fallback;
use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /health                          liveness + storage check (public)
///
/// /animes                          paginated list, create, replace
/// /animes/all                      full list
/// /animes/{id}                     get
/// /animes/by-id/{id}               get, logs the principal
/// /animes/find?name=               exact-name search
/// /animes/admin/{id}               delete (admin only)
///
/// /users                           list, replace
/// /users/{id}                      get
/// /users/admin/save                create (admin only)
/// /users/admin/delete/{id}         delete (admin only)
/// ```
///
/// Unknown paths answer 404 and unsupported methods 405, both with the
/// structured error body. The method fallback is installed last so it
/// covers every route above.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/animes", anime::router())
        .nest("/users", users::router())
        .fallback(fallback::route_not_found)
        .method_not_allowed_fallback(fallback::method_not_allowed)
}

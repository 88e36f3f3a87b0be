use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::anime;
use crate::state::AppState;

/// Anime routes mounted at `/animes`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> save
/// PUT    /              -> replace
/// GET    /all           -> list_all
/// GET    /find          -> find_by_name
/// GET    /{id}          -> find_by_id
/// GET    /by-id/{id}    -> find_by_id_authenticated
/// DELETE /admin/{id}    -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(anime::list).post(anime::save).put(anime::replace),
        )
        .route("/all", get(anime::list_all))
        .route("/find", get(anime::find_by_name))
        .route("/{id}", get(anime::find_by_id))
        .route("/by-id/{id}", get(anime::find_by_id_authenticated))
        .route("/admin/{id}", delete(anime::delete))
}

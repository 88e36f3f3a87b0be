use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET    /                   -> list_all
/// PUT    /                   -> replace
/// GET    /{id}               -> find_by_id
/// POST   /admin/save         -> save (admin only)
/// DELETE /admin/delete/{id}  -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_all).put(user::replace))
        .route("/{id}", get(user::find_by_id))
        .route("/admin/save", post(user::save))
        .route("/admin/delete/{id}", delete(user::delete))
}

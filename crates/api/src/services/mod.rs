//! Business logic between handlers and repositories.
//!
//! Services own lookup-or-fail semantics: every mutation of an existing
//! record first loads it through `find_by_id_or_throw_bad_request`, so a
//! missing id always surfaces as the same not-found error.

pub mod anime;
pub mod user;

pub use anime::AnimeService;
pub use user::UserService;

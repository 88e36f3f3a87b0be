use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Lookup by id found nothing. Surfaced to clients as a bad request,
    /// so a wrong id is not confused with a wrong route.
    #[error("{entity} not found with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

//! Router fallbacks, so unmatched requests get the structured error body.

use axum::http::{Method, StatusCode, Uri};

use crate::error::AppError;

/// Any path no route matches.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::Rejection {
        status: StatusCode::NOT_FOUND,
        details: format!("No endpoint for {}", uri.path()),
        source_type: "axum::Router::fallback",
    }
}

/// A known path requested with a method it does not serve.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::Rejection {
        status: StatusCode::METHOD_NOT_ALLOWED,
        details: format!("Request method '{method}' is not supported for {}", uri.path()),
        source_type: "axum::Router::method_not_allowed_fallback",
    }
}

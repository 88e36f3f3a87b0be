use std::any::Any;

use anime_core::error::CoreError;
use anime_core::types::Timestamp;
use anime_db::repositories::RepoError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use validator::ValidationErrors;

/// Title used for not-found and other bad-request domain errors.
pub const BAD_REQUEST_TITLE: &str = "Bad Request Exception, Check the Documentation";

/// Title used when request-body fields fail validation.
pub const INVALID_FIELDS_TITLE: &str = "Bad Request Exception, Invalid fields";

/// Realm advertised in the `WWW-Authenticate` challenge.
pub const BASIC_REALM: &str = "Basic realm=\"anime\"";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the structured error body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `anime_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request-body fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The framework refused to bind part of the request (body, path, query).
    #[error("{details}")]
    Rejection {
        status: StatusCode,
        details: String,
        source_type: &'static str,
    },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Structured error body returned for every failure except 403.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    pub title: String,
    pub status: u16,
    pub details: String,
    pub developer_message: String,
    pub timestamp: Timestamp,
}

impl ExceptionDetails {
    fn new(status: StatusCode, title: &str, details: String, developer_message: &str) -> Self {
        Self {
            title: title.to_string(),
            status: status.as_u16(),
            details,
            developer_message: developer_message.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// [`ExceptionDetails`] extended with the offending fields.
///
/// `fields` and `fields_message` are comma-joined and line up index by index.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationExceptionDetails {
    #[serde(flatten)]
    pub base: ExceptionDetails,
    pub fields: String,
    pub fields_message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(core) => core_response(core),
            AppError::Database(err) => database_response(&err),
            AppError::Validation(errors) => validation_response(&errors),
            AppError::Rejection {
                status,
                details,
                source_type,
            } => {
                let title = status.canonical_reason().unwrap_or("Request rejected");
                structured(status, title, details, source_type)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_response("anime_api::error::AppError::InternalError")
            }
        }
    }
}

fn core_response(core: CoreError) -> Response {
    match core {
        CoreError::NotFound { .. } => structured(
            StatusCode::BAD_REQUEST,
            BAD_REQUEST_TITLE,
            core.to_string(),
            "anime_core::error::CoreError::NotFound",
        ),
        CoreError::BadRequest(msg) => structured(
            StatusCode::BAD_REQUEST,
            BAD_REQUEST_TITLE,
            msg,
            "anime_core::error::CoreError::BadRequest",
        ),
        CoreError::Conflict(msg) => structured(
            StatusCode::CONFLICT,
            "Conflict",
            msg,
            "anime_core::error::CoreError::Conflict",
        ),
        CoreError::Unauthorized(msg) => {
            let mut response = structured(
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                msg,
                "anime_core::error::CoreError::Unauthorized",
            );
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_REALM));
            response
        }
        // Forbidden carries no body detail.
        CoreError::Forbidden(_) => StatusCode::FORBIDDEN.into_response(),
    }
}

/// Classify a sqlx error into a response.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn database_response(err: &sqlx::Error) -> Response {
    if let sqlx::Error::Database(db_err) = err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return structured(
                    StatusCode::CONFLICT,
                    "Conflict",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                    "sqlx::Error::Database",
                );
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    internal_response("sqlx::Error")
}

fn validation_response(errors: &ValidationErrors) -> Response {
    let mut pairs: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.clone(), message)
            })
        })
        .collect();
    pairs.sort();

    let fields = pairs
        .iter()
        .map(|(f, _)| f.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let fields_message = pairs
        .iter()
        .map(|(_, m)| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let body = ValidationExceptionDetails {
        base: ExceptionDetails::new(
            StatusCode::BAD_REQUEST,
            INVALID_FIELDS_TITLE,
            errors.to_string(),
            "validator::ValidationErrors",
        ),
        fields,
        fields_message,
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn internal_response(developer_message: &str) -> Response {
    structured(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        "An internal error occurred".to_string(),
        developer_message,
    )
}

fn structured(
    status: StatusCode,
    title: &str,
    details: String,
    developer_message: &str,
) -> Response {
    let body = ExceptionDetails::new(status, title, details, developer_message);
    (status, Json(body)).into_response()
}

/// Response for a handler that panicked, for `CatchPanicLayer::custom`.
///
/// The panic message is logged, never returned.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::InternalError(format!("Handler panicked: {message}")).into_response()
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(err) => AppError::Database(err),
            RepoError::UniqueViolation { .. } => {
                AppError::Core(CoreError::Conflict(err.to_string()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Malformed or mistyped bodies are bad requests. Content-type and
        // size failures keep axum's status.
        let status = match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => rejection.status(),
        };
        AppError::Rejection {
            status,
            details: rejection.body_text(),
            source_type: "axum::extract::rejection::JsonRejection",
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejection {
            status: rejection.status(),
            details: rejection.body_text(),
            source_type: "axum::extract::rejection::PathRejection",
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejection {
            status: rejection.status(),
            details: rejection.body_text(),
            source_type: "axum::extract::rejection::QueryRejection",
        }
    }
}

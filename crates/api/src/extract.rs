//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections, so every failure gets the structured body.

use axum::extract::{FromRequest, FromRequestParts, Request};
use validator::Validate;

use crate::error::AppError;

/// `axum::Json` with structured rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with structured rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` with structured rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// JSON body that must also pass its `validator` rules.
///
/// Parse failures reject like [`ApiJson`]; rule violations reject with
/// [`AppError::Validation`], which lists the offending fields.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: Validate,
    ApiJson<T>: FromRequest<S, Rejection = AppError>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

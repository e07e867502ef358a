use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::v1::response::ApiResponse;
use crate::models::FilterError;

#[derive(Error, Debug)]
pub enum StrandsError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("string value field is required and must be a non-empty string")]
    EmptyInput,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Request body exceeds the configured limit")]
    PayloadTooLarge,

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl StrandsError {
    /// True when the underlying storage rejected a write because the
    /// canonical value is already taken.
    pub fn is_unique_violation(err: &libsql::Error) -> bool {
        err.to_string().contains("UNIQUE constraint failed")
    }
}

impl IntoResponse for StrandsError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, StrandsError>;

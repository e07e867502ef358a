//! # V1 API Response Envelope & Error Contract
//!
//! Every v1 endpoint (except `DELETE`, which answers `204` with no body)
//! returns an [`ApiResponse<T>`] envelope:
//!
//! ```json
//! {
//!   "data": { ... },                                        // present on success
//!   "error": { "code": "not_found", "message": "..." }      // present on error
//! }
//! ```
//!
//! Error codes are snake_case strings and map one-to-one onto HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::StrandsError;
use crate::models::FilterError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
/// Each variant maps to a fixed HTTP status code via [`ErrorCode::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed body, missing/invalid parameters, or an unparsable query.
    /// HTTP 400.
    InvalidRequest,
    /// No string with that value is stored. HTTP 404.
    NotFound,
    /// The string already exists. HTTP 409.
    Conflict,
    /// The request body exceeds `MAX_BODY_BYTES`. HTTP 413.
    PayloadTooLarge,
    /// Well-formed but semantically invalid, e.g. a non-string `value` or
    /// `min_length > max_length`. HTTP 422.
    UnprocessableEntity,
    /// An unexpected server-side error occurred. Internal details are never
    /// leaked to the client. HTTP 500.
    InternalError,
}

impl ErrorCode {
    /// Returns the HTTP status code corresponding to this error code.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::PayloadTooLarge => write!(f, "payload_too_large"),
            Self::UnprocessableEntity => write!(f, "unprocessable_entity"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

/// Structured error payload within the API envelope.
///
/// ```json
/// { "code": "not_found", "message": "string does not exist in the system" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Machine-readable error classification.
    pub code: ErrorCode,
    /// Human-readable description safe to display to end users.
    pub message: String,
}

/// Canonical v1 API response envelope.
///
/// On success, `data` is present and `error` is absent. On error, `error` is
/// present and `data` is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// HTTP status to use in the response. Not serialized on the wire.
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Resource created response (HTTP 201).
    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::CREATED,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(_) => {
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<StrandsError> for ApiResponse<T> {
    /// Convert a [`StrandsError`] into a v1 [`ApiResponse`].
    ///
    /// Storage and I/O failures are **never** surfaced verbatim. A generic
    /// message is returned and the real error is logged via `tracing::error!`.
    fn from(err: StrandsError) -> Self {
        match err {
            StrandsError::NotFound(msg) => ApiResponse::error(ErrorCode::NotFound, msg),

            StrandsError::AlreadyExists(msg) => ApiResponse::error(ErrorCode::Conflict, msg),

            StrandsError::EmptyInput => {
                ApiResponse::error(ErrorCode::InvalidRequest, StrandsError::EmptyInput.to_string())
            }

            StrandsError::Validation(msg) => ApiResponse::error(ErrorCode::InvalidRequest, msg),

            StrandsError::Unprocessable(msg) => {
                ApiResponse::error(ErrorCode::UnprocessableEntity, msg)
            }

            StrandsError::PayloadTooLarge => ApiResponse::error(
                ErrorCode::PayloadTooLarge,
                StrandsError::PayloadTooLarge.to_string(),
            ),

            StrandsError::Filter(e @ FilterError::ConflictingFilters { .. }) => {
                ApiResponse::error(ErrorCode::UnprocessableEntity, e.to_string())
            }

            StrandsError::Filter(e) => ApiResponse::error(ErrorCode::InvalidRequest, e.to_string()),

            StrandsError::Json(e) => {
                ApiResponse::error(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}"))
            }

            ref internal @ (StrandsError::Database(_)
            | StrandsError::Io(_)
            | StrandsError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum_extra::extract::QueryRejection;

use crate::error::StrandsError;

/// JSON body extractor that rejects with [`StrandsError`], so failures use the
/// v1 error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(StrandsError))]
pub struct AppJson<T>(pub T);

/// Query-string extractor with the same rejection contract as [`AppJson`].
#[derive(FromRequestParts)]
#[from_request(via(axum_extra::extract::Query), rejection(StrandsError))]
pub struct AppQuery<T>(pub T);

impl From<JsonRejection> for StrandsError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

impl From<QueryRejection> for StrandsError {
    fn from(rejection: QueryRejection) -> Self {
        StrandsError::Validation(format!("Invalid query string: {rejection}"))
    }
}

// Well-formed JSON with a value of the wrong type is 422; anything that is not
// a usable request shape is 400.
fn map_json_rejection(rejection: JsonRejection) -> StrandsError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                StrandsError::Validation(format!("Missing required field: {field}"))
            } else if message.contains("invalid type") {
                StrandsError::Unprocessable(format!("Invalid field type: {message}"))
            } else {
                StrandsError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            StrandsError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            StrandsError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(err) => {
            if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
                StrandsError::PayloadTooLarge
            } else {
                StrandsError::Validation("Failed to read request body".to_string())
            }
        }
        _ => StrandsError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

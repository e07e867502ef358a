use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Strands API",
        version = "1.0.0",
        description = "Stores strings, derives their structural properties and retrieves them by filter or plain-English query.",
    ),
    paths(
        handlers::health::health_check,
        handlers::strings::create_string,
        handlers::strings::get_string,
        handlers::strings::delete_string,
        handlers::strings::list_strings,
        handlers::strings::filter_by_natural_language,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Domain
        models::PropertySet,
        models::Filter,
        models::InterpretedQuery,
        // Strings
        dto::strings::CreateStringRequest,
        dto::strings::StringResponse,
        dto::strings::ListStringsResponse,
        dto::strings::NaturalLanguageResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "strings", description = "String analysis, lookup, deletion and filtering"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}

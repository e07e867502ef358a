//! v1 String handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use crate::api::extractors::{AppJson, AppQuery};
use crate::api::v1::dto::{
    CreateStringRequest, ListStringsResponse, NaturalLanguageQuery, NaturalLanguageResponse,
    StringResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::error::StrandsError;
use crate::models::FilterParams;

/// `POST /api/v1/strings`
#[utoipa::path(
    post,
    path = "/api/v1/strings",
    tag = "strings",
    operation_id = "strings.create",
    request_body = CreateStringRequest,
    responses(
        (status = 201, description = "String analyzed and stored", body = StringResponse),
        (status = 400, description = "Missing, empty or malformed value", body = ApiError),
        (status = 409, description = "String already exists", body = ApiError),
        (status = 422, description = "Value is not a string", body = ApiError),
    )
)]
pub async fn create_string(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateStringRequest>,
) -> ApiResponse<StringResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    let raw = req.value.unwrap_or_default();
    match state.strings.submit(&raw).await {
        Ok(entry) => ApiResponse::created(StringResponse::from(entry)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/strings/{string_value}`
#[utoipa::path(
    get,
    path = "/api/v1/strings/{string_value}",
    tag = "strings",
    operation_id = "strings.get",
    params(("string_value" = String, Path, description = "String value (case-insensitive)")),
    responses(
        (status = 200, description = "String found", body = StringResponse),
        (status = 404, description = "String not found", body = ApiError),
    )
)]
pub async fn get_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> ApiResponse<StringResponse> {
    match state.strings.lookup(&value).await {
        Ok(entry) => ApiResponse::success(StringResponse::from(entry)),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/strings/{string_value}`
#[utoipa::path(
    delete,
    path = "/api/v1/strings/{string_value}",
    tag = "strings",
    operation_id = "strings.delete",
    params(("string_value" = String, Path, description = "String value (case-insensitive)")),
    responses(
        (status = 204, description = "String deleted"),
        (status = 404, description = "String not found", body = ApiError),
    )
)]
pub async fn delete_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<StatusCode, StrandsError> {
    state.strings.remove(&value).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/v1/strings`
#[utoipa::path(
    get,
    path = "/api/v1/strings",
    tag = "strings",
    operation_id = "strings.list",
    params(FilterParams),
    responses(
        (status = 200, description = "Strings matching every supplied filter", body = ListStringsResponse),
        (status = 400, description = "No filter supplied or invalid filter value", body = ApiError),
        (status = 422, description = "min_length is greater than max_length", body = ApiError),
    )
)]
pub async fn list_strings(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<FilterParams>,
) -> ApiResponse<ListStringsResponse> {
    match state.strings.list(&params).await {
        Ok(result) => ApiResponse::success(ListStringsResponse::from(result)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/strings/filter-by-natural-language`
#[utoipa::path(
    get,
    path = "/api/v1/strings/filter-by-natural-language",
    tag = "strings",
    operation_id = "strings.filterByNaturalLanguage",
    params(NaturalLanguageQuery),
    responses(
        (status = 200, description = "Strings matching the interpreted query", body = NaturalLanguageResponse),
        (status = 400, description = "Missing or unparsable query", body = ApiError),
        (status = 422, description = "Query resolves to conflicting filters", body = ApiError),
    )
)]
pub async fn filter_by_natural_language(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<NaturalLanguageQuery>,
) -> ApiResponse<NaturalLanguageResponse> {
    let query = params.query.unwrap_or_default();
    match state.strings.list_by_phrase(&query).await {
        Ok(result) => ApiResponse::success(NaturalLanguageResponse::from(result)),
        Err(e) => e.into(),
    }
}

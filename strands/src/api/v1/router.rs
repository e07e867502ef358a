use axum::{routing::get, Router};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let strings = Router::new()
        .route(
            "/strings",
            get(handlers::strings::list_strings).post(handlers::strings::create_string),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(handlers::strings::filter_by_natural_language),
        )
        .route(
            "/strings/{string_value}",
            get(handlers::strings::get_string).delete(handlers::strings::delete_string),
        );

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    Router::new().merge(public_routes).merge(strings)
}

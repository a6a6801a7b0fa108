use axum::{http::StatusCode, response::Html};
use harbor_core::AppError;

use crate::constants::UNKNOWN_ENDPOINT_MESSAGE;
use crate::error::HttpAppError;

const INDEX_PAGE: &str = include_str!("../../views/index.html");
const NOT_FOUND_PAGE: &str = include_str!("../../views/404.html");

/// Landing page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Fallback for paths outside the API
pub async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}

/// Fallback for unknown paths under the API prefix
pub async fn unknown_api_endpoint() -> HttpAppError {
    HttpAppError(AppError::NotFound(UNKNOWN_ENDPOINT_MESSAGE.to_string()))
}

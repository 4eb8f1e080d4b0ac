pub mod admin;
pub mod bookings;
pub mod catalog;
pub mod concierge;

use axum::{http::StatusCode, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use validator::ValidationErrors;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(catalog::routes())
        .merge(bookings::routes())
        .merge(admin::routes())
        .merge(concierge::routes())
}

// --- Ошибки API ---

#[derive(Debug, Serialize)]
pub struct ApiError {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
}

pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub fn to_api_error(status: StatusCode, message: &str) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { success: false, message: message.to_string(), errors: None }))
}

/// 422 с ошибками по полям.
pub fn validation_error(errors: ValidationErrors) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiError {
            success: false,
            message: "Please check the highlighted fields".to_string(),
            errors: Some(errors),
        }),
    )
}

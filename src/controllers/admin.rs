use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

use crate::controllers::{validation_error, ApiResult};
use crate::middleware::AdminUser;
use crate::models::{
    catalog::{NewGalleryImage, NewPackage, NewTestimonial},
    BookingRecord,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/bookings", get(list_bookings))
        .route("/admin/packages", post(add_package))
        .route("/admin/testimonials", post(add_testimonial))
        .route("/admin/gallery", post(add_gallery_image))
}

// GET /api/admin/bookings
async fn list_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Json<Vec<BookingRecord>> {
    Json(state.store.bookings())
}

// POST /api/admin/packages
async fn add_package(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Json(req): Json<NewPackage>,
) -> ApiResult<impl IntoResponse> {
    req.validate().map_err(validation_error)?;
    tracing::info!("Admin {} is adding package '{}'", admin.username, req.name);
    Ok((StatusCode::CREATED, Json(state.store.add_package(req))))
}

// POST /api/admin/testimonials
async fn add_testimonial(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(req): Json<NewTestimonial>,
) -> ApiResult<impl IntoResponse> {
    req.validate().map_err(validation_error)?;
    Ok((StatusCode::CREATED, Json(state.store.add_testimonial(req))))
}

// POST /api/admin/gallery
async fn add_gallery_image(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(req): Json<NewGalleryImage>,
) -> ApiResult<impl IntoResponse> {
    req.validate().map_err(validation_error)?;
    Ok((StatusCode::CREATED, Json(state.store.add_gallery_image(req))))
}

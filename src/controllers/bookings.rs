use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::{validation_error, ApiResult};
use crate::models::BookingRequest;
use crate::AppState;

pub const BOOKING_CONFIRMATION: &str = "Booking request sent! We will contact you shortly.";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
}

#[derive(Debug, Serialize)]
struct CreateBookingResponse {
    success: bool,
    message: &'static str,
    booking_id: Uuid,
}

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate().map_err(validation_error)?;

    let record = state.store.record_booking(req);
    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            success: true,
            message: BOOKING_CONFIRMATION,
            booking_id: record.id,
        }),
    ))
}

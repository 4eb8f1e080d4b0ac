use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::controllers::{to_api_error, ApiResult};
use crate::models::{GalleryImage, Hall, Package, PackageCategory, Testimonial, VenueInfo};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venue", get(get_venue))
        .route("/packages", get(list_packages))
        .route("/packages/{id}", get(get_package))
        .route("/halls", get(list_halls))
        .route("/testimonials", get(list_testimonials))
        .route("/gallery", get(list_gallery))
}

#[derive(Debug, Deserialize)]
pub struct PackagesQuery {
    pub category: Option<PackageCategory>,
}

async fn get_venue(State(state): State<Arc<AppState>>) -> Json<VenueInfo> {
    Json(state.store.venue())
}

// GET /api/packages?category=wedding
async fn list_packages(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PackagesQuery>,
) -> Json<Vec<Package>> {
    let packages = match params.category {
        Some(category) => state.store.packages_by_category(category),
        None => state.store.packages(),
    };
    Json(packages)
}

// GET /api/packages/{id}
async fn get_package(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Package>> {
    state
        .store
        .package(&id)
        .map(Json)
        .ok_or_else(|| to_api_error(StatusCode::NOT_FOUND, "Package not found"))
}

async fn list_halls(State(state): State<Arc<AppState>>) -> Json<Vec<Hall>> {
    Json(state.store.halls())
}

async fn list_testimonials(State(state): State<Arc<AppState>>) -> Json<Vec<Testimonial>> {
    Json(state.store.testimonials())
}

async fn list_gallery(State(state): State<Arc<AppState>>) -> Json<Vec<GalleryImage>> {
    Json(state.store.gallery())
}

pub mod auth;
pub mod config;
pub mod controllers;
pub mod interpreter;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use services::{
    concierge::{BackendError, ConciergeBackend, ConciergeService},
    gemini::GeminiClient,
    sessions::ChatSessions,
};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub store: store::ContentStore,
    pub sessions: ChatSessions,
    pub concierge: ConciergeService,
    pub auth: Arc<dyn auth::AdminAuthenticator>,
}

impl AppState {
    /// Боевое состояние: каталог Mistic Falls и Gemini в качестве бэкенда.
    pub fn new(config: config::Config) -> Result<Arc<Self>, BackendError> {
        let gemini = GeminiClient::from_config(&config.gemini, &config.circuit_breaker)?;
        Ok(Self::with_backend(config, store::ContentStore::seeded(), Arc::new(gemini)))
    }

    /// Состояние с произвольным бэкендом консьержа (для тестов и альтернативных моделей).
    pub fn with_backend(
        config: config::Config,
        store: store::ContentStore,
        backend: Arc<dyn ConciergeBackend>,
    ) -> Arc<Self> {
        let concierge = ConciergeService::from_config(&config, backend);
        let auth = auth::from_config(&config.admin);
        Arc::new(Self {
            config,
            store,
            sessions: ChatSessions::new(),
            concierge,
            auth,
        })
    }
}

/// Полный роутер сервиса.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Mistic Falls API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#![allow(dead_code)]

use std::sync::Arc;

use mistic_falls::{
    app,
    config::{AdminConfig, AppConfig, CircuitBreakerConfig, ConciergeConfig, Config, GeminiConfig},
    AppState,
};

pub const ADMIN_PASSWORD: &str = "sultan-road-5";

pub fn test_config(base_url: &str, api_key: Option<&str>) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "mistic_falls=debug".to_string(),
        },
        gemini: GeminiConfig {
            api_key: api_key.map(str::to_string),
            base_url: base_url.to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_seconds: 2,
        },
        concierge: ConciergeConfig {
            history_limit: 20,
            session_idle_minutes: 60,
        },
        admin: AdminConfig {
            username: "admin".to_string(),
            password: Some(ADMIN_PASSWORD.to_string()),
        },
        circuit_breaker: CircuitBreakerConfig {
            failure_threshold: 5,
            timeout_seconds: 60,
        },
    }
}

/// Поднимает сервис на свободном порту и возвращает его базовый URL.
pub async fn spawn_app(state: Arc<AppState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

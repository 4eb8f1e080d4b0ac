use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use base64::{Engine as _, engine::general_purpose};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AdminUser {
    pub username: String,
}

// Basic Auth extractor для админки
impl FromRequestParts<Arc<crate::AppState>> for AdminUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>
    ) -> Result<Self, Self::Rejection> {
        // Получаем заголовок Authorization
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let (username, password) = parse_basic(auth_header).ok_or(StatusCode::UNAUTHORIZED)?;

        if !state.auth.authenticate(&username, &password) {
            tracing::warn!("Rejected admin login for '{}'", username);
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(AdminUser { username })
    }
}

/// Разбирает `Basic base64(user:password)`.
fn parse_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;

    // Разделяем user:password, в пароле двоеточие допустимо
    let (username, password) = credentials.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

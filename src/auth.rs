//! Проверка учётных данных администратора.
//!
//! Один логин и пароль из конфигурации. Сессий и токенов нет: каждый запрос
//! админки несёт Basic Auth и проверяется заново.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::warn;

use crate::config::AdminConfig;

pub trait AdminAuthenticator: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// Ровно одна пара логин/пароль. Пароль хранится только в виде SHA-256.
pub struct SingleCredentialAuthenticator {
    username: String,
    password_digest: [u8; 32],
}

impl SingleCredentialAuthenticator {
    pub fn new(username: impl Into<String>, password: &str) -> Self {
        Self {
            username: username.into(),
            password_digest: digest(password),
        }
    }
}

impl AdminAuthenticator for SingleCredentialAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        // Сравниваем дайджесты целиком, без раннего выхода
        let supplied = digest(password);
        let password_ok = supplied
            .iter()
            .zip(self.password_digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0;
        password_ok && username == self.username
    }
}

/// Админка выключена: отклоняет всё.
pub struct DisabledAuthenticator;

impl AdminAuthenticator for DisabledAuthenticator {
    fn authenticate(&self, _username: &str, _password: &str) -> bool {
        false
    }
}

pub fn from_config(config: &AdminConfig) -> Arc<dyn AdminAuthenticator> {
    match config.password.as_deref() {
        Some(password) => Arc::new(SingleCredentialAuthenticator::new(&config.username, password)),
        None => {
            warn!("ADMIN_PASSWORD is not set - admin endpoints are disabled");
            Arc::new(DisabledAuthenticator)
        }
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_credential() {
        let auth = SingleCredentialAuthenticator::new("admin", "kano-2025");
        assert!(auth.authenticate("admin", "kano-2025"));
        assert!(!auth.authenticate("admin", "kano-2024"));
        assert!(!auth.authenticate("manager", "kano-2025"));
        assert!(!auth.authenticate("admin", ""));
    }

    #[test]
    fn test_missing_password_disables_admin() {
        let auth = from_config(&AdminConfig { username: "admin".to_string(), password: None });
        assert!(!auth.authenticate("admin", ""));
        assert!(!auth.authenticate("admin", "anything"));
    }
}

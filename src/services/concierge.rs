//! concierge.rs
//!
//! Сервисный слой чат-консьержа "Mistic AI".
//!
//! Ключевые компоненты:
//! 1.  **ConciergeBackend**: интерфейс генеративного бэкенда (в проде - `GeminiClient`).
//! 2.  **ConciergeService**: отправляет сообщение вместе с историей, ограничивает ожидание
//!     таймаутом и превращает ответ в `ChatTurn`. Любой сбой бэкенда превращается
//!     в фиксированное извинение, наружу ошибка не уходит никогда.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::Duration;
use tracing::{error, info, warn};

use crate::{
    config::Config,
    interpreter,
    models::{ChatTurn, Speaker},
};

/// Первая реплика каждой сессии.
pub const GREETING: &str =
    "Sannu! Welcome to Mistic Falls. I am your AI Event Planner. How can I help you plan your perfect event today?";

/// Ответ при любом сбое бэкенда (сеть, таймаут, авторизация, битый ответ).
pub const OVERWHELMED_FALLBACK: &str =
    "I apologize, but I'm currently overwhelmed with inquiries. Please contact our front desk at 5 Sultan Road directly!";

/// Ответ, если бэкенд вернул пустой текст.
pub const BLANK_REPLY_FALLBACK: &str =
    "I'm having trouble connecting to the event server. Please try again.";

/// Системная инструкция: персона, факты о площадке и формат бюджета.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are "Mistic AI", the event concierge of "Mistic Falls", an event centre at 5 Sultan Road, Nassarawa, Kano, Nigeria.
Speak warmly and professionally, with a celebratory touch of Hausa hospitality.

Venue facts:
- Address: 5 Sultan Road, Nassarawa, Kano.
- Capacity: up to 1000 guests (Grand Hall), Conference Hall 300, Small Hall 200, Outdoor Garden.
- Events: weddings, Nikkah ceremonies, parties, corporate receptions, bridal showers.
- Vibe: luxurious, colorful, exciting.

What you do:
1. Answer questions about capacity, location and atmosphere.
2. Suggest decor for themes such as "Royal Gold", "Traditional Hausa" or "Modern Chic".
3. Plan budgets. When the guest asks for a budget breakdown, add exactly one block that starts with ```json
   and ends with ```, containing a JSON list of objects {"label": <category>, "amount": <naira amount as a number>}.
   Amounts must add up to the guest's budget.
4. Draft short speeches and invitation texts on request.

Keep prices consistent with high-end Kano venues (big weddings cost millions of Naira).
If you cannot know something, such as availability on a given date, ask the guest to use the "Book Now" form so the manager can confirm.
"#;

/// Ошибки обращения к генеративному бэкенду.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("generative API key is not configured")]
    MissingApiKey,
    #[error("circuit breaker is open - generative backend temporarily unavailable")]
    CircuitOpen,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Генеративный бэкенд: принимает системную инструкцию, предыдущие реплики и новое сообщение.
#[async_trait]
pub trait ConciergeBackend: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, BackendError>;
}

#[derive(Clone)]
pub struct ConciergeService {
    backend: Arc<dyn ConciergeBackend>,
    timeout: Duration,
    history_limit: usize,
}

impl ConciergeService {
    pub fn new(backend: Arc<dyn ConciergeBackend>, timeout: Duration, history_limit: usize) -> Self {
        Self { backend, timeout, history_limit }
    }

    pub fn from_config(config: &Config, backend: Arc<dyn ConciergeBackend>) -> Self {
        // Даём HTTP-клиенту дотянуть свой таймаут, общий - чуть длиннее
        let timeout = Duration::from_secs(config.gemini.timeout_seconds.saturating_add(5));
        Self::new(backend, timeout, config.concierge.history_limit)
    }

    /// Ответ консьержа на сообщение пользователя. Никогда не возвращает ошибку.
    pub async fn reply(&self, message: &str, history: &[ChatTurn]) -> ChatTurn {
        let context = replay_window(history, self.history_limit).to_vec();
        let backend = self.backend.clone();
        let message_owned = message.to_string();

        // Отдельная задача: паника внутри бэкенда превращается в JoinError, а не роняет обработчик
        let mut task = tokio::spawn(async move {
            backend.generate(SYSTEM_INSTRUCTION, &context, &message_owned).await
        });

        let raw = match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(Ok(raw))) => raw,
            Ok(Ok(Err(e))) => {
                error!("Concierge backend error: {}", e);
                return ChatTurn::assistant(OVERWHELMED_FALLBACK);
            }
            Ok(Err(join_error)) => {
                error!("Concierge backend task failed: {}", join_error);
                return ChatTurn::assistant(OVERWHELMED_FALLBACK);
            }
            Err(_) => {
                task.abort();
                error!("Concierge backend timed out after {:?}", self.timeout);
                return ChatTurn::assistant(OVERWHELMED_FALLBACK);
            }
        };

        if raw.trim().is_empty() {
            warn!("Concierge backend returned a blank reply");
            return ChatTurn::assistant(BLANK_REPLY_FALLBACK);
        }

        let turn = interpreter::interpret(&raw, history);
        info!(
            "Concierge replied ({} chars, budget: {})",
            turn.text.len(),
            turn.has_budget()
        );
        turn
    }
}

/// Последние `limit` реплик, начиная с реплики пользователя.
///
/// Приветствие и другие ответы ассистента в начале окна отбрасываются:
/// диалог для бэкенда должен начинаться с пользователя.
pub fn replay_window(history: &[ChatTurn], limit: usize) -> &[ChatTurn] {
    let window = &history[history.len().saturating_sub(limit)..];
    let first_user = window
        .iter()
        .position(|turn| turn.speaker == Speaker::User)
        .unwrap_or(window.len());
    &window[first_user..]
}

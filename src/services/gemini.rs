//! gemini.rs
//!
//! Клиент Gemini `generateContent`, реализующий `ConciergeBackend`.
//! Все сетевые вызовы проходят через `CircuitBreaker`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{debug, error, warn};

use crate::{
    config::{CircuitBreakerConfig, GeminiConfig},
    interpreter,
    models::{ChatTurn, Speaker},
    services::{
        circuit_breaker::CircuitBreaker,
        concierge::{BackendError, ConciergeBackend},
    },
};

// --- Модели данных для API Gemini ---

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// Часть ответа. Нетекстовые части (вызовы функций и т.п.) приходят без `text`.
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: Some(text.to_string()) }],
        }
    }
}

/// Клиент для взаимодействия с Gemini API.
#[derive(Clone)]
pub struct GeminiClient {
    /// Ключ API. Без него запросы не отправляются.
    api_key: Option<String>,
    /// Базовый URL API (до `/models`).
    base_url: String,
    model: String,
    http_client: reqwest::Client,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl GeminiClient {
    /// Создает и конфигурирует клиент на основе настроек приложения.
    pub fn from_config(
        config: &GeminiConfig,
        breaker: &CircuitBreakerConfig,
    ) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        if config.api_key.is_none() {
            warn!("GEMINI_API_KEY is not set - the concierge will answer with the fallback message");
        }

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            http_client,
            circuit_breaker: Arc::new(CircuitBreaker::new(
                breaker.failure_threshold,
                breaker.timeout_seconds,
            )),
        })
    }

    /// Выполняет асинхронную операцию, пропуская её через Circuit Breaker.
    async fn execute_with_circuit_breaker<F, T>(&self, operation: F) -> Result<T, BackendError>
    where
        F: std::future::Future<Output = Result<T, BackendError>>,
    {
        if !self.circuit_breaker.can_execute() {
            warn!("Circuit breaker is OPEN - blocking generative backend request");
            return Err(BackendError::CircuitOpen);
        }

        match operation.await {
            Ok(result) => {
                self.circuit_breaker.record_success();
                Ok(result)
            }
            Err(e) => {
                self.circuit_breaker.record_failure();
                let (state, failures) = self.circuit_breaker.status();
                error!(
                    "Generative backend request failed ({} in a row, circuit {:?}): {}",
                    failures, state, e
                );
                Err(e)
            }
        }
    }

    async fn send(&self, api_key: &str, request: &GenerateContentRequest) -> Result<String, BackendError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("Gemini request: {} contents", request.contents.len());

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status { status: status.as_u16(), body });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(reply_text(parsed))
    }
}

/// Текст первого кандидата; пустая строка, если текста нет.
fn reply_text(response: GenerateContentResponse) -> String {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return String::new();
    };
    if let Some(reason) = &candidate.finish_reason {
        debug!("Gemini finish reason: {}", reason);
    }

    candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn build_request(system_instruction: &str, history: &[ChatTurn], message: &str) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|turn| {
            match (turn.speaker, &turn.budget) {
                (Speaker::User, _) => Content::text(Some("user"), &turn.text),
                // Бюджет возвращаем в блок, иначе модель не увидит свои цифры
                (Speaker::Assistant, Some(series)) => {
                    Content::text(Some("model"), &interpreter::render_with_budget(&turn.text, series))
                }
                (Speaker::Assistant, None) => Content::text(Some("model"), &turn.text),
            }
        })
        .collect();
    contents.push(Content::text(Some("user"), message));

    GenerateContentRequest {
        system_instruction: Content::text(None, system_instruction),
        contents,
    }
}

#[async_trait]
impl ConciergeBackend for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, BackendError> {
        let api_key = self.api_key.as_deref().ok_or(BackendError::MissingApiKey)?;
        let request = build_request(system_instruction, history, message);
        self.execute_with_circuit_breaker(self.send(api_key, &request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetItem;

    #[test]
    fn test_request_shape() {
        let history = vec![ChatTurn::user("Hi"), ChatTurn::assistant("Sannu!")];
        let request = build_request("persona", &history, "Budget please");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["systemInstruction"], serde_json::json!({"parts": [{"text": "persona"}]}));
        let roles: Vec<&str> = json["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(json["contents"][2]["parts"][0]["text"], "Budget please");
    }

    #[test]
    fn test_budget_turn_is_replayed_with_its_figures() {
        let history = vec![
            ChatTurn::user("Budget for 1.2M?"),
            ChatTurn::assistant_with_budget(
                "Here is your plan.",
                vec![BudgetItem::new("Venue", 800000.0), BudgetItem::new("Catering", 400000.0)],
            ),
        ];
        let request = build_request("persona", &history, "Cut catering by half");
        let json = serde_json::to_value(&request).unwrap();

        let replayed = json["contents"][1]["parts"][0]["text"].as_str().unwrap();
        assert!(replayed.starts_with("Here is your plan."));
        assert!(replayed.contains("800000"));
        assert!(replayed.contains("Catering"));

        let reinterpreted = interpreter::interpret(replayed, &[]);
        assert_eq!(reinterpreted.budget, history[1].budget);
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Budget for 1.2M?");
    }

    #[test]
    fn test_reply_text_joins_text_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"role":"model","parts":[{"text":"Hello "},{"functionCall":{}},{"text":"there"}]},"finishReason":"STOP"},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(reply_text(response), "Hello there");
    }

    #[test]
    fn test_reply_text_without_candidates_is_empty() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(reply_text(response), "");
    }
}

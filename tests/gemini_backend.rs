mod common;

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mistic_falls::config::Config;
use mistic_falls::models::{BudgetItem, ChatTurn};
use mistic_falls::services::concierge::{
    ConciergeService, BLANK_REPLY_FALLBACK, GREETING, OVERWHELMED_FALLBACK,
};
use mistic_falls::services::gemini::GeminiClient;

const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn concierge(config: &Config) -> ConciergeService {
    let client = GeminiClient::from_config(&config.gemini, &config.circuit_breaker).unwrap();
    ConciergeService::from_config(config, Arc::new(client))
}

fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_budget_reply_from_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(
            "Here is your plan.\n```json\n[{\"label\":\"Venue\",\"amount\":800000},{\"label\":\"Catering\",\"amount\":400000}]\n```",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri(), Some("test-key"));
    let turn = concierge(&config).reply("Budget for 1.2M naira?", &[]).await;

    assert_eq!(turn.text, "Here is your plan.");
    assert_eq!(
        turn.budget,
        Some(vec![
            BudgetItem::new("Venue", 800000.0),
            BudgetItem::new("Catering", 400000.0),
        ])
    );
}

#[tokio::test]
async fn test_history_and_system_instruction_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("Up to 200 guests.")))
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri(), Some("test-key"));
    let history = vec![
        ChatTurn::assistant(GREETING),
        ChatTurn::user("Do you host Nikkah ceremonies?"),
        ChatTurn::assistant("Yes, in the Small Hall."),
        ChatTurn::user("Budget for 1.2M?"),
        ChatTurn::assistant_with_budget(
            "Here is your plan.",
            vec![BudgetItem::new("Venue", 800000.0), BudgetItem::new("Catering", 400000.0)],
        ),
    ];
    let turn = concierge(&config).reply("How many guests fit?", &history).await;
    assert_eq!(turn.text, "Up to 200 guests.");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    let system = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
    assert!(system.contains("Mistic AI"));
    assert!(system.contains("```json"));

    let contents = body["contents"].as_array().unwrap();
    let roles: Vec<&str> = contents.iter().map(|c| c["role"].as_str().unwrap()).collect();
    assert_eq!(roles, vec!["user", "model", "user", "model", "user"]);
    assert_eq!(contents[0]["parts"][0]["text"], "Do you host Nikkah ceremonies?");
    assert_eq!(contents[4]["parts"][0]["text"], "How many guests fit?");

    // Бюджет уходит обратно в модель тем же блоком, в котором пришёл
    let budget_turn = contents[3]["parts"][0]["text"].as_str().unwrap();
    assert!(budget_turn.starts_with("Here is your plan.\n```json\n"));
    assert!(budget_turn.contains("\"amount\":800000"));
    assert!(budget_turn.ends_with("```"));
}

#[tokio::test]
async fn test_server_error_yields_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri(), Some("test-key"));
    let turn = concierge(&config).reply("hello", &[]).await;
    assert_eq!(turn.text, OVERWHELMED_FALLBACK);
    assert!(turn.budget.is_none());
}

#[tokio::test]
async fn test_rejected_key_yields_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": {"code": 403}})))
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri(), Some("revoked"));
    let turn = concierge(&config).reply("hello", &[]).await;
    assert_eq!(turn.text, OVERWHELMED_FALLBACK);
}

#[tokio::test]
async fn test_malformed_body_yields_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri(), Some("test-key"));
    let turn = concierge(&config).reply("hello", &[]).await;
    assert_eq!(turn.text, OVERWHELMED_FALLBACK);
}

#[tokio::test]
async fn test_empty_candidates_yield_trouble_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri(), Some("test-key"));
    let turn = concierge(&config).reply("hello", &[]).await;
    assert_eq!(turn.text, BLANK_REPLY_FALLBACK);
}

#[tokio::test]
async fn test_slow_backend_yields_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate("too late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    // timeout_seconds = 2 в тестовой конфигурации
    let config = common::test_config(&server.uri(), Some("test-key"));
    let turn = concierge(&config).reply("hello", &[]).await;
    assert_eq!(turn.text, OVERWHELMED_FALLBACK);
}

#[tokio::test]
async fn test_missing_api_key_never_calls_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("hi")))
        .expect(0)
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri(), None);
    let turn = concierge(&config).reply("hello", &[]).await;
    assert_eq!(turn.text, OVERWHELMED_FALLBACK);
}

#[tokio::test]
async fn test_open_circuit_stops_calling_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = common::test_config(&server.uri(), Some("test-key"));
    config.circuit_breaker.failure_threshold = 2;
    let concierge = concierge(&config);

    for _ in 0..4 {
        let turn = concierge.reply("hello", &[]).await;
        assert_eq!(turn.text, OVERWHELMED_FALLBACK);
    }
}

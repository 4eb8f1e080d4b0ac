use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::controllers::{to_api_error, ApiResult};
use crate::models::{chat::budget_total, BudgetSeries, ChatTurn, Speaker};
use crate::AppState;

/// Ограничение длины одного сообщения пользователя.
const MAX_MESSAGE_CHARS: usize = 2000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/concierge/sessions", post(open_session))
        .route("/concierge/sessions/{id}", get(get_session).delete(close_session))
        .route("/concierge/sessions/{id}/messages", post(send_message))
}

/// Реплика в том виде, в каком её рисует виджет: флаг `is_budget` включает диаграмму.
#[derive(Debug, Serialize)]
pub struct ChatTurnView {
    pub speaker: Speaker,
    pub text: String,
    pub is_budget: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetSeries>,
    /// Подпись под диаграммой.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_total: Option<f64>,
}

impl From<ChatTurn> for ChatTurnView {
    fn from(turn: ChatTurn) -> Self {
        Self {
            speaker: turn.speaker,
            is_budget: turn.has_budget(),
            budget_total: turn.budget.as_deref().map(budget_total),
            text: turn.text,
            budget: turn.budget,
        }
    }
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    session_id: Uuid,
    turns: Vec<ChatTurnView>,
}

#[derive(Debug, Deserialize)]
struct SendMessageRequest {
    message: String,
}

fn views(turns: Vec<ChatTurn>) -> Vec<ChatTurnView> {
    turns.into_iter().map(ChatTurnView::from).collect()
}

fn session_not_found() -> (StatusCode, Json<crate::controllers::ApiError>) {
    to_api_error(StatusCode::NOT_FOUND, "Chat session not found")
}

// POST /api/concierge/sessions
async fn open_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (session_id, turns) = state.sessions.open();
    (StatusCode::CREATED, Json(SessionResponse { session_id, turns: views(turns) }))
}

// GET /api/concierge/sessions/{id}
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionResponse>> {
    let handle = state.sessions.get(&id).ok_or_else(session_not_found)?;
    let turns = handle.lock().await.turns.clone();
    Ok(Json(SessionResponse { session_id: id, turns: views(turns) }))
}

// DELETE /api/concierge/sessions/{id}
async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.sessions.close(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found())
    }
}

// POST /api/concierge/sessions/{id}/messages
async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Json<ChatTurnView>> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(to_api_error(StatusCode::BAD_REQUEST, "Message must not be empty"));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(to_api_error(StatusCode::BAD_REQUEST, "Message is too long"));
    }

    let handle = state.sessions.get(&id).ok_or_else(session_not_found)?;

    // Держим мьютекс сессии всё время запроса: второе сообщение подождёт первое
    let mut session = handle.lock().await;
    let reply = state.concierge.reply(message, &session.turns).await;
    session.push_exchange(ChatTurn::user(message), reply.clone());

    Ok(Json(reply.into()))
}

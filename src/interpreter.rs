//! interpreter.rs
//!
//! Превращает сырой ответ генеративной модели в реплику чата.
//!
//! Модель может вложить в текст разбивку бюджета: блок между маркерами `` ```json `` и `` ``` ``
//! со списком объектов `{"label": ..., "amount": ...}`. Разбор идёт в две фазы:
//! 1.  **locate_fence**: найти первый открывающий маркер и ближайший после него закрывающий.
//! 2.  **parse_budget**: разобрать содержимое блока как список статей бюджета.
//!
//! Ошибки разбора никогда не доходят до пользователя: реплика просто остаётся без бюджета,
//! а текст показывается как есть.

use std::ops::Range;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{BudgetSeries, ChatTurn};

/// Открывающий маркер: тройной бэктик и тег формата.
pub const OPENING_MARKER: &str = "```json";
/// Закрывающий маркер.
pub const CLOSING_MARKER: &str = "```";

/// Найденный блок: байтовый диапазон в исходном тексте (вместе с маркерами) и содержимое.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence<'a> {
    pub span: Range<usize>,
    pub payload: &'a str,
}

#[derive(Debug, Error)]
pub enum BudgetParseError {
    #[error("budget payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("budget payload is not a list")]
    NotAList,
    #[error("budget item '{label}' has invalid amount {amount}")]
    InvalidAmount { label: String, amount: f64 },
}

/// Результат поиска бюджета в ответе.
#[derive(Debug)]
pub enum FencedBudget {
    /// Блока нет.
    Absent,
    /// Блок есть, но разобрать его не удалось.
    Invalid(BudgetParseError),
    /// Бюджет разобран; `span` - что вырезать из текста.
    Found { series: BudgetSeries, span: Range<usize> },
}

/// Фаза 1: найти первый блок. Незакрытый блок считается отсутствующим.
pub fn locate_fence(raw: &str) -> Option<Fence<'_>> {
    let start = raw.find(OPENING_MARKER)?;
    let payload_start = start + OPENING_MARKER.len();
    let payload_len = raw[payload_start..].find(CLOSING_MARKER)?;
    let payload_end = payload_start + payload_len;

    Some(Fence {
        span: start..payload_end + CLOSING_MARKER.len(),
        payload: &raw[payload_start..payload_end],
    })
}

/// Фаза 2: разобрать содержимое блока.
pub fn parse_budget(payload: &str) -> Result<BudgetSeries, BudgetParseError> {
    let value: serde_json::Value = serde_json::from_str(payload.trim())?;
    if !value.is_array() {
        return Err(BudgetParseError::NotAList);
    }

    let series: BudgetSeries = serde_json::from_value(value)?;
    if let Some(bad) = series.iter().find(|item| !item.amount.is_finite() || item.amount < 0.0) {
        return Err(BudgetParseError::InvalidAmount {
            label: bad.label.clone(),
            amount: bad.amount,
        });
    }
    Ok(series)
}

/// Обе фазы вместе. Учитывается только первый блок.
pub fn extract_budget(raw: &str) -> FencedBudget {
    let Some(fence) = locate_fence(raw) else {
        return FencedBudget::Absent;
    };

    match parse_budget(fence.payload) {
        Ok(series) => FencedBudget::Found { series, span: fence.span },
        Err(e) => FencedBudget::Invalid(e),
    }
}

/// Обратное к `interpret`: текст реплики с бюджетом, вложенным обратно в блок.
///
/// Нужен при повторной отправке истории в модель, чтобы она видела свои же цифры.
pub fn render_with_budget(text: &str, series: &BudgetSeries) -> String {
    match serde_json::to_string(series) {
        Ok(payload) => format!("{}\n{}\n{}\n{}", text, OPENING_MARKER, payload, CLOSING_MARKER),
        Err(e) => {
            warn!("Failed to serialize budget for replay, sending text only: {}", e);
            text.to_string()
        }
    }
}

/// Собрать реплику ассистента из сырого ответа.
///
/// Блок вырезается из текста только если бюджет удалось извлечь. Битый блок
/// остаётся в тексте как есть, текст в любом случае обрезается по краям.
pub fn interpret(raw: &str, prior_turns: &[ChatTurn]) -> ChatTurn {
    match extract_budget(raw) {
        FencedBudget::Found { series, span } => {
            debug!(
                "Budget with {} items extracted (conversation length {})",
                series.len(),
                prior_turns.len()
            );
            let mut text = String::with_capacity(raw.len() - span.len());
            text.push_str(&raw[..span.start]);
            text.push_str(&raw[span.end..]);
            ChatTurn::assistant_with_budget(text.trim(), series)
        }
        FencedBudget::Invalid(e) => {
            warn!("Failed to parse budget block, showing reply as plain text: {}", e);
            ChatTurn::assistant(raw.trim())
        }
        FencedBudget::Absent => ChatTurn::assistant(raw.trim()),
    }
}

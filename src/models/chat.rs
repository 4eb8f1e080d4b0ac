use serde::{Deserialize, Serialize};

/// Кто произнёс реплику.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// Одна статья бюджета: название и сумма в найрах.
///
/// Модель исторически отдаёт `name`/`value`, поэтому принимаем оба варианта имён полей.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    #[serde(alias = "name")]
    pub label: String,
    #[serde(alias = "value")]
    pub amount: f64,
}

impl BudgetItem {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self { label: label.into(), amount }
    }
}

/// Упорядоченная разбивка бюджета. Сумма ни с чем не сверяется.
pub type BudgetSeries = Vec<BudgetItem>;

/// Сумма всех статей, для подписи под диаграммой.
pub fn budget_total(series: &[BudgetItem]) -> f64 {
    series.iter().map(|item| item.amount).sum()
}

/// Реплика в чате консьержа.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetSeries>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { speaker: Speaker::User, text: text.into(), budget: None }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { speaker: Speaker::Assistant, text: text.into(), budget: None }
    }

    pub fn assistant_with_budget(text: impl Into<String>, budget: BudgetSeries) -> Self {
        Self { speaker: Speaker::Assistant, text: text.into(), budget: Some(budget) }
    }

    pub fn has_budget(&self) -> bool {
        self.budget.is_some()
    }
}

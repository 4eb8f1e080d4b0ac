use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Максимальная вместимость площадки.
pub const MAX_GUESTS: u32 = 1000;

/// Заявка с формы "Book Your Date".
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "phone must be 7 to 20 characters"))]
    pub phone: String,
    pub date: NaiveDate,
    #[validate(range(min = 1, max = 1000, message = "guest count must be between 1 and 1000"))]
    pub guest_count: u32,
    /// Id пакета или "custom". С каталогом не сверяется.
    #[serde(default)]
    pub package_id: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
}

/// Заявка в памяти сервиса, её видит только админка.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: BookingRequest,
    pub status: BookingStatus,
    pub submitted_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn pending(request: BookingRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            status: BookingStatus::Pending,
            submitted_at: Utc::now(),
        }
    }
}

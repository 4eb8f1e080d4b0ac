use tracing::info;

use crate::models::{BookingRecord, BookingRequest};
use crate::store::ContentStore;

impl ContentStore {
    /// Сохранить заявку. Дата и пакет ни с чем не сверяются.
    pub fn record_booking(&self, request: BookingRequest) -> BookingRecord {
        let record = BookingRecord::pending(request);
        self.write().bookings.push(record.clone());
        info!(
            "Booking request {} recorded for {} ({} guests)",
            record.id, record.request.date, record.request.guest_count
        );
        record
    }

    /// Все заявки в порядке поступления.
    pub fn bookings(&self) -> Vec<BookingRecord> {
        self.read().bookings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_bookings_are_appended_in_order() {
        let store = ContentStore::new();
        for (i, name) in ["Amina", "Musa"].iter().enumerate() {
            store.record_booking(BookingRequest {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                phone: "08030000000".to_string(),
                date: NaiveDate::from_ymd_opt(2027, 1, 10 + i as u32).unwrap(),
                guest_count: 100,
                package_id: None,
                notes: String::new(),
            });
        }

        let bookings = store.bookings();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].request.name, "Amina");
        assert_eq!(bookings[1].request.name, "Musa");
        assert!(bookings.iter().all(|b| b.status == BookingStatus::Pending));
        assert_ne!(bookings[0].id, bookings[1].id);
    }
}

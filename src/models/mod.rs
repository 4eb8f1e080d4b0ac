pub mod booking;
pub mod catalog;
pub mod chat;

pub use booking::{BookingRecord, BookingRequest, BookingStatus};
pub use catalog::{GalleryImage, Hall, Package, PackageCategory, Testimonial, VenueInfo};
pub use chat::{BudgetItem, BudgetSeries, ChatTurn, Speaker};

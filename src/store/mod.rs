//! Хранилище контента сайта.
//!
//! Всё живёт в памяти процесса: каталог загружается при старте, админка и форма
//! бронирования только дописывают записи. Ничего не удаляется и не сохраняется на диск.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use crate::models::{BookingRecord, GalleryImage, Hall, Package, Testimonial};

pub mod bookings;
pub mod catalog;
pub mod seed;

#[derive(Default)]
struct Content {
    packages: Vec<Package>,
    halls: Vec<Hall>,
    testimonials: Vec<Testimonial>,
    gallery: Vec<GalleryImage>,
    bookings: Vec<BookingRecord>,
}

/// Общий хэндл на контент. Клоны смотрят в одни и те же данные.
#[derive(Clone, Default)]
pub struct ContentStore {
    inner: Arc<RwLock<Content>>,
}

impl ContentStore {
    /// Пустое хранилище (для тестов).
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с каталогом Mistic Falls.
    pub fn seeded() -> Self {
        let content = Content {
            packages: seed::packages(),
            halls: seed::halls(),
            testimonials: seed::testimonials(),
            gallery: seed::gallery(),
            bookings: Vec::new(),
        };
        info!(
            "Content store loaded: {} packages, {} halls, {} testimonials, {} gallery images",
            content.packages.len(),
            content.halls.len(),
            content.testimonials.len(),
            content.gallery.len()
        );
        Self { inner: Arc::new(RwLock::new(content)) }
    }

    // Запись в Vec не может оставить данные в рваном состоянии, поэтому отравленный лок просто снимаем
    fn read(&self) -> RwLockReadGuard<'_, Content> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Content> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageCategory {
    Wedding,
    Corporate,
    Party,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    /// Цена для витрины, уже отформатированная ("₦2,500,000").
    pub price: String,
    pub description: String,
    pub features: Vec<String>,
    pub image: String,
    pub category: PackageCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hall {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    pub text: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
}

/// Контакты и часы работы для страницы "Contact".
#[derive(Debug, Clone, Serialize)]
pub struct VenueInfo {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub opening_hours: Vec<&'static str>,
    pub max_capacity: u32,
}

// --- Данные, которые добавляет администратор ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPackage {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 40))]
    pub price: String,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[validate(url)]
    pub image: String,
    pub category: PackageCategory,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTestimonial {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(max = 120))]
    #[serde(default)]
    pub role: String,
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
    #[validate(url)]
    pub image: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewGalleryImage {
    #[validate(url)]
    pub url: String,
}

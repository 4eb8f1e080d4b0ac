use tracing::info;

use crate::models::{
    catalog::{NewGalleryImage, NewPackage, NewTestimonial},
    GalleryImage, Hall, Package, PackageCategory, Testimonial, VenueInfo,
};
use crate::store::{seed, ContentStore};

impl ContentStore {
    pub fn venue(&self) -> VenueInfo {
        seed::venue()
    }

    pub fn packages(&self) -> Vec<Package> {
        self.read().packages.clone()
    }

    pub fn packages_by_category(&self, category: PackageCategory) -> Vec<Package> {
        self.read()
            .packages
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    pub fn package(&self, id: &str) -> Option<Package> {
        self.read().packages.iter().find(|p| p.id == id).cloned()
    }

    pub fn halls(&self) -> Vec<Hall> {
        self.read().halls.clone()
    }

    pub fn testimonials(&self) -> Vec<Testimonial> {
        self.read().testimonials.clone()
    }

    pub fn gallery(&self) -> Vec<GalleryImage> {
        self.read().gallery.clone()
    }

    /// Добавить пакет. Id выдаётся по порядку: p1, p2, ...
    pub fn add_package(&self, new: NewPackage) -> Package {
        let mut content = self.write();
        let package = Package {
            id: format!("p{}", content.packages.len() + 1),
            name: new.name,
            price: new.price,
            description: new.description,
            features: new.features,
            image: new.image,
            category: new.category,
        };
        content.packages.push(package.clone());
        info!("Package {} '{}' added", package.id, package.name);
        package
    }

    pub fn add_testimonial(&self, new: NewTestimonial) -> Testimonial {
        let mut content = self.write();
        let testimonial = Testimonial {
            id: format!("t{}", content.testimonials.len() + 1),
            name: new.name,
            role: new.role,
            text: new.text,
            image: new.image,
        };
        content.testimonials.push(testimonial.clone());
        info!("Testimonial {} added", testimonial.id);
        testimonial
    }

    pub fn add_gallery_image(&self, new: NewGalleryImage) -> GalleryImage {
        let image = GalleryImage { url: new.url };
        self.write().gallery.push(image.clone());
        info!("Gallery image added: {}", image.url);
        image
    }
}

// Каталог Mistic Falls, который загружается при старте

use crate::models::{booking::MAX_GUESTS, GalleryImage, Hall, Package, PackageCategory, Testimonial, VenueInfo};

pub const VENUE_NAME: &str = "Mistic Falls";
pub const VENUE_ADDRESS: &str = "5 Sultan Road, Nassarawa, Kano, Nigeria";
pub const VENUE_PHONE: &str = "+234 800 MISTIC 00";
pub const VENUE_EMAIL: &str = "bookings@misticfalls.ng";

pub fn venue() -> VenueInfo {
    VenueInfo {
        name: VENUE_NAME,
        address: VENUE_ADDRESS,
        phone: VENUE_PHONE,
        email: VENUE_EMAIL,
        opening_hours: vec![
            "Monday - Saturday: 9:00 AM - 6:00 PM",
            "Sunday: By Appointment",
        ],
        max_capacity: MAX_GUESTS,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn packages() -> Vec<Package> {
    vec![
        Package {
            id: "p1".to_string(),
            name: "Royal Kano Wedding".to_string(),
            price: "₦2,500,000".to_string(),
            description: "The ultimate luxury experience for your special day. Includes full venue access, bridal suite, and premium decor.".to_string(),
            features: strings(&[
                "Grand Hall Access (1000 guests)",
                "Bridal Changing Suite",
                "Gold & Red Theme Decor",
                "Security Detail",
                "Generator Backup",
            ]),
            image: "https://picsum.photos/800/600?random=1".to_string(),
            category: PackageCategory::Wedding,
        },
        Package {
            id: "p2".to_string(),
            name: "Nassarawa Executive Summit".to_string(),
            price: "₦850,000".to_string(),
            description: "Perfect for AGMs, conferences, and high-level meetings. Professional setting with state-of-the-art AV.".to_string(),
            features: strings(&[
                "Conference Hall (300 guests)",
                "Projector & Sound System",
                "Coffee Break Area",
                "High-Speed WiFi",
                "Valet Parking",
            ]),
            image: "https://picsum.photos/800/600?random=2".to_string(),
            category: PackageCategory::Corporate,
        },
        Package {
            id: "p3".to_string(),
            name: "Mistic Garden Party".to_string(),
            price: "₦450,000".to_string(),
            description: "An enchanting outdoor setup for birthdays, showers, and receptions under the stars.".to_string(),
            features: strings(&[
                "Outdoor Garden Access",
                "String Lighting",
                "Gazebo Setup",
                "Sound System",
                "Cleaning Service",
            ]),
            image: "https://picsum.photos/800/600?random=3".to_string(),
            category: PackageCategory::Party,
        },
        Package {
            id: "p4".to_string(),
            name: "Intimate Nikkah Special".to_string(),
            price: "₦600,000".to_string(),
            description: "A cozy yet elegant package designed for smaller, intimate religious ceremonies.".to_string(),
            features: strings(&[
                "Small Hall Access (200 guests)",
                "Prayer Area Mats",
                "Elegant Stage",
                "Refreshment Stations",
            ]),
            image: "https://picsum.photos/800/600?random=4".to_string(),
            category: PackageCategory::Wedding,
        },
    ]
}

pub fn halls() -> Vec<Hall> {
    vec![
        Hall {
            id: "h1".to_string(),
            name: "Grand Hall".to_string(),
            capacity: 1000,
            description: "Our signature ballroom with a raised stage, climate control and full lighting rig.".to_string(),
            image: "https://picsum.photos/800/600?random=20".to_string(),
        },
        Hall {
            id: "h2".to_string(),
            name: "Conference Hall".to_string(),
            capacity: 300,
            description: "Theatre or boardroom seating with projector and sound system.".to_string(),
            image: "https://picsum.photos/800/600?random=21".to_string(),
        },
        Hall {
            id: "h3".to_string(),
            name: "Small Hall".to_string(),
            capacity: 200,
            description: "An elegant space for Nikkah ceremonies and intimate receptions.".to_string(),
            image: "https://picsum.photos/800/600?random=22".to_string(),
        },
        Hall {
            id: "h4".to_string(),
            name: "Outdoor Garden".to_string(),
            capacity: 400,
            description: "Lawn with gazebo and string lighting for evening parties.".to_string(),
            image: "https://picsum.photos/800/600?random=23".to_string(),
        },
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            id: "t1".to_string(),
            name: "Fatima & Ahmed".to_string(),
            role: "Newlyweds".to_string(),
            text: "Mistic Falls made our dream wedding a reality. The ambiance at Sultan Road is unmatched in Kano!".to_string(),
            image: "https://picsum.photos/100/100?random=5".to_string(),
        },
        Testimonial {
            id: "t2".to_string(),
            name: "CEO, Zenith Tech".to_string(),
            role: "Corporate Client".to_string(),
            text: "Professional, clean, and spacious. The best venue for our end-of-year gala.".to_string(),
            image: "https://picsum.photos/100/100?random=6".to_string(),
        },
    ]
}

pub fn gallery() -> Vec<GalleryImage> {
    (10..=15)
        .map(|n| GalleryImage { url: format!("https://picsum.photos/800/800?random={}", n) })
        .collect()
}

//! # Mock Data Generator
//!
//! Produces realistic-looking products for the simulated backend.
//!
//! ## Generated Products
//! Every category in [`DEFAULT_CATEGORIES`] has its own word list. Each
//! product has:
//! - Unique SKU: `{CAT}-{NNNNN}` (category code + running index)
//! - Name: `{variant} {item}`, e.g. "Pro Wireless Mouse"
//! - Random price: $0.99 - $99.99
//! - Random stock: 0 - 150 (roughly one in ten out of stock)
//! - Random minimum stock: 5 - 30
//! - Last-modified within the past 30 days
//!
//! The shape is fixed; only the values are random. Pass a seeded
//! `StdRng` to get the same products every run.

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Builder;

use stockroom_core::{Product, DEFAULT_CATEGORIES};

const VARIANTS: &[&str] = &[
    "Standard", "Pro", "Mini", "Deluxe", "Classic", "Compact", "Ultra", "Eco",
];

fn items_for(category: &str) -> &'static [&'static str] {
    match category {
        "Electronics" => &[
            "Wireless Mouse",
            "USB-C Hub",
            "Bluetooth Speaker",
            "Mechanical Keyboard",
            "Webcam",
            "Power Bank",
            "Headphones",
            "Monitor Stand",
        ],
        "Books" => &[
            "Cookbook",
            "Atlas",
            "Field Guide",
            "Novel",
            "Dictionary",
            "Sketchbook",
            "Planner",
            "Poetry Collection",
        ],
        "Clothing" => &[
            "T-Shirt",
            "Hoodie",
            "Rain Jacket",
            "Wool Socks",
            "Baseball Cap",
            "Scarf",
            "Denim Jeans",
            "Running Shorts",
        ],
        "Home & Garden" => &[
            "Desk Lamp",
            "Plant Pot",
            "Garden Hose",
            "Throw Pillow",
            "Blender",
            "Watering Can",
            "Cutting Board",
            "Wall Clock",
        ],
        "Sports" => &[
            "Yoga Mat",
            "Dumbbell Set",
            "Tennis Racket",
            "Water Bottle",
            "Jump Rope",
            "Soccer Ball",
            "Bike Helmet",
            "Resistance Band",
        ],
        "Toys" => &[
            "Puzzle",
            "Building Blocks",
            "Board Game",
            "Plush Bear",
            "Kite",
            "Toy Car",
            "Card Game",
            "Model Kit",
        ],
        "Grocery" => &[
            "Coffee Beans",
            "Green Tea",
            "Olive Oil",
            "Pasta",
            "Honey",
            "Granola",
            "Dark Chocolate",
            "Rice",
        ],
        _ => &["Item"],
    }
}

/// Three-letter SKU prefix derived from the category label.
fn category_code(category: &str) -> String {
    let code: String = category
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(3)
        .collect();
    code.to_uppercase()
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Generates `count` products using `rng`.
pub fn generate_products<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Product> {
    let now = Utc::now();

    (0..count)
        .map(|index| {
            let category = pick(rng, DEFAULT_CATEGORIES);
            let name = format!("{} {}", pick(rng, VARIANTS), pick(rng, items_for(category)));
            let sku = format!("{}-{:05}", category_code(category), index + 1);

            let price_cents = rng.gen_range(99..=9999);
            let quantity = if rng.gen_bool(0.1) {
                0
            } else {
                rng.gen_range(1..=150)
            };
            let min_stock = rng.gen_range(5..=30);
            let age = Duration::minutes(rng.gen_range(0..60 * 24 * 30));

            Product {
                id: Builder::from_random_bytes(rng.gen()).into_uuid().to_string(),
                name,
                sku,
                category: category.to_string(),
                price_cents,
                quantity,
                min_stock,
                updated_at: now - age,
            }
        })
        .collect()
}

/// Generates `count` products from a thread-local RNG.
pub fn generate(count: usize) -> Vec<Product> {
    generate_products(count, &mut rand::thread_rng())
}

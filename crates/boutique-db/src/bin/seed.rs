//! # Seed Data Generator
//!
//! Populates the database with demo catalog data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p boutique-db --bin seed
//!
//! # Generate a custom number of products
//! cargo run -p boutique-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p boutique-db --bin seed -- --db ./data/boutique.db
//! ```
//!
//! ## Generated Data
//! Creates the boutique's demo categories and products:
//! - Fragrance (perfumes, body mists)
//! - Skincare (creams, serums)
//! - Makeup (lipsticks, foundations)
//! - Accessories (scarves, bags)
//! - Jewelry (earrings, bracelets)
//!
//! Each product has a selling price above its cost, a varied stock level
//! (some at or below their reorder threshold so the dashboard has low-stock
//! rows to show), and the category name snapshotted onto the row.

use chrono::Utc;
use std::env;
use uuid::Uuid;

use boutique_core::{Category, Money, Product, DEFAULT_MIN_STOCK_LEVEL};
use boutique_db::{Database, DbConfig};

/// Demo catalog: category name, then (product, cost cents, price cents).
const CATALOG: &[(&str, &[(&str, i64, i64)])] = &[
    (
        "Fragrance",
        &[
            ("Rose Perfume 50ml", 250_000, 450_000),
            ("Oud Attar 12ml", 180_000, 380_000),
            ("Jasmine Body Mist", 60_000, 140_000),
            ("Citrus Cologne 100ml", 150_000, 320_000),
            ("Musk Roll-On", 45_000, 110_000),
            ("Amber Essence 30ml", 200_000, 420_000),
        ],
    ),
    (
        "Skincare",
        &[
            ("Vitamin C Serum", 120_000, 260_000),
            ("Night Repair Cream", 180_000, 350_000),
            ("Aloe Face Wash", 40_000, 95_000),
            ("Sunscreen SPF 50", 70_000, 160_000),
            ("Hydrating Toner", 55_000, 130_000),
            ("Clay Face Mask", 65_000, 150_000),
        ],
    ),
    (
        "Makeup",
        &[
            ("Matte Lipstick Crimson", 50_000, 135_000),
            ("Liquid Foundation", 110_000, 240_000),
            ("Waterproof Mascara", 60_000, 145_000),
            ("Eyeshadow Palette", 140_000, 310_000),
            ("Compact Powder", 55_000, 125_000),
            ("Kohl Eyeliner", 25_000, 70_000),
        ],
    ),
    (
        "Accessories",
        &[
            ("Silk Scarf", 90_000, 220_000),
            ("Leather Clutch", 250_000, 550_000),
            ("Embroidered Handbag", 320_000, 690_000),
            ("Pashmina Shawl", 180_000, 400_000),
            ("Hair Clip Set", 20_000, 60_000),
        ],
    ),
    (
        "Jewelry",
        &[
            ("Pearl Earrings", 150_000, 340_000),
            ("Silver Bracelet", 220_000, 480_000),
            ("Gold-Plated Pendant", 280_000, 620_000),
            ("Gemstone Ring", 350_000, 750_000),
            ("Anklet Pair", 80_000, 190_000),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug surfaces the repository-level tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut db_path = String::from("./boutique_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(usize::MAX);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Boutique POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Cap on products to generate (default: full catalog)");
                println!("  -d, --db <PATH>    Database file path (default: ./boutique_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Boutique POS Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate catalog
    println!();
    println!("Generating catalog...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    for (category_name, products) in CATALOG {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: category_name.to_string(),
            created_at: Utc::now(),
        };
        db.categories().insert(&category).await?;
        println!("  Category: {}", category.name);

        for (idx, (name, cost_cents, price_cents)) in products.iter().enumerate() {
            if generated >= count {
                break;
            }

            let product = generate_product(&category, name, *cost_cents, *price_cents, idx);

            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.name, e);
                continue;
            }

            generated += 1;
        }

        if generated >= count {
            break;
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    let low_stock = db.reports().low_stock_count().await?;
    println!("  {} products start at or below their reorder threshold", low_stock);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product under the given category.
fn generate_product(
    category: &Category,
    name: &str,
    cost_cents: i64,
    price_cents: i64,
    idx: usize,
) -> Product {
    let now = Utc::now();

    // Varied stock: every third product lands at or below the threshold
    let stock_quantity = match idx % 3 {
        0 => (idx as i64 % DEFAULT_MIN_STOCK_LEVEL) + 1,
        1 => 12 + idx as i64 * 2,
        _ => 25 + idx as i64,
    };

    Product {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        category_id: Some(category.id.clone()),
        category_name: category.name.clone(),
        cost_cents: Money::from_cents(cost_cents),
        price_cents: Money::from_cents(price_cents),
        stock_quantity,
        min_stock_level: DEFAULT_MIN_STOCK_LEVEL,
        created_at: now,
        updated_at: now,
    }
}

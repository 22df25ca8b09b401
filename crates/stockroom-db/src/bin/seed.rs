//! # Seed Data Generator
//!
//! Populates the database with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default)
//! cargo run -p stockroom-db --bin stockroom-seed
//!
//! # Generate custom amount
//! cargo run -p stockroom-db --bin stockroom-seed -- --count 200
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin stockroom-seed -- --db ./data/stockroom.db
//! ```
//!
//! Every product goes through the access gateway, so seeded rows obey the
//! same field rules as anything entered by hand. Output is deterministic
//! for a given count.

use std::env;

use stockroom_core::{ProductValues, Router};
use stockroom_db::{Database, DbConfig};

/// Sample items with their base price in the smallest currency unit.
const ITEMS: &[(&str, i64)] = &[
    ("Hex Bolt", 35),
    ("Wood Screw", 12),
    ("Wall Anchor", 20),
    ("Hinge", 450),
    ("Door Handle", 1299),
    ("Padlock", 899),
    ("Tape Measure", 749),
    ("Claw Hammer", 1599),
    ("Utility Knife", 525),
    ("Masking Tape", 310),
];

/// Suppliers with phone numbers that keep their formatting.
const SUPPLIERS: &[(&str, &str)] = &[
    ("Acme Hardware", "0047 1234 567"),
    ("Northwind Tools", "+44 20 7946 0958"),
    ("Baltic Fasteners", "00371 6712 3456"),
    ("Harbor Supply Co.", "(555) 010-2030"),
];

/// Size variants with their price addon.
const SIZES: &[(&str, i64)] = &[("S", 0), ("M", 15), ("L", 40), ("XL", 90), ("Bulk", 400)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./stockroom_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
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
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: stockroom-seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let gateway = db.gateway(Router::standard());

    println!("✓ Connected to database");

    let existing = gateway.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let values = sample_product(seed);
        match gateway.insert("/products", &values).await {
            Ok(Some(_)) => generated += 1,
            Ok(None) => eprintln!("Failed to insert product #{}", seed),
            Err(e) => eprintln!("Rejected product #{}: {}", seed, e),
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    let out_of_stock = gateway
        .list_products()
        .await?
        .iter()
        .filter(|p| !p.in_stock())
        .count();
    println!("  Out of stock: {}", out_of_stock);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one product deterministically from its index.
fn sample_product(seed: usize) -> ProductValues {
    let (item, base_price) = ITEMS[seed % ITEMS.len()];
    let (size, addon) = SIZES[(seed / ITEMS.len()) % SIZES.len()];
    let (supplier, phone) = SUPPLIERS[seed % SUPPLIERS.len()];

    // Every 7th product starts out of stock
    let quantity = if seed % 7 == 0 { 0 } else { (seed * 13 % 120) as i64 };

    ProductValues::new()
        .name(format!("{} {}", item, size))
        .price(base_price + addon)
        .quantity(quantity)
        .supplier_name(supplier)
        .supplier_phone(phone)
}

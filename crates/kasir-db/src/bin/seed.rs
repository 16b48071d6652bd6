//! # Seed Data Generator
//!
//! Populates the database with categories and products for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir.db
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! Skips seeding when the catalogue already has products.

use std::env;

use kasir_core::{CategoryInput, ProductInput};
use kasir_db::{Database, DbConfig};

/// Categories with their products as (name, price, stock).
const CATALOGUE: &[(&str, &str, &[(&str, i64, i64)])] = &[
    (
        "Makanan",
        "Mi instan dan bumbu dapur",
        &[
            ("Indomie Goreng", 3_500, 40),
            ("Indomie Soto", 3_500, 30),
            ("Kecap Manis", 10_000, 8),
            ("Masako Ayam", 2_500, 20),
        ],
    ),
    (
        "Minuman",
        "Minuman dingin dan kopi",
        &[
            ("Mizone", 5_500, 12),
            ("Teh Botol", 5_000, 24),
            ("Kopi Susu", 18_000, 15),
            ("Air Mineral 600ml", 4_000, 48),
        ],
    ),
    (
        "Makanan Ringan",
        "Keripik dan biskuit",
        &[
            ("Chitato", 11_000, 10),
            ("Roti Tawar", 15_000, 6),
            ("Biskuat", 2_000, 36),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kasir.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Kasir POS Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        db.close().await;
        return Ok(());
    }

    let mut generated = 0;
    for (category_name, description, products) in CATALOGUE {
        let category = db
            .categories()
            .create(&CategoryInput {
                name: category_name.to_string(),
                description: Some(description.to_string()),
            })
            .await?;

        for (name, price, stock) in products.iter() {
            let input = ProductInput {
                name: name.to_string(),
                price: *price,
                stock: *stock,
                category_id: Some(category.id),
            };

            if let Err(e) = db.products().create(&input).await {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }
            generated += 1;
        }

        println!("  {} ({} products)", category.name, products.len());
    }

    println!();
    println!("✓ Seeded {} categories, {} products", CATALOGUE.len(), generated);

    db.close().await;
    Ok(())
}

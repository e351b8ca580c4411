//! # Seed Data Generator
//!
//! Populates the database with sample customers and menu items for
//! development, so orders have something to reference.
//!
//! ## Usage
//! ```bash
//! cargo run -p foodhub-db --bin seed
//!
//! # Specify database path
//! cargo run -p foodhub-db --bin seed -- --db ./data/foodhub.db
//! ```

use std::env;

use foodhub_core::Money;
use foodhub_db::{Database, DbConfig, NewCustomer, NewMenuItem};

/// (name, mobile, email, address)
const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("Sherlock Holmes", "555-0221", "sherlock@example.com", "221B Baker St"),
    ("John Watson", "555-0222", "watson@example.com", "221B Baker St"),
    ("Martha Hudson", "555-0223", "hudson@example.com", "221A Baker St"),
    ("Irene Adler", "555-0224", "irene@example.com", "Briony Lodge, St John's Wood"),
];

/// (category, name, price in cents, description)
const MENU: &[(&str, &str, i64, &str)] = &[
    ("Pizza", "Margherita", 950, "Tomato, mozzarella, basil"),
    ("Pizza", "Pepperoni", 1150, "Tomato, mozzarella, pepperoni"),
    ("Pizza", "Quattro Formaggi", 1295, "Four cheeses"),
    ("Burgers", "Classic Burger", 1050, "Beef patty, cheddar, pickles"),
    ("Burgers", "Veggie Burger", 995, "Black bean patty, avocado"),
    ("Noodles", "Pad Thai", 1250, "Rice noodles, tamarind, peanuts"),
    ("Noodles", "Ramen", 1375, "Pork broth, chashu, egg"),
    ("Sides", "Fries", 395, "Skin-on, sea salt"),
    ("Sides", "Garden Salad", 550, "Mixed leaves, vinaigrette"),
    ("Drinks", "Lemonade", 300, "Fresh squeezed"),
    ("Drinks", "Iced Tea", 275, "Unsweetened"),
    ("Desserts", "Tiramisu", 650, "Mascarpone, espresso"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("FOODHUB_DB_PATH").unwrap_or_else(|_| "foodhub.db".to_string());

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--db" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("FoodHub Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $FOODHUB_DB_PATH or ./foodhub.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 FoodHub Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let catalog = db.catalog();

    let existing = catalog.count_menu_items().await?;
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    println!();
    println!("Creating customers...");
    for (name, mobile, email, address) in CUSTOMERS {
        let id = catalog
            .insert_customer(&NewCustomer::new(*name, *mobile).email(*email).address(*address))
            .await?;
        println!("  #{:<3} {}", id, name);
    }

    println!();
    println!("Creating menu items...");
    for (category, name, price_cents, description) in MENU {
        let id = catalog
            .insert_menu_item(&NewMenuItem::new(*name, *price_cents, *category).description(*description))
            .await?;
        println!(
            "  #{:<3} {:<18} {:>7}  ({})",
            id,
            name,
            Money::from_cents(*price_cents).to_string(),
            category
        );
    }

    println!();
    println!(
        "✓ Seed complete! {} customers, {} menu items",
        CUSTOMERS.len(),
        MENU.len()
    );

    db.close().await;
    Ok(())
}

//! # Seed Data Generator
//!
//! Populates the database with a small restaurant for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p resto-db --bin seed
//!
//! # Specify database path
//! cargo run -p resto-db --bin seed -- --db ./data/resto.db
//! ```
//!
//! ## Generated Data
//! - One outlet: 10% tax, 5% service charge
//! - Pantry ingredients with starting stock
//! - Menu categories with dishes and their recipes
//! - A floor of dining tables and a small crew with development PINs
//!
//! Recipe lines marked removable can be excluded when ordering
//! (e.g. "no egg").

use resto_core::{
    NewCategory, NewDiningTable, NewIngredient, NewMenuItem, NewOutlet, NewRecipeLine, NewStaff,
    TableStatus,
};
use resto_db::{Database, DbConfig};
use std::collections::HashMap;
use std::env;

/// Pantry: (name, unit, starting stock, allergen)
const INGREDIENTS: &[(&str, &str, f64, bool)] = &[
    ("Rice", "kg", 25.0, false),
    ("Egg", "pcs", 120.0, true),
    ("Chicken", "kg", 15.0, false),
    ("Noodles", "kg", 12.0, true),
    ("Shrimp", "kg", 6.0, true),
    ("Chili", "kg", 2.0, false),
    ("Scallion", "kg", 1.5, false),
    ("Peanut", "kg", 3.0, true),
    ("Coconut Milk", "l", 10.0, false),
    ("Tea Leaves", "kg", 1.0, false),
    ("Lime", "pcs", 80.0, false),
    ("Sugar", "kg", 8.0, false),
];

/// Floor plan: (table number, seats, location)
const TABLES: &[(&str, i64, &str)] = &[
    ("A1", 2, "indoor"),
    ("A2", 2, "indoor"),
    ("A3", 4, "indoor"),
    ("A4", 4, "indoor"),
    ("B1", 6, "indoor"),
    ("T1", 4, "terrace"),
    ("T2", 4, "terrace"),
    ("T3", 8, "terrace"),
];

/// Crew: (name, role, PIN)
const STAFF: &[(&str, &str, &str)] = &[
    ("Budi", "waiter", "1111"),
    ("Sari", "waiter", "2222"),
    ("Rina", "cashier", "3333"),
    ("Agus", "manager", "9999"),
];

/// A recipe line: (ingredient, qty per serving, removable)
type Line = (&'static str, f64, bool);

/// Menu: (category, [(sku, name, price cents, cost cents, prep minutes, recipe)])
const MENU: &[(&str, &[(&str, &str, i64, i64, i64, &[Line])])] = &[
    (
        "Mains",
        &[
            (
                "MAIN-FRICE",
                "Fried Rice",
                1000,
                380,
                12,
                &[("Rice", 0.2, false), ("Egg", 1.0, true), ("Scallion", 0.01, true)],
            ),
            (
                "MAIN-CHKSATAY",
                "Chicken Satay",
                1450,
                600,
                18,
                &[("Chicken", 0.25, false), ("Peanut", 0.05, true)],
            ),
            (
                "MAIN-LAKSA",
                "Prawn Laksa",
                1600,
                720,
                20,
                &[
                    ("Noodles", 0.15, false),
                    ("Shrimp", 0.12, false),
                    ("Coconut Milk", 0.3, false),
                    ("Chili", 0.02, true),
                    ("Egg", 0.5, true),
                ],
            ),
            (
                "MAIN-MEEGORENG",
                "Mee Goreng",
                1150,
                420,
                14,
                &[
                    ("Noodles", 0.18, false),
                    ("Egg", 1.0, true),
                    ("Chili", 0.01, true),
                ],
            ),
        ],
    ),
    (
        "Drinks",
        &[
            (
                "DRK-TEHTARIK",
                "Teh Tarik",
                450,
                90,
                3,
                &[("Tea Leaves", 0.01, false), ("Sugar", 0.02, true)],
            ),
            (
                "DRK-LIMEJUICE",
                "Lime Juice",
                500,
                120,
                3,
                &[("Lime", 2.0, false), ("Sugar", 0.03, true)],
            ),
        ],
    ),
    (
        "Desserts",
        &[(
            "DES-SAGO",
            "Sago Coconut",
            650,
            210,
            5,
            &[("Coconut Milk", 0.15, false), ("Sugar", 0.04, true)],
        )],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./data/resto.db");

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
                println!("Resto POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./data/resto.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Resto POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing data
    let existing = db.catalog().list_menu_items(false).await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    let outlet = db
        .outlets()
        .create(&NewOutlet {
            name: "Main Dining Hall".to_string(),
            location: Some("Ground Floor".to_string()),
            tax_rate_bps: 1000,
            service_charge_bps: 500,
        })
        .await?;
    println!("✓ Outlet '{}' (id {})", outlet.name, outlet.id);

    for (number, capacity, location) in TABLES {
        db.tables()
            .create(&NewDiningTable {
                outlet_id: outlet.id,
                table_number: number.to_string(),
                capacity: *capacity,
                location_type: Some(location.to_string()),
                status: TableStatus::Available,
            })
            .await?;
    }
    println!("✓ {} tables", TABLES.len());

    for (name, role, pin) in STAFF {
        db.staff()
            .create(&NewStaff {
                name: name.to_string(),
                role: role.to_string(),
                pin_code: pin.to_string(),
                is_active: true,
            })
            .await?;
    }
    println!("✓ {} staff members", STAFF.len());

    let mut pantry = HashMap::new();
    for (name, unit, quantity, is_allergen) in INGREDIENTS {
        let ingredient = db
            .ingredients()
            .create(&NewIngredient {
                name: name.to_string(),
                quantity: *quantity,
                unit: unit.to_string(),
                is_allergen: *is_allergen,
                description: None,
            })
            .await?;
        pantry.insert(*name, ingredient.id);
    }
    println!("✓ {} ingredients stocked", pantry.len());

    let mut dishes = 0;
    let mut lines = 0;
    for (category_name, items) in MENU {
        let category = db
            .catalog()
            .create_category(&NewCategory {
                name: category_name.to_string(),
            })
            .await?;

        for (sku, name, price_cents, cost_cents, prep, recipe) in items.iter() {
            let item = db
                .catalog()
                .create_menu_item(&NewMenuItem {
                    category_id: category.id,
                    sku: sku.to_string(),
                    name: name.to_string(),
                    description: None,
                    price_cents: *price_cents,
                    cost_cents: *cost_cents,
                    preparation_time_minutes: *prep,
                    tags: vec![category_name.to_lowercase()],
                    is_active: None,
                })
                .await?;
            dishes += 1;

            for (ingredient, qty_per_unit, is_removable) in recipe.iter() {
                let Some(ingredient_id) = pantry.get(ingredient) else {
                    eprintln!("Unknown ingredient {} in {}", ingredient, sku);
                    continue;
                };

                db.catalog()
                    .add_recipe_line(&NewRecipeLine {
                        menu_item_id: item.id,
                        ingredient_id: *ingredient_id,
                        qty_per_unit: *qty_per_unit,
                        is_removable: *is_removable,
                        is_default: true,
                    })
                    .await?;
                lines += 1;
            }
        }
    }

    let elapsed = start.elapsed();
    println!("✓ {} menu items with {} recipe lines", dishes, lines);
    println!();
    println!("✓ Seed complete in {:?}!", elapsed);

    db.close().await;
    Ok(())
}

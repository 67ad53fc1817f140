//! Database seeder for SalesLens development and testing.
//!
//! Seeds categories, product batches, employees, customers and two weeks of
//! sales for local development, then prints an admin token for the API.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use saleslens_db::entities::{categories, customers, employees, products, sale_items, sales};
use saleslens_shared::{AppConfig, JwtService, Role};

/// Marker category; its presence means the database is already seeded.
const BEVERAGES_ID: &str = "00000000-0000-0000-0000-0000000000c1";
const GROCERY_ID: &str = "00000000-0000-0000-0000-0000000000c2";

/// Number of days of sales history to generate.
const SALES_DAYS: i64 = 14;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = saleslens_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    if categories::Entity::find_by_id(fixed_id(BEVERAGES_ID))
        .one(&db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("Database already seeded, skipping...");
    } else {
        println!("Seeding categories...");
        seed_categories(&db).await;

        println!("Seeding products...");
        let products = seed_products(&db).await;

        println!("Seeding employees and customers...");
        let employees = seed_employees(&db, &["Nimal", "Kasun", "Ayesha"]).await;
        let customers =
            seed_customers(&db, &["Walk-in Regular", "Hotel Lanka", "Sunrise Cafe"]).await;

        println!("Seeding sales...");
        seed_sales(&db, &products, &employees, &customers).await;

        println!("Seeding complete!");
    }

    print_admin_token();
}

fn fixed_id(id: &str) -> Uuid {
    Uuid::parse_str(id).unwrap()
}

async fn seed_categories(db: &DatabaseConnection) {
    for (id, name) in [(BEVERAGES_ID, "Beverages"), (GROCERY_ID, "Grocery")] {
        let category = categories::ActiveModel {
            id: Set(fixed_id(id)),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
        };
        if let Err(e) = category.insert(db).await {
            eprintln!("Failed to insert category {name}: {e}");
        } else {
            println!("  Created category: {name}");
        }
    }
}

/// A seeded product batch with its unit price for generated sales.
struct SeededProduct {
    id: Uuid,
    unit_price: Decimal,
    unit_cost: Decimal,
}

/// Seeds two batches per product code; the newer batch is the one on sale.
async fn seed_products(db: &DatabaseConnection) -> Vec<SeededProduct> {
    let catalog = [
        ("TEA-250", "Ceylon Tea 250g", Some(BEVERAGES_ID), 450, 300),
        ("COF-200", "Instant Coffee 200g", Some(BEVERAGES_ID), 1200, 850),
        ("RIC-5KG", "Samba Rice 5kg", Some(GROCERY_ID), 1650, 1300),
        ("SUG-1KG", "White Sugar 1kg", Some(GROCERY_ID), 280, 220),
        ("BAG-REU", "Reusable Bag", None, 150, 60),
    ];

    let today = Utc::now().date_naive();
    let mut seeded = Vec::new();

    for (code, name, category, price, cost) in catalog {
        for (batch, age_days, total, stock) in [(1, 90, 200, 0), (2, 30, 150, 90)] {
            let id = Uuid::now_v7();
            let purchased = today - Duration::days(age_days);
            let product = products::ActiveModel {
                id: Set(id),
                category_id: Set(category.map(fixed_id)),
                name: Set(name.to_string()),
                code: Set(code.to_string()),
                batch_no: Set(Some(format!("{code}-B{batch}"))),
                total_quantity: Set(Decimal::from(total)),
                stock_quantity: Set(Decimal::from(stock)),
                purchase_date: Set(Some(purchased)),
                expire_date: Set(expiry(purchased)),
                created_at: Set((Utc::now() - Duration::days(age_days)).into()),
            };

            if let Err(e) = product.insert(db).await {
                eprintln!("Failed to insert product {code}: {e}");
                continue;
            }

            if batch == 2 {
                seeded.push(SeededProduct {
                    id,
                    unit_price: Decimal::from(price),
                    unit_cost: Decimal::from(cost),
                });
            }
        }
        println!("  Created product: {code}");
    }

    seeded
}

fn expiry(purchased: NaiveDate) -> Option<NaiveDate> {
    purchased.checked_add_signed(Duration::days(365))
}

async fn seed_employees(db: &DatabaseConnection, names: &[&str]) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for name in names {
        let id = Uuid::now_v7();
        let employee = employees::ActiveModel {
            id: Set(id),
            name: Set((*name).to_string()),
            created_at: Set(Utc::now().into()),
        };
        if let Err(e) = employee.insert(db).await {
            eprintln!("Failed to insert employee {name}: {e}");
        } else {
            println!("  Created employee: {name}");
            ids.push(id);
        }
    }
    ids
}

async fn seed_customers(db: &DatabaseConnection, names: &[&str]) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for name in names {
        let id = Uuid::now_v7();
        let customer = customers::ActiveModel {
            id: Set(id),
            name: Set((*name).to_string()),
            created_at: Set(Utc::now().into()),
        };
        if let Err(e) = customer.insert(db).await {
            eprintln!("Failed to insert customer {name}: {e}");
        } else {
            println!("  Created customer: {name}");
            ids.push(id);
        }
    }
    ids
}

/// Generates a few sales per day, rotating products, staff and payment methods.
async fn seed_sales(
    db: &DatabaseConnection,
    products: &[SeededProduct],
    employees: &[Uuid],
    customers: &[Uuid],
) {
    if products.is_empty() || employees.is_empty() {
        eprintln!("Nothing to sell, skipping sales");
        return;
    }

    let payment_methods = ["cash", "card", "bank_transfer"];
    let mut inserted = 0;

    for day in 0..SALES_DAYS {
        let day_start = Utc::now() - Duration::days(day);
        for slot in 0..3_usize {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let seq = (day as usize) * 3 + slot;
            let first = &products[seq % products.len()];
            let second = &products[(seq + 2) % products.len()];
            let first_qty = Decimal::from(1 + seq % 4);
            let second_qty = Decimal::ONE;

            let gross = first.unit_price * first_qty + second.unit_price * second_qty;
            let cost = first.unit_cost * first_qty + second.unit_cost * second_qty;
            let (custom_discount, custom_type) = match seq % 5 {
                0 => (Decimal::from(5), "percent"),
                1 => (Decimal::from(50), "fixed"),
                _ => (Decimal::ZERO, "fixed"),
            };

            let sale_id = Uuid::now_v7();
            #[allow(clippy::cast_possible_wrap)]
            let created_at = day_start - Duration::hours(slot as i64 * 3);
            let sale = sales::ActiveModel {
                id: Set(sale_id),
                employee_id: Set(Some(employees[seq % employees.len()])),
                customer_id: Set(customers.get(seq % (customers.len() + 1)).copied()),
                total_amount: Set(Some(gross)),
                total_cost: Set(Some(cost)),
                discount: Set(Some(product_discount(seq))),
                custom_discount: Set(Some(custom_discount)),
                custom_discount_type: Set(Some(custom_type.to_string())),
                payment_method: Set(Some(
                    payment_methods[seq % payment_methods.len()].to_string(),
                )),
                created_at: Set(created_at.into()),
            };

            if let Err(e) = sale.insert(db).await {
                eprintln!("Failed to insert sale: {e}");
                continue;
            }

            for (product, quantity) in [(first, first_qty), (second, second_qty)] {
                let item = sale_items::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    sale_id: Set(sale_id),
                    product_id: Set(product.id),
                    quantity: Set(quantity),
                    total_price: Set(product.unit_price * quantity),
                };
                if let Err(e) = item.insert(db).await {
                    eprintln!("Failed to insert sale item: {e}");
                }
            }
            inserted += 1;
        }
    }

    println!("  Created {inserted} sales over {SALES_DAYS} days");
}

fn product_discount(seq: usize) -> Decimal {
    if seq % 4 == 0 {
        Decimal::from(20)
    } else {
        Decimal::ZERO
    }
}

/// Prints an admin access token when JWT settings are available.
fn print_admin_token() {
    let Ok(config) = AppConfig::load() else {
        println!("No configuration found; skipping admin token");
        return;
    };

    let jwt = JwtService::new(config.jwt.jwt_config());

    match jwt.generate_access_token(Uuid::now_v7(), Role::Admin.as_str()) {
        Ok(token) => println!("Admin token: {token}"),
        Err(e) => eprintln!("Failed to generate admin token: {e}"),
    }
}

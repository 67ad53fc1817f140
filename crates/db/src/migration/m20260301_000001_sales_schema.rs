//! Sales schema migration.
//!
//! Creates categories, products, employees, customers, sales and sale items
//! together with the indexes the report queries rely on.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SALES_SCHEMA_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP TABLE IF EXISTS sale_items CASCADE;
DROP TABLE IF EXISTS sales CASCADE;
DROP TABLE IF EXISTS customers CASCADE;
DROP TABLE IF EXISTS employees CASCADE;
DROP TABLE IF EXISTS products CASCADE;
DROP TABLE IF EXISTS categories CASCADE;
",
        )
        .await?;
        Ok(())
    }
}

const SALES_SCHEMA_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- One row per stocked batch; batches of a product share its code
CREATE TABLE products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category_id UUID REFERENCES categories(id) ON DELETE SET NULL,
    name VARCHAR(255) NOT NULL,
    code VARCHAR(100) NOT NULL,
    batch_no VARCHAR(100),
    total_quantity NUMERIC(19, 4) NOT NULL DEFAULT 0,
    stock_quantity NUMERIC(19, 4) NOT NULL DEFAULT 0,
    purchase_date DATE,
    expire_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE employees (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE customers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE sales (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID REFERENCES employees(id) ON DELETE SET NULL,
    customer_id UUID REFERENCES customers(id) ON DELETE SET NULL,
    total_amount NUMERIC(19, 4),
    total_cost NUMERIC(19, 4),
    discount NUMERIC(19, 4),
    custom_discount NUMERIC(19, 4),
    custom_discount_type VARCHAR(20),
    payment_method VARCHAR(50),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- product_id is unconstrained: line items outlive removed batches
CREATE TABLE sale_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    sale_id UUID NOT NULL REFERENCES sales(id) ON DELETE CASCADE,
    product_id UUID NOT NULL,
    quantity NUMERIC(19, 4) NOT NULL,
    total_price NUMERIC(19, 4) NOT NULL DEFAULT 0
);

-- Report window scans
CREATE INDEX idx_sales_created_at ON sales(created_at DESC);

-- Distinct customer counts per window
CREATE INDEX idx_sales_customer ON sales(customer_id) WHERE customer_id IS NOT NULL;

-- Line items per sale and per product
CREATE INDEX idx_sale_items_sale ON sale_items(sale_id);
CREATE INDEX idx_sale_items_product ON sale_items(product_id);

-- Product-code lookup, newest batch first
CREATE INDEX idx_products_code ON products(code, created_at DESC);
";

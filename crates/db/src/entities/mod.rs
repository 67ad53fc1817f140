//! `SeaORM` entities for the sales schema.

pub mod prelude;

pub mod categories;
pub mod customers;
pub mod employees;
pub mod products;
pub mod sale_items;
pub mod sales;

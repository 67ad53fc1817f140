//! Core business logic for SalesLens.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, window resolution and aggregation rules live here.
//!
//! # Modules
//!
//! - `reports` - Sales analytics report and product-code lookup

pub mod reports;

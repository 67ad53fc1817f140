//! Sales report generation.
//!
//! This module provides pure business logic for the sales analytics report:
//! - Report window resolution
//! - Product and sale selection over a record store
//! - Category, payment method and employee aggregation
//! - Summary statistics
//! - Product-code batch lookup

pub mod aggregate;
pub mod error;
pub mod memory;
pub mod range;
pub mod service;
pub mod store;
pub mod types;


pub use aggregate::{
    aggregate_by_category, aggregate_by_employee, aggregate_by_payment_method,
    attach_sold_quantities, compute_summary, summarize_batches,
};
pub use error::ReportError;
pub use memory::InMemoryRecordStore;
pub use range::{Interval, RangeResolver};
pub use service::SalesReportService;
pub use store::SalesRecordStore;
pub use types::*;

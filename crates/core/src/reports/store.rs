//! Record store abstraction for report inputs.

use std::collections::HashMap;
use std::future::Future;

use rust_decimal::Decimal;
use saleslens_shared::types::ProductId;

use super::error::ReportError;
use super::range::Interval;
use super::types::{Product, Sale};

/// Read-only access to sale and product records.
///
/// This trait is implemented by the db crate to provide actual database
/// operations. Every window-filtered query applies the [`Interval`] to the
/// sale's creation timestamp; line items inherit their sale's membership.
pub trait SalesRecordStore: Send + Sync {
    /// Sales created inside `interval`, newest first, fully hydrated.
    fn sales_in(
        &self,
        interval: &Interval,
    ) -> impl Future<Output = Result<Vec<Sale>, ReportError>> + Send;

    /// Every product, newest first.
    fn all_products(&self) -> impl Future<Output = Result<Vec<Product>, ReportError>> + Send;

    /// Distinct products appearing on a line item of an in-window sale, newest first.
    fn products_sold_in(
        &self,
        interval: &Interval,
    ) -> impl Future<Output = Result<Vec<Product>, ReportError>> + Send;

    /// Sum of line-item quantity per product over in-window sales.
    fn sold_quantities(
        &self,
        interval: &Interval,
    ) -> impl Future<Output = Result<HashMap<ProductId, Decimal>, ReportError>> + Send;

    /// Number of distinct non-null customers over in-window sales.
    fn count_distinct_customers(
        &self,
        interval: &Interval,
    ) -> impl Future<Output = Result<u64, ReportError>> + Send;

    /// Product batches with exactly this code, newest first.
    fn products_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Vec<Product>, ReportError>> + Send;
}

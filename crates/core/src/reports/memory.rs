//! In-memory record store.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use saleslens_shared::types::ProductId;

use super::error::ReportError;
use super::range::Interval;
use super::store::SalesRecordStore;
use super::types::{Product, Sale};

/// Record store over owned vectors of products and sales.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    products: Vec<Product>,
    sales: Vec<Sale>,
}

impl InMemoryRecordStore {
    /// Creates a store from already-hydrated records.
    #[must_use]
    pub const fn new(products: Vec<Product>, sales: Vec<Sale>) -> Self {
        Self { products, sales }
    }

    fn sales_within<'a>(&'a self, interval: &'a Interval) -> impl Iterator<Item = &'a Sale> {
        self.sales
            .iter()
            .filter(move |sale| interval.contains(sale.created_at))
    }

    fn newest_first(mut products: Vec<Product>) -> Vec<Product> {
        products.sort_by_key(|p| Reverse(p.created_at));
        products
    }
}

impl SalesRecordStore for InMemoryRecordStore {
    async fn sales_in(&self, interval: &Interval) -> Result<Vec<Sale>, ReportError> {
        let mut sales: Vec<Sale> = self.sales_within(interval).cloned().collect();
        sales.sort_by_key(|s| Reverse(s.created_at));
        Ok(sales)
    }

    async fn all_products(&self) -> Result<Vec<Product>, ReportError> {
        Ok(Self::newest_first(self.products.clone()))
    }

    async fn products_sold_in(&self, interval: &Interval) -> Result<Vec<Product>, ReportError> {
        let sold: HashSet<ProductId> = self
            .sales_within(interval)
            .flat_map(|sale| sale.items.iter().map(|item| item.product_id))
            .collect();

        Ok(Self::newest_first(
            self.products
                .iter()
                .filter(|p| sold.contains(&p.id))
                .cloned()
                .collect(),
        ))
    }

    async fn sold_quantities(
        &self,
        interval: &Interval,
    ) -> Result<HashMap<ProductId, Decimal>, ReportError> {
        let mut quantities = HashMap::new();
        for item in self.sales_within(interval).flat_map(|sale| &sale.items) {
            *quantities.entry(item.product_id).or_insert(Decimal::ZERO) += item.quantity;
        }
        Ok(quantities)
    }

    async fn count_distinct_customers(&self, interval: &Interval) -> Result<u64, ReportError> {
        let customers: HashSet<_> = self
            .sales_within(interval)
            .filter_map(|sale| sale.customer.as_ref().map(|c| c.id))
            .collect();
        Ok(u64::try_from(customers.len()).unwrap_or(u64::MAX))
    }

    async fn products_by_code(&self, code: &str) -> Result<Vec<Product>, ReportError> {
        Ok(Self::newest_first(
            self.products
                .iter()
                .filter(|p| p.code == code)
                .cloned()
                .collect(),
        ))
    }
}

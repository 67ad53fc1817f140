//! Sales report generation service.

use std::sync::Arc;

use super::aggregate::{
    aggregate_by_category, aggregate_by_employee, aggregate_by_payment_method,
    attach_sold_quantities, compute_summary, round_values, summarize_batches,
};
use super::error::ReportError;
use super::range::{Interval, RangeResolver};
use super::store::SalesRecordStore;
use super::types::{
    CodeLookupResult, EmployeeSalesSummary, Product, ProductWithSales, ReportRequest, Sale,
    SalesReport,
};
use saleslens_shared::types::round_money;

/// Service for building sales reports from a record store.
pub struct SalesReportService<S: SalesRecordStore> {
    store: Arc<S>,
    resolver: RangeResolver,
}

impl<S: SalesRecordStore> SalesReportService<S> {
    /// Create a new sales report service.
    #[must_use]
    pub fn new(store: Arc<S>, resolver: RangeResolver) -> Self {
        Self { store, resolver }
    }

    /// Builds the full sales report for a request.
    ///
    /// The window is resolved first so an invalid date fails before any
    /// record is read. The four independent reads then run concurrently and
    /// any failure aborts the build.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDate` for unparseable dates and
    /// `ReportError::Repository` if a read fails.
    pub async fn build_report(&self, request: &ReportRequest) -> Result<SalesReport, ReportError> {
        let interval = self
            .resolver
            .resolve(request.start_date.as_deref(), request.end_date.as_deref())?;

        let (products, sales, total_customers) = tokio::try_join!(
            self.select_products(&interval),
            self.select_sales(&interval),
            self.store.count_distinct_customers(&interval),
        )?;

        let category_sales = round_values(aggregate_by_category(&sales));
        let payment_method_totals = round_values(aggregate_by_payment_method(&sales));
        let employee_sales_summary = aggregate_by_employee(&sales)
            .into_iter()
            .map(|(name, entry)| {
                let rounded = EmployeeSalesSummary {
                    total_net_sales: round_money(entry.total_net_sales),
                    ..entry
                };
                (name, rounded)
            })
            .collect();
        let summary = compute_summary(&sales, total_customers).rounded();

        Ok(SalesReport {
            products,
            sales,
            total_sale_amount: summary.total_sale_amount,
            total_discount: summary.total_product_discount,
            total_custom_discount: summary.total_custom_discount,
            net_profit: summary.net_profit,
            total_transactions: summary.total_transactions,
            average_transaction_value: summary.average_transaction_value,
            total_customers: summary.total_distinct_customers,
            start_date: request.start_date.clone(),
            end_date: request.end_date.clone(),
            category_sales,
            employee_sales_summary,
            payment_method_totals,
        })
    }

    /// Sales inside the window, newest first, with items, employee and customer.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Repository` if the read fails.
    pub async fn select_sales(&self, interval: &Interval) -> Result<Vec<Sale>, ReportError> {
        self.store.sales_in(interval).await
    }

    /// Products for the report with their sold quantity attached.
    ///
    /// Without a window every product is listed. With a window only products
    /// sold inside it are listed.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Repository` if a read fails.
    pub async fn select_products(
        &self,
        interval: &Interval,
    ) -> Result<Vec<ProductWithSales>, ReportError> {
        let (products, quantities) = tokio::try_join!(
            self.product_records(interval),
            self.store.sold_quantities(interval),
        )?;

        Ok(attach_sold_quantities(products, &quantities))
    }

    /// Looks up every batch of a product code.
    ///
    /// An absent or empty code yields an empty result without touching the store.
    /// Any other string, `"0"` included, is matched exactly.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Repository` if the read fails.
    pub async fn lookup_by_code(&self, code: Option<&str>) -> Result<CodeLookupResult, ReportError> {
        let Some(code) = code.filter(|c| !c.is_empty()) else {
            return Ok(CodeLookupResult::default());
        };

        let products = self.store.products_by_code(code).await?;
        Ok(summarize_batches(products))
    }

    async fn product_records(&self, interval: &Interval) -> Result<Vec<Product>, ReportError> {
        if interval.is_bounded() {
            self.store.products_sold_in(interval).await
        } else {
            self.store.all_products().await
        }
    }
}

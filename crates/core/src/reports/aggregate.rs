//! Per-dimension aggregation over selected sales.
//!
//! Every function here is pure and keeps full decimal precision; rounding is
//! left to the report boundary.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use saleslens_shared::types::{ProductId, round_money};

use super::types::{
    CodeLookupResult, EmployeeSalesSummary, Product, ProductBatch, ProductWithSales, Sale,
    SummaryStats,
};

/// Sums line-item `total_price` per category name.
///
/// Items whose product (or product category) is missing land under
/// [`NO_CATEGORY`](super::types::NO_CATEGORY).
#[must_use]
pub fn aggregate_by_category(sales: &[Sale]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for item in sales.iter().flat_map(|sale| &sale.items) {
        *totals
            .entry(item.category_name().to_string())
            .or_insert(Decimal::ZERO) += item.total_price;
    }
    totals
}

/// Sums gross `total_amount` per payment method, keyed verbatim.
#[must_use]
pub fn aggregate_by_payment_method(sales: &[Sale]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for sale in sales {
        *totals
            .entry(sale.payment_method.clone())
            .or_insert(Decimal::ZERO) += sale.total_amount;
    }
    totals
}

/// Sums net sales per employee display name.
///
/// Sales without an employee are skipped. Employees sharing a display name
/// share an entry.
#[must_use]
pub fn aggregate_by_employee(sales: &[Sale]) -> BTreeMap<String, EmployeeSalesSummary> {
    let mut summary: BTreeMap<String, EmployeeSalesSummary> = BTreeMap::new();
    for sale in sales {
        let Some(employee) = &sale.employee else {
            continue;
        };
        summary
            .entry(employee.name.clone())
            .or_insert_with(|| EmployeeSalesSummary {
                employee_name: employee.name.clone(),
                total_net_sales: Decimal::ZERO,
            })
            .total_net_sales += sale.net_amount();
    }
    summary
}

/// Computes the summary statistics for the selected sales.
///
/// `distinct_customers` comes from a separate count over the same window.
#[must_use]
pub fn compute_summary(sales: &[Sale], distinct_customers: u64) -> SummaryStats {
    let total_sale_amount: Decimal = sales.iter().map(|s| s.total_amount).sum();
    let total_cost: Decimal = sales.iter().map(|s| s.total_cost).sum();
    let total_product_discount: Decimal = sales.iter().map(|s| s.discount).sum();
    let total_custom_discount: Decimal = sales.iter().map(Sale::resolved_custom_discount).sum();
    let total_transactions = u64::try_from(sales.len()).unwrap_or(u64::MAX);

    let average_transaction_value = if total_transactions == 0 {
        Decimal::ZERO
    } else {
        total_sale_amount / Decimal::from(total_transactions)
    };

    SummaryStats {
        total_sale_amount,
        total_cost,
        total_product_discount,
        total_custom_discount,
        net_profit: total_sale_amount
            - total_cost
            - (total_product_discount + total_custom_discount),
        total_transactions,
        average_transaction_value,
        total_distinct_customers: distinct_customers,
    }
}

impl SummaryStats {
    /// Copy with every monetary field rounded to two places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            total_sale_amount: round_money(self.total_sale_amount),
            total_cost: round_money(self.total_cost),
            total_product_discount: round_money(self.total_product_discount),
            total_custom_discount: round_money(self.total_custom_discount),
            net_profit: round_money(self.net_profit),
            total_transactions: self.total_transactions,
            average_transaction_value: round_money(self.average_transaction_value),
            total_distinct_customers: self.total_distinct_customers,
        }
    }
}

/// Attaches the sold quantity to each product, defaulting to zero.
#[must_use]
pub fn attach_sold_quantities(
    products: Vec<Product>,
    quantities: &HashMap<ProductId, Decimal>,
) -> Vec<ProductWithSales> {
    products
        .into_iter()
        .map(|product| {
            let sold_quantity = quantities
                .get(&product.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            ProductWithSales {
                product,
                sold_quantity,
            }
        })
        .collect()
}

/// Projects matching product batches and totals their quantities.
#[must_use]
pub fn summarize_batches(products: Vec<Product>) -> CodeLookupResult {
    let total_quantity = products.iter().map(|p| p.total_quantity).sum();
    let remaining_quantity = products.iter().map(|p| p.stock_quantity).sum();

    CodeLookupResult {
        records: products.into_iter().map(ProductBatch::from).collect(),
        total_quantity,
        remaining_quantity,
    }
}

/// Rounds every value of a monetary mapping.
pub(crate) fn round_values(map: BTreeMap<String, Decimal>) -> BTreeMap<String, Decimal> {
    map.into_iter().map(|(k, v)| (k, round_money(v))).collect()
}

//! Report data types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use saleslens_shared::types::{
    CategoryId, CustomerId, EmployeeId, ProductId, SaleId, SaleItemId, percent_of,
};

/// Label used for line items whose product has no category.
pub const NO_CATEGORY: &str = "No Category";

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}

/// A stocked product batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Product code, shared by every batch of the same product.
    pub code: String,
    /// Batch number.
    pub batch_no: Option<String>,
    /// Quantity received in this batch.
    pub total_quantity: Decimal,
    /// Quantity still in stock.
    pub stock_quantity: Decimal,
    /// Purchase date.
    pub purchase_date: Option<NaiveDate>,
    /// Expiry date.
    pub expire_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Category, if assigned.
    pub category: Option<Category>,
}

/// Sales staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee ID.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
}

/// Customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
}

/// How a sale's custom discount is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomDiscountType {
    /// Absolute amount in the base currency.
    #[default]
    Fixed,
    /// Percentage of the sale's gross amount.
    Percent,
}

impl CustomDiscountType {
    /// Parses a stored discount kind. Only the exact string `percent` is a
    /// percentage; everything else, including other spellings, is fixed.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("percent") => Self::Percent,
            _ => Self::Fixed,
        }
    }

    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Percent => "percent",
        }
    }
}

/// One line of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Line item ID.
    pub id: SaleItemId,
    /// Parent sale.
    pub sale_id: SaleId,
    /// Product sold.
    pub product_id: ProductId,
    /// Hydrated product; `None` if the product record no longer exists.
    pub product: Option<Product>,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Line total, already net of line-level adjustments.
    pub total_price: Decimal,
}

impl SaleItem {
    /// Category label this line is reported under.
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.product
            .as_ref()
            .and_then(|p| p.category.as_ref())
            .map_or(NO_CATEGORY, |c| c.name.as_str())
    }
}

/// A completed sale with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Sale ID.
    pub id: SaleId,
    /// Creation timestamp; decides report-window membership for the sale and its items.
    pub created_at: DateTime<Utc>,
    /// Gross amount before any discount.
    pub total_amount: Decimal,
    /// Cost of goods sold.
    pub total_cost: Decimal,
    /// Product-level discount amount.
    pub discount: Decimal,
    /// Custom discount value, interpreted per `custom_discount_type`.
    pub custom_discount: Decimal,
    /// Kind of custom discount.
    pub custom_discount_type: CustomDiscountType,
    /// Payment method, verbatim.
    pub payment_method: String,
    /// Employee who made the sale.
    pub employee: Option<Employee>,
    /// Customer, if recorded.
    pub customer: Option<Customer>,
    /// Line items in stored order.
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Custom discount in absolute currency units.
    #[must_use]
    pub fn resolved_custom_discount(&self) -> Decimal {
        match self.custom_discount_type {
            CustomDiscountType::Fixed => self.custom_discount,
            CustomDiscountType::Percent => percent_of(self.total_amount, self.custom_discount),
        }
    }

    /// Gross minus product discount minus resolved custom discount.
    #[must_use]
    pub fn net_amount(&self) -> Decimal {
        self.total_amount - self.discount - self.resolved_custom_discount()
    }
}

/// Product projection carrying the quantity sold in the report window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithSales {
    /// The product record.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity sold within the report window.
    pub sold_quantity: Decimal,
}

/// Net sales attributed to one employee name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalesSummary {
    /// Employee display name.
    pub employee_name: String,
    /// Sum of net contributions.
    pub total_net_sales: Decimal,
}

/// Summary statistics over the selected sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Sum of gross amounts.
    pub total_sale_amount: Decimal,
    /// Sum of costs.
    pub total_cost: Decimal,
    /// Sum of product-level discounts.
    pub total_product_discount: Decimal,
    /// Sum of resolved custom discounts.
    pub total_custom_discount: Decimal,
    /// Gross minus cost minus all discounts.
    pub net_profit: Decimal,
    /// Number of sales.
    pub total_transactions: u64,
    /// Gross divided by transactions, zero when there are none.
    pub average_transaction_value: Decimal,
    /// Distinct customers over the same window.
    pub total_distinct_customers: u64,
}

/// Parameters of a sales report request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Raw start date, echoed back in the report.
    pub start_date: Option<String>,
    /// Raw end date, echoed back in the report.
    pub end_date: Option<String>,
}

/// The sales report payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Products with sold quantities.
    pub products: Vec<ProductWithSales>,
    /// Sales in the window, newest first.
    pub sales: Vec<Sale>,
    /// Gross sales.
    pub total_sale_amount: Decimal,
    /// Product-level discounts.
    pub total_discount: Decimal,
    /// Resolved custom discounts.
    pub total_custom_discount: Decimal,
    /// Net profit.
    pub net_profit: Decimal,
    /// Number of sales.
    pub total_transactions: u64,
    /// Average gross per sale.
    pub average_transaction_value: Decimal,
    /// Distinct customers.
    pub total_customers: u64,
    /// Raw start date as requested.
    pub start_date: Option<String>,
    /// Raw end date as requested.
    pub end_date: Option<String>,
    /// Line-item revenue per category name.
    pub category_sales: BTreeMap<String, Decimal>,
    /// Net sales per employee name.
    pub employee_sales_summary: BTreeMap<String, EmployeeSalesSummary>,
    /// Gross sales per payment method.
    pub payment_method_totals: BTreeMap<String, Decimal>,
}

/// One batch row returned by a product-code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBatch {
    /// Batch number.
    pub batch_no: Option<String>,
    /// Quantity received.
    pub total_quantity: Decimal,
    /// Quantity in stock.
    pub stock_quantity: Decimal,
    /// Expiry date.
    pub expire_date: Option<NaiveDate>,
    /// Purchase date.
    pub purchase_date: Option<NaiveDate>,
}

impl From<Product> for ProductBatch {
    fn from(product: Product) -> Self {
        Self {
            batch_no: product.batch_no,
            total_quantity: product.total_quantity,
            stock_quantity: product.stock_quantity,
            expire_date: product.expire_date,
            purchase_date: product.purchase_date,
        }
    }
}

/// Result of a product-code lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLookupResult {
    /// Matching batches, newest first.
    pub records: Vec<ProductBatch>,
    /// Sum of received quantities.
    pub total_quantity: Decimal,
    /// Sum of in-stock quantities.
    pub remaining_quantity: Decimal,
}

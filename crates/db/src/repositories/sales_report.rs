//! Sales report repository for database operations.
//!
//! Implements the report record store on top of `SeaORM`. Window filters are
//! applied to `sales.created_at`; line items, products, employees and
//! customers are reached through sub-queries over the same window so the
//! parameter count stays fixed regardless of window size.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::SelectStatement;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, RelationTrait, Select,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{categories, customers, employees, products, sale_items, sales};
use saleslens_core::reports::{
    Category, CustomDiscountType, Customer, Employee, Interval, Product, ReportError, Sale,
    SaleItem, SalesRecordStore,
};
use saleslens_shared::types::{
    CategoryId, CustomerId, EmployeeId, ProductId, SaleId, SaleItemId,
};

/// Sales report repository implementation.
#[derive(Debug, Clone)]
pub struct SalesReportRepository {
    db: DatabaseConnection,
}

impl SalesReportRepository {
    /// Creates a new sales report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_products(
        &self,
        select: Select<products::Entity>,
    ) -> Result<Vec<Product>, ReportError> {
        let rows = select
            .find_also_related(categories::Entity)
            .order_by_desc(products::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(product, category)| to_product(product, category))
            .collect())
    }

    async fn load_items(&self, interval: &Interval) -> Result<Vec<sale_items::Model>, ReportError> {
        within(
            sale_items::Entity::find().join(JoinType::InnerJoin, sale_items::Relation::Sales.def()),
            interval,
        )
        .order_by_asc(sale_items::Column::Id)
        .all(&self.db)
        .await
        .map_err(db_error)
    }

    async fn load_employees(
        &self,
        interval: &Interval,
    ) -> Result<HashMap<Uuid, Employee>, ReportError> {
        let models = employees::Entity::find()
            .filter(employees::Column::Id.in_subquery(window_column(
                sales::Column::EmployeeId,
                interval,
            )))
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models
            .into_iter()
            .map(|m| (m.id, to_employee(m)))
            .collect())
    }

    async fn load_customers(
        &self,
        interval: &Interval,
    ) -> Result<HashMap<Uuid, Customer>, ReportError> {
        let models = customers::Entity::find()
            .filter(customers::Column::Id.in_subquery(window_column(
                sales::Column::CustomerId,
                interval,
            )))
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models
            .into_iter()
            .map(|m| (m.id, to_customer(m)))
            .collect())
    }
}

impl SalesRecordStore for SalesReportRepository {
    async fn sales_in(&self, interval: &Interval) -> Result<Vec<Sale>, ReportError> {
        let sale_models = within(sales::Entity::find(), interval)
            .order_by_desc(sales::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        if sale_models.is_empty() {
            return Ok(vec![]);
        }

        let (item_models, sold_products, employees, customers) = tokio::try_join!(
            self.load_items(interval),
            self.load_products(
                products::Entity::find()
                    .filter(products::Column::Id.in_subquery(sold_product_ids(interval)))
            ),
            self.load_employees(interval),
            self.load_customers(interval),
        )?;

        let products: HashMap<Uuid, Product> = sold_products
            .into_iter()
            .map(|p| (p.id.into_inner(), p))
            .collect();

        let item_count = item_models.len();
        let mut items_by_sale: HashMap<Uuid, Vec<SaleItem>> = HashMap::new();
        for item in item_models {
            items_by_sale
                .entry(item.sale_id)
                .or_default()
                .push(to_sale_item(item, &products));
        }

        let result: Vec<Sale> = sale_models
            .into_iter()
            .map(|model| {
                let items = items_by_sale.remove(&model.id).unwrap_or_default();
                to_sale(model, items, &employees, &customers)
            })
            .collect();

        debug!(
            sales = result.len(),
            items = item_count,
            "Loaded sales for report window"
        );

        Ok(result)
    }

    async fn all_products(&self) -> Result<Vec<Product>, ReportError> {
        self.load_products(products::Entity::find()).await
    }

    async fn products_sold_in(&self, interval: &Interval) -> Result<Vec<Product>, ReportError> {
        let result = self
            .load_products(
                products::Entity::find()
                    .filter(products::Column::Id.in_subquery(sold_product_ids(interval))),
            )
            .await?;

        debug!(products = result.len(), "Loaded products sold in window");
        Ok(result)
    }

    async fn sold_quantities(
        &self,
        interval: &Interval,
    ) -> Result<HashMap<ProductId, Decimal>, ReportError> {
        let rows: Vec<(Uuid, Option<Decimal>)> = within(
            sale_items::Entity::find()
                .select_only()
                .column(sale_items::Column::ProductId)
                .column_as(sale_items::Column::Quantity.sum(), "sold_quantity")
                .join(JoinType::InnerJoin, sale_items::Relation::Sales.def()),
            interval,
        )
        .group_by(sale_items::Column::ProductId)
        .into_tuple()
        .all(&self.db)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, qty)| (ProductId::from_uuid(id), qty.unwrap_or(Decimal::ZERO)))
            .collect())
    }

    async fn count_distinct_customers(&self, interval: &Interval) -> Result<u64, ReportError> {
        within(sales::Entity::find(), interval)
            .filter(sales::Column::CustomerId.is_not_null())
            .select_only()
            .column(sales::Column::CustomerId)
            .distinct()
            .count(&self.db)
            .await
            .map_err(db_error)
    }

    async fn products_by_code(&self, code: &str) -> Result<Vec<Product>, ReportError> {
        let result = self
            .load_products(products::Entity::find().filter(products::Column::Code.eq(code)))
            .await?;

        debug!(code = %code, batches = result.len(), "Looked up product code");
        Ok(result)
    }
}

/// Restricts a query to sales created inside `interval`.
///
/// The query must select from or join the `sales` table.
fn within<Q: QueryFilter>(query: Q, interval: &Interval) -> Q {
    let mut query = query;
    if let Some(start) = interval.start() {
        query = query.filter(sales::Column::CreatedAt.gte(start));
    }
    if let Some(end) = interval.end() {
        query = query.filter(sales::Column::CreatedAt.lte(end));
    }
    query
}

/// `SELECT <column> FROM sales WHERE <window>` as a sub-query.
fn window_column(column: sales::Column, interval: &Interval) -> SelectStatement {
    within(sales::Entity::find().select_only().column(column), interval).into_query()
}

/// Product IDs appearing on line items of in-window sales, as a sub-query.
fn sold_product_ids(interval: &Interval) -> SelectStatement {
    within(
        sale_items::Entity::find()
            .select_only()
            .column(sale_items::Column::ProductId)
            .join(JoinType::InnerJoin, sale_items::Relation::Sales.def()),
        interval,
    )
    .into_query()
}

fn db_error(e: DbErr) -> ReportError {
    ReportError::repository(e.to_string())
}

fn to_category(model: categories::Model) -> Category {
    Category {
        id: CategoryId::from_uuid(model.id),
        name: model.name,
    }
}

fn to_employee(model: employees::Model) -> Employee {
    Employee {
        id: EmployeeId::from_uuid(model.id),
        name: model.name,
    }
}

fn to_customer(model: customers::Model) -> Customer {
    Customer {
        id: CustomerId::from_uuid(model.id),
        name: model.name,
    }
}

fn to_product(model: products::Model, category: Option<categories::Model>) -> Product {
    Product {
        id: ProductId::from_uuid(model.id),
        name: model.name,
        code: model.code,
        batch_no: model.batch_no,
        total_quantity: model.total_quantity,
        stock_quantity: model.stock_quantity,
        purchase_date: model.purchase_date,
        expire_date: model.expire_date,
        created_at: model.created_at.with_timezone(&Utc),
        category: category.map(to_category),
    }
}

fn to_sale_item(model: sale_items::Model, products: &HashMap<Uuid, Product>) -> SaleItem {
    SaleItem {
        id: SaleItemId::from_uuid(model.id),
        sale_id: SaleId::from_uuid(model.sale_id),
        product_id: ProductId::from_uuid(model.product_id),
        product: products.get(&model.product_id).cloned(),
        quantity: model.quantity,
        total_price: model.total_price,
    }
}

fn to_sale(
    model: sales::Model,
    items: Vec<SaleItem>,
    employees: &HashMap<Uuid, Employee>,
    customers: &HashMap<Uuid, Customer>,
) -> Sale {
    Sale {
        id: SaleId::from_uuid(model.id),
        created_at: model.created_at.with_timezone(&Utc),
        total_amount: model.total_amount.unwrap_or(Decimal::ZERO),
        total_cost: model.total_cost.unwrap_or(Decimal::ZERO),
        discount: model.discount.unwrap_or(Decimal::ZERO),
        custom_discount: model.custom_discount.unwrap_or(Decimal::ZERO),
        custom_discount_type: CustomDiscountType::from_stored(
            model.custom_discount_type.as_deref(),
        ),
        payment_method: model.payment_method.unwrap_or_default(),
        employee: model.employee_id.and_then(|id| employees.get(&id).cloned()),
        customer: model.customer_id.and_then(|id| customers.get(&id).cloned()),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};
    use rust_decimal_macros::dec;

    fn stamp(s: &str) -> sea_orm::prelude::DateTimeWithTimeZone {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn product_model(id: Uuid) -> products::Model {
        products::Model {
            id,
            category_id: None,
            name: "Tea".to_string(),
            code: "TEA".to_string(),
            batch_no: Some("B1".to_string()),
            total_quantity: dec!(20),
            stock_quantity: dec!(12.5),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            expire_date: None,
            created_at: stamp("2024-01-02T10:00:00+05:30"),
        }
    }

    fn sale_model() -> sales::Model {
        sales::Model {
            id: Uuid::new_v4(),
            employee_id: None,
            customer_id: None,
            total_amount: None,
            total_cost: None,
            discount: None,
            custom_discount: None,
            custom_discount_type: None,
            payment_method: None,
            created_at: stamp("2024-01-05T23:59:59Z"),
        }
    }

    #[test]
    fn test_to_product_normalizes_timestamp_to_utc() {
        let id = Uuid::new_v4();
        let category = categories::Model {
            id: Uuid::new_v4(),
            name: "Drinks".to_string(),
            created_at: stamp("2024-01-01T00:00:00Z"),
        };

        let product = to_product(product_model(id), Some(category));

        assert_eq!(product.id, ProductId::from_uuid(id));
        assert_eq!(product.created_at.to_rfc3339(), "2024-01-02T04:30:00+00:00");
        assert_eq!(product.stock_quantity, dec!(12.5));
        assert_eq!(product.category.map(|c| c.name).as_deref(), Some("Drinks"));
    }

    #[test]
    fn test_to_sale_reads_nulls_as_defaults() {
        let sale = to_sale(sale_model(), vec![], &HashMap::new(), &HashMap::new());

        assert_eq!(sale.total_amount, Decimal::ZERO);
        assert_eq!(sale.total_cost, Decimal::ZERO);
        assert_eq!(sale.discount, Decimal::ZERO);
        assert_eq!(sale.custom_discount, Decimal::ZERO);
        assert_eq!(sale.custom_discount_type, CustomDiscountType::Fixed);
        assert_eq!(sale.payment_method, "");
        assert!(sale.employee.is_none());
        assert!(sale.customer.is_none());
    }

    #[test]
    fn test_to_sale_resolves_people_and_discount_kind() {
        let employee_id = Uuid::new_v4();
        let customer_id = Uuid::new_v4();
        let employees = HashMap::from([(
            employee_id,
            Employee {
                id: EmployeeId::from_uuid(employee_id),
                name: "Alice".to_string(),
            },
        )]);
        let customers = HashMap::from([(
            customer_id,
            Customer {
                id: CustomerId::from_uuid(customer_id),
                name: "Carol".to_string(),
            },
        )]);
        let model = sales::Model {
            employee_id: Some(employee_id),
            customer_id: Some(customer_id),
            total_amount: Some(dec!(1000)),
            custom_discount: Some(dec!(10)),
            custom_discount_type: Some("percent".to_string()),
            payment_method: Some("card".to_string()),
            ..sale_model()
        };

        let sale = to_sale(model, vec![], &employees, &customers);

        assert_eq!(sale.employee.clone().map(|e| e.name).as_deref(), Some("Alice"));
        assert_eq!(sale.customer.clone().map(|c| c.name).as_deref(), Some("Carol"));
        assert_eq!(sale.payment_method, "card");
        assert_eq!(sale.resolved_custom_discount(), dec!(100));
    }

    #[test]
    fn test_to_sale_item_without_product_record() {
        let product_id = Uuid::new_v4();
        let model = sale_items::Model {
            id: Uuid::new_v4(),
            sale_id: Uuid::new_v4(),
            product_id,
            quantity: dec!(3),
            total_price: dec!(45),
        };

        let item = to_sale_item(model.clone(), &HashMap::new());
        assert!(item.product.is_none());
        assert_eq!(item.category_name(), "No Category");

        let products = HashMap::from([(product_id, to_product(product_model(product_id), None))]);
        let item = to_sale_item(model, &products);
        assert_eq!(item.product.map(|p| p.code).as_deref(), Some("TEA"));
        assert_eq!(item.quantity, dec!(3));
    }
}

//! Entity re-exports.

pub use super::categories::Entity as Categories;
pub use super::customers::Entity as Customers;
pub use super::employees::Entity as Employees;
pub use super::products::Entity as Products;
pub use super::sale_items::Entity as SaleItems;
pub use super::sales::Entity as Sales;

//! Order domain built on the policy engine.
//!
//! This crate provides:
//! - Value objects for users, products, line items and money
//! - The business rules applied when an order is created
//! - `OrderService`, which admits, discounts and prices orders

pub mod config;
pub mod error;
pub mod money;
pub mod order;
pub mod product;
pub mod user;

pub use common::{OrderId, ProductId, UserId};
pub use config::OrderRules;
pub use error::OrderError;
pub use money::Money;
pub use order::{Order, OrderLine, OrderRequest, OrderService};
pub use product::{LineItem, Product, ProductCategory};
pub use user::User;

//! Order creation: admission, discounting and pricing.

mod model;
mod service;

pub mod policies;
pub mod specifications;

pub use model::{Order, OrderLine};
pub use service::{OrderRequest, OrderService};

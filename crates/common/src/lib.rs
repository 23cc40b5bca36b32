//! Shared identifier types.

pub mod types;

pub use types::{OrderId, ProductId, UserId};

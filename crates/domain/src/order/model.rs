//! Created order value.

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::product::LineItem;

/// A product reference and quantity recorded on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// An order that passed admission and has been priced.
///
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    total: Money,
    lines: Vec<OrderLine>,
    created_at: DateTime<Utc>,
    user_id: UserId,
}

impl Order {
    /// Prices the items and stamps a new identifier and creation time.
    pub(crate) fn place(user_id: UserId, items: &[LineItem]) -> Self {
        Self {
            id: OrderId::new(),
            total: items.iter().map(LineItem::total_price).sum(),
            lines: items
                .iter()
                .map(|item| OrderLine {
                    product_id: item.product_id(),
                    quantity: item.quantity(),
                })
                .collect(),
            created_at: Utc::now(),
            user_id,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the sum of price * quantity over all lines.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

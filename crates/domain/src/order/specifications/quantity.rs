use async_trait::async_trait;
use policy::{Rule, RuleViolation};

use crate::product::LineItem;

use super::QUANTITY;

/// Rejects orders where any single item exceeds the quantity limit.
#[derive(Debug, Clone)]
pub struct QuantitySpecification {
    items: Vec<LineItem>,
    max_quantity: u32,
}

impl QuantitySpecification {
    pub fn new(items: Vec<LineItem>, max_quantity: u32) -> Self {
        Self {
            items,
            max_quantity,
        }
    }
}

#[async_trait]
impl Rule for QuantitySpecification {
    fn name(&self) -> &'static str {
        QUANTITY
    }

    async fn check(&self) -> Result<bool, RuleViolation> {
        if self
            .items
            .iter()
            .any(|item| item.quantity() > self.max_quantity)
        {
            return Err(RuleViolation::new(
                QUANTITY,
                format!(
                    "User is not allowed to buy more than {} items",
                    self.max_quantity
                ),
            ));
        }
        Ok(true)
    }
}

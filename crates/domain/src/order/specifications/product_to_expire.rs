use async_trait::async_trait;
use policy::{Rule, RuleViolation};

use crate::product::LineItem;

use super::PRODUCT_TO_EXPIRE;

/// Satisfied when the item is on the "expiring soon" list.
///
/// A discount eligibility signal; never records a violation.
#[derive(Debug, Clone)]
pub struct ProductToExpireSpecification {
    item: LineItem,
    expiring_soon: Vec<String>,
}

impl ProductToExpireSpecification {
    pub fn new(item: LineItem, expiring_soon: Vec<String>) -> Self {
        Self {
            item,
            expiring_soon,
        }
    }
}

#[async_trait]
impl Rule for ProductToExpireSpecification {
    fn name(&self) -> &'static str {
        PRODUCT_TO_EXPIRE
    }

    async fn check(&self) -> Result<bool, RuleViolation> {
        Ok(self
            .expiring_soon
            .iter()
            .any(|name| name == self.item.name()))
    }
}

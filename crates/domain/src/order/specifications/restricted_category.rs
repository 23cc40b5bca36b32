use async_trait::async_trait;
use policy::{Rule, RuleViolation};

use crate::product::{LineItem, ProductCategory};
use crate::user::User;

use super::RESTRICTED_CATEGORY;

/// Rejects orders for restricted products placed by users under the legal age.
#[derive(Debug, Clone)]
pub struct RestrictedCategorySpecification {
    user: User,
    items: Vec<LineItem>,
    legal_age: u32,
    category: ProductCategory,
}

impl RestrictedCategorySpecification {
    pub fn new(
        user: User,
        items: Vec<LineItem>,
        legal_age: u32,
        category: ProductCategory,
    ) -> Self {
        Self {
            user,
            items,
            legal_age,
            category,
        }
    }
}

#[async_trait]
impl Rule for RestrictedCategorySpecification {
    fn name(&self) -> &'static str {
        RESTRICTED_CATEGORY
    }

    async fn check(&self) -> Result<bool, RuleViolation> {
        let underage = self.user.age() < self.legal_age;
        if underage && self.items.iter().any(|item| item.category() == self.category) {
            return Err(RuleViolation::new(
                RESTRICTED_CATEGORY,
                format!("User is not allowed to buy {}", self.category.plural()),
            ));
        }
        Ok(true)
    }
}

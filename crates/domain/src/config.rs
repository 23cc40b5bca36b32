//! Order admission and pricing rules.

use serde::{Deserialize, Serialize};

use crate::product::ProductCategory;

/// Tunable thresholds for the order workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRules {
    /// Minimum age for buying restricted products.
    pub legal_age: u32,

    /// Category that requires the buyer to be of legal age.
    pub restricted_category: ProductCategory,

    /// Largest quantity allowed on a single line item.
    pub max_quantity: u32,

    /// Price reduction applied to items about to expire.
    pub discount_percent: u32,

    /// Names of products that are about to expire.
    pub expiring_soon: Vec<String>,
}

impl Default for OrderRules {
    fn default() -> Self {
        Self {
            legal_age: 18,
            restricted_category: ProductCategory::AlcoholicDrink,
            max_quantity: 10,
            discount_percent: 10,
            expiring_soon: ["Milk", "Eggs", "Bread"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let rules = OrderRules::default();
        assert_eq!(rules.legal_age, 18);
        assert_eq!(rules.restricted_category, ProductCategory::AlcoholicDrink);
        assert_eq!(rules.max_quantity, 10);
        assert_eq!(rules.discount_percent, 10);
        assert_eq!(rules.expiring_soon, vec!["Milk", "Eggs", "Bread"]);
    }
}

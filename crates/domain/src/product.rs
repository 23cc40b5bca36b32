//! Catalogue products and the line items sold from them.

use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Food,
    AlcoholicDrink,
    Drink,
}

impl ProductCategory {
    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Food => "food",
            ProductCategory::AlcoholicDrink => "alcoholic drink",
            ProductCategory::Drink => "drink",
        }
    }

    /// Returns the phrase used for items of this category in general, as in
    /// "not allowed to buy alcoholic drinks".
    pub fn plural(&self) -> &'static str {
        match self {
            ProductCategory::Food => "food",
            ProductCategory::AlcoholicDrink => "alcoholic drinks",
            ProductCategory::Drink => "drinks",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    category: ProductCategory,
}

impl Product {
    /// Creates a product with a fresh identifier.
    pub fn new(name: impl Into<String>, price: Money, category: ProductCategory) -> Self {
        Self::with_id(ProductId::new(), name, price, category)
    }

    /// Creates a product with a known identifier.
    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        category: ProductCategory,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    /// Attaches a requested quantity, producing a sellable line item.
    pub fn to_sell(&self, quantity: u32) -> LineItem {
        LineItem {
            product_id: self.id,
            name: self.name.clone(),
            price: self.price,
            category: self.category,
            quantity,
        }
    }
}

/// A product together with the quantity being sold.
///
/// Line items are immutable; price adjustments return a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    product_id: ProductId,
    name: String,
    price: Money,
    category: ProductCategory,
    quantity: u32,
}

impl LineItem {
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns a copy of this item at a different unit price.
    pub fn with_price(&self, price: Money) -> LineItem {
        LineItem {
            price,
            ..self.clone()
        }
    }

    /// Returns a copy of this item with the unit price reduced by `percent`.
    pub fn discounted(&self, percent: u32) -> LineItem {
        self.with_price(self.price.percent_off(percent))
    }

    /// Returns the total price for this item (quantity * price).
    pub fn total_price(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

//! Business rules used by the order policies.

mod product_to_expire;
mod quantity;
mod restricted_category;

pub use product_to_expire::ProductToExpireSpecification;
pub use quantity::QuantitySpecification;
pub use restricted_category::RestrictedCategorySpecification;

/// Rule identifier: restricted products bought under the legal age.
pub const RESTRICTED_CATEGORY: &str = "RestrictedCategorySpecification";

/// Rule identifier: per-item quantity limit.
pub const QUANTITY: &str = "QuantitySpecification";

/// Rule identifier: product is about to expire.
pub const PRODUCT_TO_EXPIRE: &str = "ProductToExpireSpecification";

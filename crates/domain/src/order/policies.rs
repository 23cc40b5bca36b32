//! Policies assembled by the order workflow.

use policy::{Policy, PolicyCallback, Specification};

use crate::config::OrderRules;
use crate::product::LineItem;
use crate::user::User;

use super::specifications::{
    ProductToExpireSpecification, QUANTITY, QuantitySpecification, RESTRICTED_CATEGORY,
    RestrictedCategorySpecification,
};

/// Policy name: gates whether an order may be created at all.
pub const ADMISSION_POLICY: &str = "CreateOrderByUserPolicy";

/// Policy name: decides per-item price reductions.
pub const DISCOUNT_POLICY: &str = "CreateOrderDiscountPolicy";

/// Builds the admission policy for a user and the items being ordered.
pub fn admission_policy(user: &User, items: &[LineItem], rules: &OrderRules) -> Policy {
    let mut policy = Policy::new(ADMISSION_POLICY);
    policy.add_specification(Specification::new(RestrictedCategorySpecification::new(
        user.clone(),
        items.to_vec(),
        rules.legal_age,
        rules.restricted_category,
    )));
    policy.add_specification(Specification::new(QuantitySpecification::new(
        items.to_vec(),
        rules.max_quantity,
    )));
    policy
}

/// Side effects announced while an order is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionNotice {
    /// The restricted-category rule passed, so a restricted item may be sold.
    RestrictedItemSold,
    /// The quantity rule failed.
    QuantityLimitExceeded { max_quantity: u32 },
}

/// Binds the admission policy outcomes to `notify`.
///
/// The restricted-category rule notifies when satisfied, the quantity rule
/// when unsatisfied.
pub fn admission_callbacks<F>(rules: &OrderRules, notify: F) -> Vec<PolicyCallback>
where
    F: Fn(AdmissionNotice) + Clone + Send + Sync + 'static,
{
    let max_quantity = rules.max_quantity;
    let on_restricted = notify.clone();
    vec![
        PolicyCallback::on_satisfied(RESTRICTED_CATEGORY, move || {
            on_restricted(AdmissionNotice::RestrictedItemSold);
        }),
        PolicyCallback::on_unsatisfied(QUANTITY, move || {
            notify(AdmissionNotice::QuantityLimitExceeded { max_quantity });
        }),
    ]
}

/// Builds the discount policy for a single item.
pub fn discount_policy(item: &LineItem, rules: &OrderRules) -> Policy {
    let mut policy = Policy::new(DISCOUNT_POLICY);
    policy.add_specification(Specification::new(ProductToExpireSpecification::new(
        item.clone(),
        rules.expiring_soon.clone(),
    )));
    policy
}

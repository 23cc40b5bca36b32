//! Order service: admits, prices and creates orders.

use policy::PolicyCallbackHandler;

use crate::config::OrderRules;
use crate::error::{OrderError, Result};
use crate::product::LineItem;
use crate::user::User;

use super::Order;
use super::policies::{AdmissionNotice, admission_callbacks, admission_policy, discount_policy};

/// A user and the items they want to buy.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub user: User,
    pub items: Vec<LineItem>,
}

impl OrderRequest {
    pub fn new(user: User, items: Vec<LineItem>) -> Self {
        Self { user, items }
    }
}

/// Service for creating orders.
///
/// Each order gets its own admission and discount policies, so a service can
/// be shared across any number of orders.
#[derive(Debug, Clone, Default)]
pub struct OrderService {
    rules: OrderRules,
}

impl OrderService {
    /// Creates a service with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with custom rules.
    pub fn with_rules(rules: OrderRules) -> Self {
        Self { rules }
    }

    /// Returns the rules in effect.
    pub fn rules(&self) -> &OrderRules {
        &self.rules
    }

    /// Creates an order for a user.
    ///
    /// Fails with the first admission violation if any admission rule
    /// rejects the order. Otherwise discounts expiring items and totals the
    /// order.
    #[tracing::instrument(skip(self, user, items), fields(user_id = %user.id(), items = items.len()))]
    pub async fn create_order(&self, user: &User, items: Vec<LineItem>) -> Result<Order> {
        let started = std::time::Instant::now();

        let result = self.try_create_order(user, items).await;
        match &result {
            Ok(order) => {
                metrics::counter!("orders_created_total").increment(1);
                tracing::info!(order_id = %order.id(), total = %order.total(), "order created");
            }
            Err(error) => {
                metrics::counter!("orders_rejected_total").increment(1);
                tracing::warn!(%error, "order not created");
            }
        }
        metrics::histogram!("order_creation_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        result
    }

    /// Creates orders one at a time.
    ///
    /// A failed order does not stop the batch; each request gets its own result.
    pub async fn create_orders(&self, requests: Vec<OrderRequest>) -> Vec<Result<Order>> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            results.push(self.create_order(&request.user, request.items).await);
        }
        results
    }

    async fn try_create_order(&self, user: &User, items: Vec<LineItem>) -> Result<Order> {
        self.admit(user, &items).await?;
        let items = self.apply_discounts(items)?;
        Ok(Order::place(user.id(), &items))
    }

    /// Runs the admission policy and fails on the first recorded violation.
    async fn admit(&self, user: &User, items: &[LineItem]) -> Result<()> {
        let mut policy = admission_policy(user, items, &self.rules);

        let callbacks = admission_callbacks(&self.rules, log_notice);
        PolicyCallbackHandler::new(&mut policy, callbacks)
            .run_all_async_with_callbacks()
            .await;

        if policy.has_error()? {
            let violation = policy.get_errors()?.into_iter().next().cloned();
            if let Some(violation) = violation {
                return Err(OrderError::Rejected(violation));
            }
        }

        Ok(())
    }

    /// Applies the discount to every item whose discount policy is satisfied.
    fn apply_discounts(&self, items: Vec<LineItem>) -> Result<Vec<LineItem>> {
        let mut priced = Vec::with_capacity(items.len());
        for item in items {
            let mut policy = discount_policy(&item, &self.rules);

            let unresolved = policy.run_all_sync().pending_count();
            if unresolved > 0 {
                tracing::warn!(item = item.name(), unresolved, "discount checks did not resolve");
            }

            if policy.check_if_all_specifications_are_satisfied()? {
                let discounted = item.discounted(self.rules.discount_percent);
                tracing::debug!(
                    item = item.name(),
                    from = %item.price(),
                    to = %discounted.price(),
                    "discount applied"
                );
                priced.push(discounted);
            } else {
                priced.push(item);
            }
        }
        Ok(priced)
    }
}

fn log_notice(notice: AdmissionNotice) {
    match notice {
        AdmissionNotice::RestrictedItemSold => {
            tracing::info!("An alcoholic drink is going to be sold");
        }
        AdmissionNotice::QuantityLimitExceeded { max_quantity } => {
            tracing::info!("we are not going to sell more than {max_quantity} items");
        }
    }
}

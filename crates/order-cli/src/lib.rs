//! Sample order driver.
//!
//! Builds a fixed set of order requests and pushes them through the order
//! service one at a time, reporting failures without stopping the batch.

pub mod config;

use domain::{Money, Order, OrderRequest, OrderService, Product, ProductCategory, User};
use serde::Serialize;

/// An order created for a named user.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedOrder {
    pub user_name: String,
    pub order: Order,
}

/// Returns the demonstration requests.
///
/// The first request exceeds the quantity limit and is rejected; the second
/// contains an expiring product and is discounted.
pub fn sample_requests() -> Vec<OrderRequest> {
    let john = User::new("John", 18);
    let mary = User::new("Mary", 18);

    let beer = Product::new("Beer", Money::from_dollars(5), ProductCategory::AlcoholicDrink);
    let water = Product::new("Water", Money::from_dollars(5), ProductCategory::Drink);
    let milk = Product::new("Milk", Money::from_dollars(2), ProductCategory::Drink);

    vec![
        OrderRequest::new(john, vec![beer.to_sell(11), water.to_sell(1)]),
        OrderRequest::new(mary, vec![milk.to_sell(1)]),
    ]
}

/// Creates an order per request, logging and skipping the ones that fail.
pub async fn run(service: &OrderService, requests: Vec<OrderRequest>) -> Vec<CreatedOrder> {
    let user_names: Vec<String> = requests
        .iter()
        .map(|request| request.user.name().to_string())
        .collect();

    let results = service.create_orders(requests).await;

    user_names
        .into_iter()
        .zip(results)
        .filter_map(|(user_name, result)| match result {
            Ok(order) => Some(CreatedOrder { user_name, order }),
            Err(error) => {
                tracing::error!(user = %user_name, %error, "order failed");
                None
            }
        })
        .collect()
}

//! Order driver entry point.

use domain::OrderService;
use order_cli::config::{Config, LogFormat};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Create orders one at a time
    let service = OrderService::with_rules(config.rules.clone());
    let created = order_cli::run(&service, order_cli::sample_requests()).await;

    // 4. Report
    match serde_json::to_string_pretty(&created) {
        Ok(json) => println!("Orders created:\n{json}"),
        Err(error) => tracing::error!(%error, "failed to serialize created orders"),
    }
    tracing::debug!(metrics = %metrics_handle.render(), "metrics snapshot");
}

//! Application configuration loaded from environment variables.

use domain::OrderRules;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Driver configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `LEGAL_AGE`: minimum age for restricted products (default: `18`)
/// - `MAX_QUANTITY`: per-item quantity limit (default: `10`)
/// - `DISCOUNT_PERCENT`: reduction for expiring products (default: `10`)
/// - `EXPIRING_SOON`: comma separated product names (default: `Milk,Eggs,Bread`)
///
/// Values that fail to parse fall back to their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub rules: OrderRules,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = OrderRules::default();
        let number = |key: &str, default: u32| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        let rules = OrderRules {
            legal_age: number("LEGAL_AGE", defaults.legal_age),
            max_quantity: number("MAX_QUANTITY", defaults.max_quantity),
            discount_percent: number("DISCOUNT_PERCENT", defaults.discount_percent).min(100),
            expiring_soon: lookup("EXPIRING_SOON")
                .map(|v| parse_list(&v))
                .filter(|names| !names.is_empty())
                .unwrap_or_else(|| defaults.expiring_soon.clone()),
            ..defaults
        };

        Self {
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format: lookup("LOG_FORMAT")
                .and_then(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            rules,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            rules: OrderRules::default(),
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

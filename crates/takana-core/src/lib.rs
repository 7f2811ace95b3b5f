pub mod app_config;
pub mod config;
pub mod filter;
pub mod inquiry;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{
    discover_categories, filter_products, CategoryFilter, FilterCriteria, PriceBounds,
    ALL_CATEGORIES,
};
pub use inquiry::{format_price, inquiry_message, inquiry_url, CONTACT_PHONE};
pub use products::{Product, DEFAULT_DESCRIPTION};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

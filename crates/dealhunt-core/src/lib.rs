pub mod app_config;
pub mod config;
pub mod deals;
pub mod vendors;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use deals::DealRecord;
pub use vendors::{builtin_vendors, validate_vendors, SelectorSet, VendorConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("vendor catalog validation failed: {0}")]
    Validation(String),
}

pub mod app_config;
pub mod config;
mod lenient;
pub mod normalize;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use normalize::{display_name, normalize};
pub use products::{
    Dimension, DimensionValue, ListField, NormalizedProduct, RawProductRecord, PRODUCT_COLUMNS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

pub mod app_config;
pub mod config;
pub mod product;
pub mod progress;

pub use app_config::{AcquisitionMode, AppConfig, Environment, TemplateVersion};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{sentinel, ProductRecord, VariantRecord};
pub use progress::{NullSink, ProgressEvent, ProgressSink};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

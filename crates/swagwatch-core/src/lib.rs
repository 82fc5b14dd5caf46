//! Shared data model, time-zone table and configuration for swagwatch.

pub mod app_config;
pub mod config;
pub mod types;
pub mod zones;

use thiserror::Error;

pub use app_config::{AppConfig, HttpSettings};
pub use config::{
    load_app_config, load_app_config_from_env, load_http_settings, load_http_settings_from_env,
};
pub use types::{Announcement, NotificationPayload, ParsedReward, SwagCode, SwagCodeKind};
pub use zones::{UsTimeZone, DISPLAY_ZONE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

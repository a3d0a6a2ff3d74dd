//! Application configuration

mod app_config;

pub use app_config::{
    ApiKeyEntry, AppConfig, AuthConfig, IaHealthConfig, LogFormat, LoggingConfig, SeedConfig,
    ServerConfig,
};

mod app_config;

pub use app_config::{AppConfig, ExperimentsConfig, LogFormat, LoggingConfig, ServerConfig};

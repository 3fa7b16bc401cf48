mod app_config;
mod timeouts;

pub use app_config::{load_or_create, AppConfig, LoadedConfig, SiteConfig, CONFIG_ENV_VAR};
pub use timeouts::TimeoutConfig;

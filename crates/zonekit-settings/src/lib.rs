//! # ZoneKit Settings
//!
//! Application configuration: zone service location, drawing behavior, map
//! appearance and the backing image size. Configuration is persisted as TOML
//! or JSON under the platform config directory.

pub mod config;
pub mod error;

pub use config::{
    Config, DrawingSettings, ImageSettings, MapSettings, RemoteSettings, ENV_BASE_URL,
    ENV_CONFIG_PATH,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

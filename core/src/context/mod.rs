mod config;
mod error;
mod settings;

pub use config::{AppConfig, AppConfigExt, Flag, OverlayPositionConfig, OverlaySettings};
pub use error::ConfigError;
pub use settings::{FlagStore, SettingsStore};

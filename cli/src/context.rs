use std::sync::Arc;

use ticktrack_core::context::{AppConfig, AppConfigExt, ConfigError, SettingsStore};
use tokio::sync::RwLock;

/// Holds all shared state for the CLI application.
///
/// Overlay options live in the `SettingsStore` so engines created by
/// commands see edits immediately; the rest of the config stays here.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub settings: Arc<SettingsStore>,
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CliContext {
    pub fn new() -> Self {
        Self::from_config(AppConfig::load())
    }

    pub fn from_config(config: AppConfig) -> Self {
        let settings = Arc::new(SettingsStore::new(config.overlay_settings.clone()));
        Self {
            config: Arc::new(RwLock::new(config)),
            settings,
        }
    }

    /// Current config with the live overlay options folded in
    pub async fn snapshot(&self) -> AppConfig {
        let mut config = self.config.read().await.clone();
        config.overlay_settings = self.settings.snapshot();
        config
    }

    /// Persist the current config
    pub async fn save(&self) -> Result<(), ConfigError> {
        let config = self.snapshot().await;
        config.save()?;
        *self.config.write().await = config;
        Ok(())
    }
}

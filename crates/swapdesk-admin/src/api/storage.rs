//! `localStorage` access

use swapdesk_core::session::SessionPersistence;
use swapdesk_core::{DashboardConfig, Error, Result};
use web_sys::window;

/// Overrides the configured API base URL
pub const API_URL_KEY: &str = "swapdesk_api_url";

/// Overrides the configured data source (`mock` or `http`)
pub const DATA_SOURCE_KEY: &str = "swapdesk_data_source";

fn storage() -> Result<web_sys::Storage> {
    window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or_else(|| Error::Storage("localStorage is not available".to_string()))
}

fn get_item(key: &str) -> Option<String> {
    storage().ok()?.get_item(key).ok()?
}

/// Session persistence under a single `localStorage` key
#[derive(Debug, Clone)]
pub struct LocalStorage {
    key: String,
}

impl LocalStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SessionPersistence for LocalStorage {
    fn load(&self) -> Result<Option<String>> {
        storage()?
            .get_item(&self.key)
            .map_err(|_| Error::Storage(format!("Failed to read {}", self.key)))
    }

    fn save(&self, raw: &str) -> Result<()> {
        storage()?
            .set_item(&self.key, raw)
            .map_err(|_| Error::Storage(format!("Failed to write {}", self.key)))
    }

    fn clear(&self) -> Result<()> {
        storage()?
            .remove_item(&self.key)
            .map_err(|_| Error::Storage(format!("Failed to remove {}", self.key)))
    }
}

/// Default configuration with any overrides kept in `localStorage`
pub fn load_config() -> DashboardConfig {
    let mut config = DashboardConfig::default();

    for (storage_key, config_key) in [(API_URL_KEY, "api.base_url"), (DATA_SOURCE_KEY, "api.data_source")] {
        if let Some(value) = get_item(storage_key) {
            if let Err(e) = config.set(config_key, &value) {
                log::warn!("Ignoring {}: {}", storage_key, e);
            }
        }
    }

    config
}
